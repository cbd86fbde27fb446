//! Port layout shared by both generators.

/// Index of a port as the host addresses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum PortIndex {
    /// Control input, Hz.
    Frequency = 0,
    /// Control input, dB.
    Amplitude = 1,
    /// Audio output.
    Output = 2,
}

impl PortIndex {
    /// All ports in index order.
    pub const ALL: [PortIndex; 3] = [PortIndex::Frequency, PortIndex::Amplitude, PortIndex::Output];

    /// Turtle symbol of the port.
    pub const fn symbol(self) -> &'static str {
        match self {
            PortIndex::Frequency => "freq",
            PortIndex::Amplitude => "amp",
            PortIndex::Output => "out",
        }
    }

    /// Human-readable port name.
    pub const fn name(self) -> &'static str {
        match self {
            PortIndex::Frequency => "Frequency",
            PortIndex::Amplitude => "Amplitude",
            PortIndex::Output => "Out",
        }
    }

    /// Whether this is a control (rather than audio) port.
    pub const fn is_control(self) -> bool {
        !matches!(self, PortIndex::Output)
    }
}

impl TryFrom<u32> for PortIndex {
    type Error = u32;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(PortIndex::Frequency),
            1 => Ok(PortIndex::Amplitude),
            2 => Ok(PortIndex::Output),
            other => Err(other),
        }
    }
}
