//! Low-resolution waveform preview for host inline displays.
//!
//! The preview is drawn from a [`WaveSnapshot`] only. It keeps its own local
//! phase, so rendering never touches the oscillator that produced the
//! snapshot and can run on a non-realtime thread while audio is processed.
//!
//! Pixels are ARGB32, premultiplied, one native-endian `u32` per pixel, rows
//! packed with a stride of `width * 4` bytes.
//!
//! ```rust
//! use tonegen_core::{Oscillator, Surface, Waveform, render_preview};
//!
//! let mut osc = Oscillator::new(Waveform::Sine, 48000.0);
//! osc.process_block(440.0, 0.0, &mut [0.0; 64]);
//!
//! let mut surface = Surface::new();
//! render_preview(&osc.snapshot(), 120, 100, &mut surface);
//! assert_eq!((surface.width(), surface.height()), (120, 30));
//! ```

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::f32::consts::TAU;
use libm::{roundf, sinf};

use crate::math::{db_to_coeff, phase_increment, wrap_phase};
use crate::oscillator::{WaveSnapshot, Waveform};

/// Preferred preview height in pixels; smaller if the host allows less.
pub const PREVIEW_HEIGHT: u32 = 30;

/// Opaque black.
pub const BACKGROUND_COLOR: u32 = 0xFF00_0000;

/// Opaque light grey (0.8, 0.8, 0.8).
pub const TRACE_COLOR: u32 = 0xFFCC_CCCC;

/// Frequency range the square preview is drawn at, so that a few cycles are
/// visible whatever the audio frequency.
pub const SQUARE_PREVIEW_FREQUENCY: (f32, f32) = (750.0, 6000.0);

/// Level drawn for the high half of the square preview.
pub const SQUARE_PREVIEW_HIGH: f32 = 0.95;

/// Level drawn for the low half of the square preview.
pub const SQUARE_PREVIEW_LOW: f32 = -0.9;

/// An ARGB32 image buffer.
///
/// The pixel storage is reused across renders of the same or smaller size.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Surface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resize to `width` × `height`. Pixel contents are unspecified afterwards.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.resize(width as usize * height as usize, 0);
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes.
    pub fn stride(&self) -> u32 {
        self.width * 4
    }

    /// Whether the surface has no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pointer to the first byte of pixel data, for handing to a host.
    pub fn data_ptr(&mut self) -> *mut u8 {
        self.pixels.as_mut_ptr().cast::<u8>()
    }

    /// Pixel at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Fill every pixel with `color`.
    pub fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Set one pixel; out-of-bounds coordinates are ignored.
    pub fn put(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            let index = y as usize * self.width as usize + x as usize;
            self.pixels[index] = color;
        }
    }

    /// Draw a two-pixel-thick line from `(x0, y0)` to `(x1, y1)`.
    pub fn draw_line(&mut self, (x0, y0): (i32, i32), (x1, y1): (i32, i32), color: u32) {
        // Bresenham, all octants.
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.put(x, y, color);
            self.put(x, y + 1, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

/// Waveform value drawn at each of `columns` pixel columns.
///
/// - Sine: `amp · sin(2π·phase)` from the snapshot phase, advancing by
///   `frequency / sample_rate` per column.
/// - Square: two flat levels from phase 0, at the snapshot frequency clamped
///   to [`SQUARE_PREVIEW_FREQUENCY`].
pub fn preview_trace(snapshot: &WaveSnapshot, columns: u32) -> impl Iterator<Item = f32> {
    let amp = db_to_coeff(snapshot.amplitude_db);
    let sample_rate = if snapshot.sample_rate > 0.0 {
        snapshot.sample_rate
    } else {
        1.0
    };
    let (frequency, mut phase) = match snapshot.waveform {
        Waveform::Sine => (snapshot.frequency, snapshot.phase),
        Waveform::Square => {
            let (lo, hi) = SQUARE_PREVIEW_FREQUENCY;
            (snapshot.frequency.clamp(lo, hi), 0.0)
        }
    };
    let inc = wrap_phase(phase_increment(frequency, sample_rate));
    let inc = if inc.is_finite() { inc } else { 0.0 };
    phase = if phase.is_finite() { wrap_phase(phase) } else { 0.0 };
    let waveform = snapshot.waveform;

    (0..columns).map(move |_| {
        let y = amp * sinf(TAU * phase);
        phase = wrap_phase(phase + inc);
        match waveform {
            Waveform::Sine => y,
            Waveform::Square if y > 0.0 => SQUARE_PREVIEW_HIGH,
            Waveform::Square => SQUARE_PREVIEW_LOW,
        }
    })
}

/// Draw the preview of `snapshot` into `surface`.
///
/// The surface is resized to `width × min(PREVIEW_HEIGHT, max_height)`.
pub fn render_preview(snapshot: &WaveSnapshot, width: u32, max_height: u32, surface: &mut Surface) {
    let height = PREVIEW_HEIGHT.min(max_height);
    surface.resize(width, height);
    if surface.is_empty() {
        return;
    }
    surface.fill(BACKGROUND_COLOR);

    let half = height as f32 * 0.5;
    let bottom = height as i32 - 1;
    let mut last: Option<(i32, i32)> = None;

    for (x, y) in preview_trace(snapshot, width).enumerate() {
        let yc = roundf(half - half * y);
        let yc = if yc.is_finite() {
            (yc as i32).clamp(0, bottom)
        } else {
            height as i32 / 2
        };
        let point = (x as i32, yc);
        surface.draw_line(last.unwrap_or(point), point, TRACE_COLOR);
        last = Some(point);
    }
}
