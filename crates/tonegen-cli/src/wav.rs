//! Mono WAV output.

use std::path::Path;

use hound::{SampleFormat, WavWriter};
use thiserror::Error;

/// Errors that can occur while writing a WAV file.
#[derive(Debug, Error)]
pub enum WavError {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The requested bit depth is not supported.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),
}

/// Sample rate and bit depth of a mono WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// 16 or 24 for integer PCM, 32 for IEEE float.
    pub bits_per_sample: u16,
}

impl TryFrom<WavSpec> for hound::WavSpec {
    type Error = WavError;

    fn try_from(spec: WavSpec) -> Result<Self, Self::Error> {
        let sample_format = match spec.bits_per_sample {
            16 | 24 => SampleFormat::Int,
            32 => SampleFormat::Float,
            other => return Err(WavError::UnsupportedBitDepth(other)),
        };
        Ok(hound::WavSpec {
            channels: 1,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format,
        })
    }
}

/// Write mono samples to `path`.
///
/// 32-bit files store the samples as-is; integer files scale by full range
/// and clip.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<(), WavError> {
    let hound_spec = hound::WavSpec::try_from(spec)?;
    let mut writer = WavWriter::create(path, hound_spec)?;

    if spec.bits_per_sample == 32 {
        for &sample in samples {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        for &sample in samples {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;
    use tempfile::NamedTempFile;

    #[test]
    fn float_samples_are_exact() {
        let samples: Vec<f32> = (0..480).map(|i| (i as f32 / 48.0).sin() * 0.5).collect();
        let file = NamedTempFile::new().unwrap();
        write_wav(
            file.path(),
            &samples,
            WavSpec {
                sample_rate: 48000,
                bits_per_sample: 32,
            },
        )
        .unwrap();

        let reader = WavReader::open(file.path()).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_format, SampleFormat::Float);
        let read: Vec<f32> = reader.into_samples().map(Result::unwrap).collect();
        assert_eq!(read, samples);
    }

    #[test]
    fn integer_samples_clip() {
        let file = NamedTempFile::new().unwrap();
        write_wav(
            file.path(),
            &[0.0, 0.5, 2.0, -2.0],
            WavSpec {
                sample_rate: 44100,
                bits_per_sample: 16,
            },
        )
        .unwrap();

        let reader = WavReader::open(file.path()).unwrap();
        let read: Vec<i32> = reader.into_samples().map(Result::unwrap).collect();
        assert_eq!(read, [0, 16384, 32767, -32768]);
    }

    #[test]
    fn rejects_8_bit() {
        let file = NamedTempFile::new().unwrap();
        let err = write_wav(
            file.path(),
            &[0.0],
            WavSpec {
                sample_rate: 48000,
                bits_per_sample: 8,
            },
        )
        .unwrap_err();
        assert!(matches!(err, WavError::UnsupportedBitDepth(8)));
    }
}
