//! Render configuration loaded from TOML.
//!
//! Every field has a default, so a file only needs the values it changes:
//!
//! ```toml
//! generator = "squargen"
//! frequency = 110.0
//! frequency_end = 880.0
//! amplitude_db = -12.0
//! duration = 2.5
//! bit_depth = 24
//! ```
//!
//! Command-line flags override whatever the file sets.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tonegen_core::GeneratorRegistry;

/// Errors that can occur while loading or validating a render configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// No generator with this id
    #[error("unknown generator: {0}")]
    UnknownGenerator(String),

    /// A value is out of range
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create an out-of-range error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Bit depths the WAV writer supports.
pub const SUPPORTED_BIT_DEPTHS: [u16; 3] = [16, 24, 32];

/// Everything `tonegen render` needs besides the output path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Generator id (`singen` or `squargen`).
    pub generator: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Samples per `process_block` call; smoothing advances once per block.
    pub block_size: usize,
    /// Length of the render in seconds.
    pub duration: f32,
    /// Frequency control in Hz.
    pub frequency: f32,
    /// If set, the frequency control moves linearly to this value over the
    /// render, one step per block.
    pub frequency_end: Option<f32>,
    /// Amplitude control in dB.
    pub amplitude_db: f32,
    /// Output bit depth: 16 or 24 (integer) or 32 (float).
    pub bit_depth: u16,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            generator: "singen".to_owned(),
            sample_rate: 48000,
            block_size: 256,
            duration: 1.0,
            frequency: 440.0,
            frequency_end: None,
            amplitude_db: -18.0,
            bit_depth: 32,
        }
    }
}

impl RenderConfig {
    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded render config");
        Ok(config)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Check every field, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if GeneratorRegistry::new().descriptor(&self.generator).is_none() {
            return Err(ConfigError::UnknownGenerator(self.generator.clone()));
        }
        if !(8000..=384_000).contains(&self.sample_rate) {
            return Err(ConfigError::invalid(
                "sample_rate",
                format!("{} Hz is outside 8000..=384000", self.sample_rate),
            ));
        }
        if !(1..=8192).contains(&self.block_size) {
            return Err(ConfigError::invalid(
                "block_size",
                format!("{} is outside 1..=8192", self.block_size),
            ));
        }
        if !(self.duration.is_finite() && self.duration > 0.0 && self.duration <= 3600.0) {
            return Err(ConfigError::invalid(
                "duration",
                format!("{} s is outside (0, 3600]", self.duration),
            ));
        }
        for (field, value) in [
            ("frequency", Some(self.frequency)),
            ("frequency_end", self.frequency_end),
        ] {
            if let Some(hz) = value
                && !(hz.is_finite() && hz > 0.0)
            {
                return Err(ConfigError::invalid(field, format!("{hz} Hz is not positive")));
            }
        }
        if !self.amplitude_db.is_finite() {
            return Err(ConfigError::invalid("amplitude_db", "must be finite"));
        }
        if !SUPPORTED_BIT_DEPTHS.contains(&self.bit_depth) {
            return Err(ConfigError::invalid(
                "bit_depth",
                format!("{} is not one of 16, 24, 32", self.bit_depth),
            ));
        }
        Ok(())
    }

    /// Total number of samples to render.
    pub fn total_samples(&self) -> usize {
        (f64::from(self.duration) * f64::from(self.sample_rate)).round() as usize
    }

    /// Raw frequency control for block `index` of `blocks`.
    pub fn frequency_at(&self, index: usize, blocks: usize) -> f32 {
        match self.frequency_end {
            Some(end) if blocks > 1 => {
                let t = index as f32 / (blocks - 1) as f32;
                self.frequency + (end - self.frequency) * t
            }
            _ => self.frequency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_valid() {
        let config = RenderConfig::default();
        config.validate().unwrap();
        assert_eq!(config.total_samples(), 48000);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = RenderConfig::from_toml(
            r#"
            generator = "squargen"
            frequency = 110.0
            bit_depth = 24
            "#,
        )
        .unwrap();
        assert_eq!(config.generator, "squargen");
        assert_eq!(config.frequency, 110.0);
        assert_eq!(config.bit_depth, 24);
        assert_eq!(config.sample_rate, 48000);
        assert_eq!(config.amplitude_db, -18.0);
        config.validate().unwrap();
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RenderConfig::from_toml("frequncy = 100.0").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn validation_names_the_field() {
        let cases: [(&str, fn(&mut RenderConfig)); 6] = [
            ("sample_rate", |c| c.sample_rate = 0),
            ("block_size", |c| c.block_size = 0),
            ("duration", |c| c.duration = -1.0),
            ("frequency", |c| c.frequency = 0.0),
            ("frequency_end", |c| c.frequency_end = Some(f32::NAN)),
            ("bit_depth", |c| c.bit_depth = 8),
        ];
        for (field, mutate) in cases {
            let mut config = RenderConfig::default();
            mutate(&mut config);
            match config.validate() {
                Err(ConfigError::Invalid { field: f, .. }) => assert_eq!(f, field),
                other => panic!("{field}: expected Invalid, got {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_generator() {
        let config = RenderConfig {
            generator: "sawgen".into(),
            ..RenderConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "unknown generator: sawgen");
    }

    #[test]
    fn frequency_ramp() {
        let config = RenderConfig {
            frequency: 100.0,
            frequency_end: Some(200.0),
            ..RenderConfig::default()
        };
        assert_eq!(config.frequency_at(0, 11), 100.0);
        assert!((config.frequency_at(5, 11) - 150.0).abs() < 1e-4);
        assert_eq!(config.frequency_at(10, 11), 200.0);
        assert_eq!(config.frequency_at(0, 1), 100.0);
    }

    #[test]
    fn load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "duration = 0.5\nsample_rate = 44100").unwrap();
        let config = RenderConfig::load(file.path()).unwrap();
        assert_eq!(config.total_samples(), 22050);
    }

    #[test]
    fn load_missing_file() {
        let err = RenderConfig::load("/nonexistent/render.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
        assert!(err.to_string().contains("/nonexistent/render.toml"));
    }
}
