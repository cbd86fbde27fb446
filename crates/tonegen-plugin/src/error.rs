//! Error types for plugin instantiation.

use thiserror::Error;

/// Errors that can occur while instantiating a generator.
///
/// None of these cross the C boundary: the entry points log them and hand
/// the host a null handle.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The host passed a null descriptor or a descriptor without a URI.
    #[error("null plugin descriptor")]
    NullDescriptor,

    /// The descriptor URI is not valid UTF-8.
    #[error("plugin URI is not valid UTF-8: {0}")]
    InvalidUri(#[from] std::str::Utf8Error),

    /// No generator is registered under the URI.
    #[error("unknown plugin URI: {0}")]
    UnknownUri(String),

    /// The sample rate is not finite and positive.
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(f64),
}

/// Convenience result type for plugin operations.
pub type Result<T> = std::result::Result<T, PluginError>;
