//! Error types for the satswarm core.

use thiserror::Error;

/// Errors produced by engine construction and configuration.
///
/// Runtime ticks never fail: counts are clamped and degenerate geometry is
/// special-cased, so only configuration and export paths return these.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A motion scheme name was not one of the known schemes.
    #[error("unknown motion scheme: {0}")]
    UnknownScheme(String),

    /// A noise process was requested with a zero-length averaging window.
    #[error("invalid noise window: window size must be at least 1")]
    InvalidWindowSize,

    /// Width or height was zero (or overflowed) when creating an image buffer.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// An I/O failure while exporting a snapshot.
    #[error("i/o error: {0}")]
    Io(String),
}
