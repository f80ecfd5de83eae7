//! Error types.
//!
//! Playback itself never fails: malformed timing is clamped to an immediate
//! reveal. Errors only surface when a transcript is validated or loaded.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// A transcript whose timing is not usable as authored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    /// A line is scheduled before the line preceding it.
    #[error("line {index} is at {offset_millis}ms, before the previous line at {previous_millis}ms")]
    OutOfOrder {
        /// Index of the offending line.
        index: usize,
        /// Offset of the offending line.
        offset_millis: u64,
        /// Offset of the line before it.
        previous_millis: u64,
    },
}

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Transcript failed validation.
    #[error("invalid transcript: {0}")]
    Transcript(#[from] TranscriptError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Transcript file could not be parsed.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
