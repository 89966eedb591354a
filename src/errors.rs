/*!
 * Error types for the subsync application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors caused by a transcript that cannot be turned into subtitles.
///
/// These abort the pipeline; no partial subtitle file is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranscriptionError {
    /// The transcript contains no segments at all
    #[error("Transcript contains no segments")]
    EmptyTranscript,

    /// Every segment in the transcript is blank
    #[error("Transcript contains no speech: all {segment_count} segments are blank")]
    NoSpeech {
        /// Number of segments that were inspected
        segment_count: usize,
    },

    /// A segment starts before the segment preceding it
    #[error("Segment {segment_id} starts at {start:.3}s, before the previous segment start {previous_start:.3}s")]
    SegmentOutOfOrder {
        /// Id of the offending segment
        segment_id: usize,
        /// Start of the offending segment in seconds
        start: f64,
        /// Start of the preceding segment in seconds
        previous_start: f64,
    },

    /// A segment has an impossible time range
    #[error("Segment {segment_id} has invalid timing: {start}s --> {end}s")]
    InvalidSegmentTiming {
        /// Id of the offending segment
        segment_id: usize,
        /// Start in seconds
        start: f64,
        /// End in seconds
        end: f64,
    },
}

/// Errors in processing thresholds
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A limit that must be at least one is zero
    #[error("{field} must be greater than zero")]
    ZeroLimit {
        /// Name of the offending field
        field: &'static str,
    },

    /// Minimum duration exceeds maximum duration
    #[error("min_duration_ms ({min}) is greater than max_duration_ms ({max})")]
    DurationBounds {
        /// Configured minimum
        min: u64,
        /// Configured maximum
        max: u64,
    },

    /// A CPS limit is zero, negative or not a number
    #[error("{field} must be a positive number, got {value}")]
    InvalidCps {
        /// Name of the offending field
        field: &'static str,
        /// Configured value
        value: f64,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum SubSyncError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from an unusable transcript
    #[error("Transcription error: {0}")]
    Transcription(#[from] TranscriptionError),

    /// Error from invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for SubSyncError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for SubSyncError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
