//! Error types for the codec benchmark
//!
//! Every failure in generation, encoding, decoding or file I/O is fatal to a
//! benchmark run and travels up through [`Error`]. A record-count mismatch
//! after reload is not an error; see [`crate::report::Verification`].

use crate::codec::Format;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the benchmark
#[derive(Error, Debug)]
pub enum Error {
    /// Dataset generation errors
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Encode or decode errors raised by a codec adapter
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// File system errors on artifacts or the log file
    #[error("I/O error: {operation} {}: {source}", path.display())]
    Io {
        /// Operation that failed, e.g. `write_artifact`
        operation: &'static str,
        /// File the operation targeted
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        /// What is wrong with the configuration
        message: String,
    },
}

impl Error {
    /// Wrap an I/O error with the operation and path it happened on
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

/// Dataset generation error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The requested dataset would not fit in addressable memory
    #[error("Dataset too large: {record_count} records x {field_length} elements overflows usize")]
    DatasetTooLarge {
        /// Requested record count
        record_count: usize,
        /// Requested field length
        field_length: usize,
    },
}

/// Codec-specific error types
#[derive(Error, Debug)]
pub enum CodecError {
    /// Serialization failed
    #[error("{format} encode failed: {reason}")]
    Encode {
        /// Format that failed
        format: Format,
        /// Underlying failure
        reason: String,
    },

    /// Deserialization failed
    #[error("{format} decode failed: {reason}")]
    Decode {
        /// Format that failed
        format: Format,
        /// Underlying failure
        reason: String,
    },
}

impl CodecError {
    /// Build an encode error from any displayable cause
    pub fn encode(format: Format, reason: impl ToString) -> Self {
        Self::Encode {
            format,
            reason: reason.to_string(),
        }
    }

    /// Build a decode error from any displayable cause
    pub fn decode(format: Format, reason: impl ToString) -> Self {
        Self::Decode {
            format,
            reason: reason.to_string(),
        }
    }

    /// Format the failing adapter belongs to
    pub fn format(&self) -> Format {
        match self {
            Self::Encode { format, .. } | Self::Decode { format, .. } => *format,
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience type alias for generation Results
pub type GenerationResult<T> = std::result::Result<T, GenerationError>;

/// Convenience type alias for codec Results
pub type CodecResult<T> = std::result::Result<T, CodecError>;
