//! Benchmark results and where they are written
//!
//! A [`FormatReport`] keeps the raw nanosecond-resolution durations of one
//! format's run. Only the rendered block truncates them to whole
//! milliseconds.

pub mod logging;
pub mod sink;

pub use logging::init_tracing;
pub use sink::ReportSink;

use crate::codec::Format;
use std::time::Duration;

/// Timed phase of a format's run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Dataset to bytes
    Encode,
    /// Bytes to dataset
    Decode,
}

/// Duration of one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingSample {
    /// Which phase was timed
    pub phase: Phase,
    /// How long it took
    pub duration: Duration,
}

/// Outcome of comparing the reloaded record count with the canonical one
///
/// A mismatch is a soft diagnostic, never an error: the run carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// Same number of records on both sides
    Match,
    /// The reloaded dataset has a different length
    CountMismatch {
        /// Canonical record count
        expected: usize,
        /// Reloaded record count
        actual: usize,
    },
}

impl Verification {
    /// Compare two record counts
    pub fn compare(expected: usize, actual: usize) -> Self {
        if expected == actual {
            Verification::Match
        } else {
            Verification::CountMismatch { expected, actual }
        }
    }

    /// Whether the counts agreed
    pub fn is_match(&self) -> bool {
        matches!(self, Verification::Match)
    }
}

/// Measurements for one format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatReport {
    /// Format measured
    pub format: Format,
    /// Encode duration
    pub encode: Duration,
    /// Decode duration
    pub decode: Duration,
    /// Size of the first encode, in bytes
    pub encoded_size: usize,
    /// Canonical record count
    pub expected_records: usize,
    /// Record count after reload
    pub decoded_records: usize,
}

impl FormatReport {
    /// Encode time in whole milliseconds, truncated
    pub fn encode_millis(&self) -> u128 {
        self.encode.as_millis()
    }

    /// Decode time in whole milliseconds, truncated
    pub fn decode_millis(&self) -> u128 {
        self.decode.as_millis()
    }

    /// Sum of the two displayed millisecond values
    pub fn total_millis(&self) -> u128 {
        self.encode_millis() + self.decode_millis()
    }

    /// Both timing samples, encode first
    pub fn samples(&self) -> [TimingSample; 2] {
        [
            TimingSample {
                phase: Phase::Encode,
                duration: self.encode,
            },
            TimingSample {
                phase: Phase::Decode,
                duration: self.decode,
            },
        ]
    }

    /// Reloaded count against canonical count
    pub fn verification(&self) -> Verification {
        Verification::compare(self.expected_records, self.decoded_records)
    }

    /// The fixed-format report block, one value per line
    pub fn render(&self) -> String {
        format!(
            "{}\nSerialization time: {} ms\nDeserialization time: {} ms\nOverall time: {} ms\nSerialized size in bytes: {}\n",
            self.format,
            self.encode_millis(),
            self.decode_millis(),
            self.total_millis(),
            self.encoded_size,
        )
    }
}
