//! Benchmark run configuration

use crate::error::{Error, GenerationError, Result};
use std::path::{Path, PathBuf};

/// Default number of records per dataset
pub const DEFAULT_RECORD_COUNT: usize = 1000;

/// Default length of each record's text field and integer sequence
pub const DEFAULT_FIELD_LENGTH: usize = 1000;

/// Default name of the combined log file
pub const DEFAULT_LOG_FILE: &str = "benchmark.txt";

/// Configuration for one benchmark run
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Number of records in the canonical dataset
    pub record_count: usize,
    /// Length of every record's text field and integer sequence
    pub field_length: usize,
    /// Fixed RNG seed; `None` derives one from the wall clock
    pub seed: Option<u64>,
    /// Directory receiving the artifact files and the log file
    pub output_dir: PathBuf,
    /// Log file name, relative to `output_dir`
    pub log_file: String,
    /// Persist the re-encoded in-memory decode instead of the first encode
    pub reencode_artifact: bool,
    /// Tracing filter directive
    pub log_filter: String,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            record_count: DEFAULT_RECORD_COUNT,
            field_length: DEFAULT_FIELD_LENGTH,
            seed: None,
            output_dir: PathBuf::from("."),
            log_file: DEFAULT_LOG_FILE.to_string(),
            reencode_artifact: false,
            log_filter: "info".to_string(),
        }
    }
}

impl BenchConfig {
    /// Set the record count
    pub fn with_record_count(mut self, record_count: usize) -> Self {
        self.record_count = record_count;
        self
    }

    /// Set the field length
    pub fn with_field_length(mut self, field_length: usize) -> Self {
        self.field_length = field_length;
        self
    }

    /// Use a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Persist the re-encoded decoded copy, as a second implicit round trip
    pub fn with_reencode_artifact(mut self, reencode_artifact: bool) -> Self {
        self.reencode_artifact = reencode_artifact;
        self
    }

    /// Full path of the combined log file
    pub fn log_path(&self) -> PathBuf {
        self.output_dir.join(&self.log_file)
    }

    /// Full path of an artifact file
    pub fn artifact_path(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.output_dir.join(file_name)
    }

    /// Check the configuration before anything touches the file system
    pub fn validate(&self) -> Result<()> {
        if self.log_file.trim().is_empty() {
            return Err(Error::Configuration {
                message: "log file name must not be empty".to_string(),
            });
        }

        if self.record_count.checked_mul(self.field_length).is_none() {
            return Err(GenerationError::DatasetTooLarge {
                record_count: self.record_count,
                field_length: self.field_length,
            }
            .into());
        }

        Ok(())
    }
}
