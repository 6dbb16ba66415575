//! Everything a run needs, built once and passed explicitly

use crate::config::BenchConfig;
use crate::dataset::{clock_seed, Dataset, DatasetGenerator};
use crate::error::Result;
use crate::report::ReportSink;

/// Configuration, canonical dataset and output sink for one run
#[derive(Debug)]
pub struct BenchContext {
    config: BenchConfig,
    dataset: Dataset,
    sink: ReportSink,
    seed: Option<u64>,
}

impl BenchContext {
    /// Validate `config` and generate the canonical dataset
    ///
    /// Without a configured seed the generator is seeded from the clock, so
    /// every run benchmarks different data.
    pub fn init(config: BenchConfig, sink: ReportSink) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(clock_seed);
        debug!(
            seed,
            records = config.record_count,
            field_length = config.field_length,
            "generating dataset"
        );
        let dataset =
            DatasetGenerator::from_seed(seed).generate(config.record_count, config.field_length);

        Ok(Self {
            config,
            dataset,
            sink,
            seed: Some(seed),
        })
    }

    /// Use an already generated dataset, e.g. one drawn from a scripted source
    pub fn with_dataset(config: BenchConfig, dataset: Dataset, sink: ReportSink) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            dataset,
            sink,
            seed: None,
        })
    }

    /// Run configuration
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Canonical dataset; read-only for the rest of the run
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Output sink
    pub fn sink(&self) -> &ReportSink {
        &self.sink
    }

    /// Seed the dataset was generated from, if this context generated it
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}
