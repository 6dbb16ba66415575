//! # codec-bench
//!
//! A serialization throughput harness. It generates a randomized dataset,
//! then for each of three wire formats encodes it, writes the bytes to disk,
//! reads them back, decodes them, and reports encode time, decode time and
//! encoded size to stdout and a log file.
//!
//! ## Modules
//!
//! - **Dataset**: `Record`, `Dataset` and the randomized `DatasetGenerator`
//! - **Codec**: the `Codec` trait with CBOR, JSON and streaming XML adapters
//! - **Runner**: `BenchContext` and the sequential `BenchmarkRunner`
//! - **Report**: timing results and the dual console/file `ReportSink`
//!
//! ## Example
//!
//! ```rust,no_run
//! use codec_bench::prelude::*;
//!
//! let config = BenchConfig::default().with_record_count(10).with_seed(7);
//! let sink = ReportSink::open(&config.log_path())?;
//! let context = BenchContext::init(config, sink)?;
//! for report in BenchmarkRunner::new(context).run()? {
//!     println!("{}: {} bytes", report.format, report.encoded_size);
//! }
//! # Ok::<(), codec_bench::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

#[macro_use]
extern crate tracing;

// Re-export core error types
pub use error::{Error, Result};

pub mod codec;
pub mod config;
pub mod dataset;
pub mod error;
pub mod report;
pub mod runner;

pub use config::BenchConfig;
pub use report::{init_tracing, ReportSink};
pub use runner::{BenchContext, BenchmarkRunner};

pub mod prelude {
    //! Common types and traits for convenient importing

    pub use crate::codec::{all_codecs, Codec, Format};
    pub use crate::config::BenchConfig;
    pub use crate::dataset::{Dataset, DatasetGenerator, Record};
    pub use crate::error::{CodecError, Error, Result};
    pub use crate::report::{FormatReport, ReportSink, Verification};
    pub use crate::runner::{BenchContext, BenchmarkRunner};
}

/// The version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
