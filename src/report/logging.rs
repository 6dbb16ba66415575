//! Tracing subscriber setup

use super::ReportSink;
use crate::error::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber that writes through `sink`
///
/// `filter` is an [`EnvFilter`] directive such as `"info"` or
/// `"codec_bench=debug"`. The environment is not consulted.
pub fn init_tracing(sink: &ReportSink, filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter).map_err(|e| Error::Configuration {
        message: format!("invalid log filter {filter:?}: {e}"),
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(sink.clone())
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::Configuration {
            message: format!("failed to install tracing subscriber: {e}"),
        })
}
