//! Benchmark runner
//!
//! For each codec, strictly one after another:
//!
//! 1. encode the canonical dataset (timed)
//! 2. persist the bytes to the codec's artifact file, truncating it
//! 3. reload the artifact from disk
//! 4. decode the reloaded bytes (timed)
//! 5. compare the decoded record count with the canonical one
//! 6. write the report block
//!
//! Any codec or I/O error aborts the whole run: the failing format gets no
//! report and the remaining formats are not attempted. A record-count
//! mismatch in step 5 only logs a warning.

pub mod context;

pub use context::BenchContext;

use crate::codec::{all_codecs, Codec, Format};
use crate::error::{Error, Result};
use crate::report::{FormatReport, Verification};
use std::borrow::Cow;
use std::fs;
use std::time::Instant;

/// Drives every codec through the encode, persist, reload, decode pipeline
pub struct BenchmarkRunner {
    context: BenchContext,
    codecs: Vec<Box<dyn Codec>>,
}

impl BenchmarkRunner {
    /// Runner over the three standard codecs
    pub fn new(context: BenchContext) -> Self {
        Self::with_codecs(context, all_codecs())
    }

    /// Runner over a custom codec list
    pub fn with_codecs(context: BenchContext, codecs: Vec<Box<dyn Codec>>) -> Self {
        Self { context, codecs }
    }

    /// Shared run state
    pub fn context(&self) -> &BenchContext {
        &self.context
    }

    /// Announce the dataset, then benchmark every codec in order
    pub fn run(&self) -> Result<Vec<FormatReport>> {
        let records = self.context.dataset().len();
        self.context
            .sink()
            .announce(records)
            .map_err(|e| self.sink_error(e))?;

        let mut reports = Vec::with_capacity(self.codecs.len());
        for codec in &self.codecs {
            reports.push(self.run_codec(codec.as_ref())?);
        }

        info!(formats = reports.len(), "benchmark complete");
        Ok(reports)
    }

    /// Benchmark a single codec and write its report block
    pub fn run_codec(&self, codec: &dyn Codec) -> Result<FormatReport> {
        let format = codec.format();
        let config = self.context.config();
        let canonical = self.context.dataset();

        let started = Instant::now();
        let encoded = codec
            .encode(canonical)
            .map_err(|e| fatal(format, "encode", e))?;
        let encode = started.elapsed();
        debug!(%format, bytes = encoded.len(), ?encode, "encoded");

        let artifact: Cow<'_, [u8]> = if config.reencode_artifact {
            let copy = codec
                .decode(&encoded)
                .map_err(|e| fatal(format, "decode_for_reencode", e))?;
            let reencoded = codec
                .encode(&copy)
                .map_err(|e| fatal(format, "reencode", e))?;
            Cow::Owned(reencoded)
        } else {
            Cow::Borrowed(encoded.as_slice())
        };

        let path = config.artifact_path(format.artifact_file_name());
        fs::write(&path, &artifact)
            .map_err(|e| fatal(format, "write_artifact", Error::io("write_artifact", &path, e)))?;
        debug!(%format, path = %path.display(), "persisted artifact");

        let reloaded = fs::read(&path)
            .map_err(|e| fatal(format, "read_artifact", Error::io("read_artifact", &path, e)))?;

        let started = Instant::now();
        let decoded = codec
            .decode(&reloaded)
            .map_err(|e| fatal(format, "decode", e))?;
        let decode = started.elapsed();
        debug!(%format, records = decoded.len(), ?decode, "decoded");

        let report = FormatReport {
            format,
            encode,
            decode,
            encoded_size: encoded.len(),
            expected_records: canonical.len(),
            decoded_records: decoded.len(),
        };

        if let Verification::CountMismatch { expected, actual } = report.verification() {
            warn!(
                %format,
                expected,
                actual,
                "reloaded record count differs from the canonical dataset"
            );
        }

        self.context
            .sink()
            .report(&report)
            .map_err(|e| self.sink_error(e))?;
        Ok(report)
    }

    fn sink_error(&self, source: std::io::Error) -> Error {
        let err = Error::io("write_report", self.context.config().log_path(), source);
        error!(error = %err, "benchmark aborted");
        err
    }
}

fn fatal(format: Format, operation: &'static str, err: impl Into<Error>) -> Error {
    let err = err.into();
    error!(%format, operation, error = %err, "benchmark aborted");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::BinaryCodec;
    use crate::config::BenchConfig;
    use crate::dataset::{Dataset, DatasetGenerator, Record};
    use crate::error::{CodecError, CodecResult};
    use crate::report::sink::tests::SharedBuffer;
    use crate::report::ReportSink;
    use tempfile::TempDir;

    /// Decodes one record short of what was encoded
    struct LossyCodec;

    impl Codec for LossyCodec {
        fn format(&self) -> Format {
            Format::Binary
        }

        fn encode(&self, dataset: &Dataset) -> CodecResult<Vec<u8>> {
            BinaryCodec.encode(dataset)
        }

        fn decode(&self, bytes: &[u8]) -> CodecResult<Dataset> {
            let mut records: Vec<Record> = BinaryCodec.decode(bytes)?.into();
            records.pop();
            Ok(Dataset::new(records))
        }
    }

    fn runner(config: BenchConfig) -> (BenchmarkRunner, SharedBuffer, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let buffer = SharedBuffer::default();
        let sink = ReportSink::from_writers(vec![Box::new(buffer.clone())]);
        let config = config.with_output_dir(dir.path());
        let context = BenchContext::init(config, sink).unwrap();
        (BenchmarkRunner::new(context), buffer, dir)
    }

    #[test]
    fn test_run_reports_every_format() {
        let config = BenchConfig::default()
            .with_record_count(3)
            .with_field_length(3)
            .with_seed(1);
        let (runner, buffer, dir) = runner(config);

        let reports = runner.run().unwrap();
        let formats: Vec<Format> = reports.iter().map(|r| r.format).collect();
        assert_eq!(formats, Format::ALL.to_vec());

        for report in &reports {
            assert_eq!(report.decoded_records, 3);
            assert!(report.verification().is_match());
            assert!(report.encoded_size > 3);
            assert_eq!(report.total_millis(), report.encode_millis() + report.decode_millis());

            let artifact = dir.path().join(report.format.artifact_file_name());
            assert_eq!(fs::metadata(&artifact).unwrap().len() as usize, report.encoded_size);
        }

        let output = buffer.contents();
        assert!(output.starts_with("Dataset size: 3 records\n"));
        for format in Format::ALL {
            assert!(output.contains(&format!("{format}\nSerialization time: ")));
        }
    }

    #[test]
    fn test_startup_line_leads_logged_output() {
        let dir = tempfile::tempdir().unwrap();
        let buffer = SharedBuffer::default();
        let sink = ReportSink::from_writers(vec![Box::new(buffer.clone())]);
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(sink.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let config = BenchConfig::default()
                .with_record_count(2)
                .with_field_length(2)
                .with_seed(9)
                .with_output_dir(dir.path());
            let context = BenchContext::init(config, sink).unwrap();
            BenchmarkRunner::new(context).run().unwrap();
        });

        let output = buffer.contents();
        assert!(output.starts_with("Dataset size: 2 records\n"), "{output}");
        assert!(output.contains("benchmark complete"));
    }

    #[test]
    fn test_artifact_is_truncated_before_write() {
        let config = BenchConfig::default()
            .with_record_count(2)
            .with_field_length(2)
            .with_seed(2);
        let (runner, _, dir) = runner(config);
        let stale = dir.path().join(Format::Structured.artifact_file_name());
        fs::write(&stale, vec![b' '; 1 << 16]).unwrap();

        let reports = runner.run().unwrap();
        assert_eq!(
            fs::metadata(&stale).unwrap().len() as usize,
            reports[1].encoded_size
        );
    }

    #[test]
    fn test_reencoded_artifact_matches_first_encode() {
        let config = BenchConfig::default()
            .with_record_count(5)
            .with_field_length(8)
            .with_seed(3)
            .with_reencode_artifact(true);
        let (runner, _, dir) = runner(config);

        for report in runner.run().unwrap() {
            let bytes = fs::read(dir.path().join(report.format.artifact_file_name())).unwrap();
            let expected = report.format.codec().encode(runner.context().dataset()).unwrap();
            assert_eq!(bytes, expected);
        }
    }

    #[test]
    fn test_count_mismatch_is_soft() {
        let config = BenchConfig::default()
            .with_record_count(4)
            .with_field_length(2)
            .with_seed(4);
        let (runner, buffer, _dir) = runner(config);
        let runner = BenchmarkRunner::with_codecs(runner.context, vec![Box::new(LossyCodec)]);

        let reports = runner.run().unwrap();
        assert_eq!(
            reports[0].verification(),
            Verification::CountMismatch { expected: 4, actual: 3 }
        );
        assert!(buffer.contents().contains("CBOR\n"));
    }

    #[test]
    fn test_codec_error_aborts_remaining_formats() {
        let dir = tempfile::tempdir().unwrap();
        let buffer = SharedBuffer::default();
        let sink = ReportSink::from_writers(vec![Box::new(buffer.clone())]);
        let mut records: Vec<Record> = DatasetGenerator::from_seed(5).generate(2, 2).into();
        records[0].fraction = f64::INFINITY;
        let config = BenchConfig::default().with_output_dir(dir.path());
        let context = BenchContext::with_dataset(config, Dataset::new(records), sink).unwrap();

        let err = BenchmarkRunner::new(context).run().unwrap_err();
        assert!(matches!(
            err,
            Error::Codec(CodecError::Encode { format: Format::Structured, .. })
        ));

        let output = buffer.contents();
        assert!(output.contains("CBOR\n"));
        assert!(!output.contains("JSON\n"));
        assert!(!output.contains("XML\n"));
        assert!(!dir.path().join(Format::Markup.artifact_file_name()).exists());
    }

    #[test]
    fn test_missing_output_dir_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = BenchConfig::default()
            .with_record_count(1)
            .with_field_length(1)
            .with_seed(6)
            .with_output_dir(dir.path().join("absent"));
        let context = BenchContext::init(config, ReportSink::from_writers(Vec::new())).unwrap();

        let err = BenchmarkRunner::new(context).run().unwrap_err();
        assert!(matches!(err, Error::Io { operation: "write_artifact", .. }));
    }
}
