//! Dual-destination output sink

use super::FormatReport;
use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

type Target = Box<dyn Write + Send>;

/// Writes every line to all of its targets: stdout and the log file in a
/// real run, in-memory buffers in tests.
///
/// Cloning is cheap and clones share the same targets. The sink doubles as
/// the `tracing` writer so log events land next to the report blocks.
#[derive(Clone)]
pub struct ReportSink {
    targets: Arc<Mutex<Vec<Target>>>,
}

impl ReportSink {
    /// Sink writing to stdout and to `log_path`, truncated first
    pub fn open(log_path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(log_path)
            .map_err(|e| Error::io("open_log", log_path, e))?;
        Ok(Self::from_writers(vec![Box::new(io::stdout()), Box::new(file)]))
    }

    /// Sink over arbitrary writers
    pub fn from_writers(targets: Vec<Target>) -> Self {
        Self {
            targets: Arc::new(Mutex::new(targets)),
        }
    }

    /// Write one line to every target
    pub fn line(&self, text: &str) -> io::Result<()> {
        let mut sink = self.clone();
        writeln!(sink, "{text}")
    }

    /// Startup line announcing the dataset size
    pub fn announce(&self, record_count: usize) -> io::Result<()> {
        self.line(&format!("Dataset size: {record_count} records"))
    }

    /// Write one format's report block
    pub fn report(&self, report: &FormatReport) -> io::Result<()> {
        let mut sink = self.clone();
        sink.write_all(report.render().as_bytes())?;
        sink.flush()
    }

    fn with_targets(&self, mut f: impl FnMut(&mut Target) -> io::Result<()>) -> io::Result<()> {
        let mut targets = self
            .targets
            .lock()
            .map_err(|_| io::Error::other("report sink lock poisoned"))?;
        for target in targets.iter_mut() {
            f(target)?;
        }
        Ok(())
    }
}

impl Write for ReportSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_targets(|target| target.write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_targets(|target| target.flush())
    }
}

impl<'a> MakeWriter<'a> for ReportSink {
    type Writer = ReportSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl std::fmt::Debug for ReportSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportSink").finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::codec::Format;
    use std::time::Duration;

    /// Clonable in-memory target
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuffer(pub Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_every_target_gets_every_line() {
        let console = SharedBuffer::default();
        let file = SharedBuffer::default();
        let sink = ReportSink::from_writers(vec![Box::new(console.clone()), Box::new(file.clone())]);

        sink.announce(1000).unwrap();
        sink.report(&FormatReport {
            format: Format::Structured,
            encode: Duration::from_millis(4),
            decode: Duration::from_millis(6),
            encoded_size: 512,
            expected_records: 1000,
            decoded_records: 1000,
        })
        .unwrap();

        let text = console.contents();
        assert_eq!(text, file.contents());
        assert!(text.starts_with("Dataset size: 1000 records\n"));
        assert!(text.contains("JSON\n"));
        assert!(text.contains("Overall time: 10 ms"));
        assert!(text.contains("Serialized size in bytes: 512"));
    }

    #[test]
    fn test_open_truncates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("benchmark.txt");
        std::fs::write(&path, "stale content from a previous run\n").unwrap();

        let sink = ReportSink::open(&path).unwrap();
        sink.line("fresh").unwrap();
        drop(sink);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_open_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("benchmark.txt");
        assert!(matches!(
            ReportSink::open(&path),
            Err(Error::Io { operation: "open_log", .. })
        ));
    }
}
