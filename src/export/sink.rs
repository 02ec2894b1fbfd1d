//! The result sink abstraction and destination selection.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use crate::config::OutputFormat;
use crate::error_handling::{InitializationError, SinkError};
use crate::models::CheckResult;

use super::csv::CsvSink;
use super::jsonl::JsonlSink;

/// Destination for check results.
///
/// Implementations serialize concurrent calls internally; callers never lock.
/// A successful `write` is only guaranteed durable after the next `flush`.
pub trait ResultSink: Send + Sync {
    /// Appends one result.
    fn write(&self, result: &CheckResult) -> Result<(), SinkError>;

    /// Pushes everything written so far to the underlying medium.
    fn flush(&self) -> Result<(), SinkError>;
}

impl<S: ResultSink + ?Sized> ResultSink for Arc<S> {
    fn write(&self, result: &CheckResult) -> Result<(), SinkError> {
        (**self).write(result)
    }

    fn flush(&self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

/// Writer type shared by the file and stdout destinations.
pub type OutputWriter = Box<dyn Write + Send>;

/// Opens the sink for a run.
///
/// Writes to `output` (created or truncated) or to stdout when `None`.
///
/// # Errors
///
/// Returns `InitializationError::OutputError` if the file cannot be created or
/// the header cannot be written.
pub fn open_sink(
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<Arc<dyn ResultSink>, InitializationError> {
    let (writer, label): (OutputWriter, String) = match output {
        Some(path) => {
            let file = File::create(path).map_err(|source| InitializationError::OutputError {
                path: path.display().to_string(),
                source,
            })?;
            (Box::new(BufWriter::new(file)), path.display().to_string())
        }
        None => (Box::new(io::stdout()), "<stdout>".to_string()),
    };

    let sink: Arc<dyn ResultSink> = match format {
        OutputFormat::Csv => {
            Arc::new(
                CsvSink::new(writer).map_err(|e| InitializationError::OutputError {
                    path: label,
                    source: sink_error_to_io(e),
                })?,
            )
        }
        OutputFormat::Jsonl => Arc::new(JsonlSink::new(writer)),
    };
    Ok(sink)
}

fn sink_error_to_io(error: SinkError) -> io::Error {
    match error {
        SinkError::Io(e) => e,
        other => io::Error::other(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_sink_csv_file_writes_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        let sink = open_sink(Some(&path), OutputFormat::Csv).unwrap();
        sink.write(&CheckResult::failed("a.invalid", "no such domain: a.invalid"))
            .unwrap();
        sink.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("domain,hasMX,hasSPF,spfRecord,hasDMARC,dmarcRecord,error")
        );
        assert_eq!(
            lines.next(),
            Some("a.invalid,false,false,,false,,no such domain: a.invalid")
        );
    }

    #[test]
    fn test_open_sink_jsonl_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.jsonl");

        let sink = open_sink(Some(&path), OutputFormat::Jsonl).unwrap();
        sink.write(&CheckResult::failed("a.invalid", "boom")).unwrap();
        sink.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("\"domain\":\"a.invalid\""));
    }

    #[test]
    fn test_open_sink_unwritable_path_is_setup_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("out.csv");

        match open_sink(Some(&path), OutputFormat::Csv) {
            Err(InitializationError::OutputError { path: p, .. }) => {
                assert!(p.contains("missing-dir"));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected an output error"),
        }
    }

    #[test]
    fn test_open_sink_truncates_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale contents\nmore stale\n").unwrap();

        let sink = open_sink(Some(&path), OutputFormat::Csv).unwrap();
        sink.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
        assert_eq!(content.lines().count(), 1);
    }
}
