//! JSONL result sink.
//!
//! One JSON object per line, keyed like the CSV header.

use std::io::Write;
use std::sync::Mutex;

use super::sink::ResultSink;
use crate::error_handling::SinkError;
use crate::models::CheckResult;

/// Thread-safe JSON-lines writer for check results.
pub struct JsonlSink<W: Write> {
    writer: Mutex<W>,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: Mutex::new(inner),
        }
    }

    /// Returns the underlying writer without flushing it.
    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer.into_inner().map_err(|_| SinkError::Poisoned)
    }
}

impl<W: Write + Send> ResultSink for JsonlSink<W> {
    fn write(&self, result: &CheckResult) -> Result<(), SinkError> {
        // Serialize before locking so a bad record never leaves half a line behind
        let mut line = serde_json::to_vec(result)?;
        line.push(b'\n');

        let mut writer = self.writer.lock().map_err(|_| SinkError::Poisoned)?;
        writer.write_all(&line)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        let mut writer = self.writer.lock().map_err(|_| SinkError::Poisoned)?;
        writer.flush()?;
        Ok(())
    }
}
