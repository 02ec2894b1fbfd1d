//! CSV result sink.
//!
//! One header row, then one row per result in output column order.

use std::io::Write;
use std::sync::Mutex;

use csv::Writer;

use super::sink::ResultSink;
use crate::config::OUTPUT_HEADER;
use crate::error_handling::SinkError;
use crate::models::CheckResult;

/// Thread-safe CSV writer for check results.
pub struct CsvSink<W: Write> {
    writer: Mutex<Writer<W>>,
}

impl<W: Write> CsvSink<W> {
    /// Wraps `inner` and writes the header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be written.
    pub fn new(inner: W) -> Result<Self, SinkError> {
        let mut writer = Writer::from_writer(inner);
        writer.write_record(OUTPUT_HEADER)?;
        Ok(Self {
            writer: Mutex::new(writer),
        })
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W, SinkError> {
        let writer = self.writer.into_inner().map_err(|_| SinkError::Poisoned)?;
        writer
            .into_inner()
            .map_err(|e| SinkError::Io(e.into_error()))
    }
}

impl<W: Write + Send> ResultSink for CsvSink<W> {
    fn write(&self, result: &CheckResult) -> Result<(), SinkError> {
        let mut writer = self.writer.lock().map_err(|_| SinkError::Poisoned)?;
        writer.write_record(result.to_record())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        let mut writer = self.writer.lock().map_err(|_| SinkError::Poisoned)?;
        writer.flush()?;
        Ok(())
    }
}
