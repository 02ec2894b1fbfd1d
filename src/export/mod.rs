//! Result output.
//!
//! This module provides the `ResultSink` trait and its CSV and JSONL
//! implementations. The sink for a run is picked once, at construction, by
//! `open_sink`.

mod csv;
mod jsonl;
mod sink;

pub use self::csv::CsvSink;
pub use jsonl::JsonlSink;
pub use sink::{open_sink, OutputWriter, ResultSink};
