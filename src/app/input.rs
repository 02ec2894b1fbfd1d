//! Input reading.
//!
//! Domains come from the first field of each CSV record. The whole source is
//! read before any check starts, so a bad input fails the run up front.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::debug;

use crate::domain::extract_domain;
use crate::error_handling::InitializationError;

/// Path that selects stdin instead of a file.
pub const STDIN_PATH: &str = "-";

/// Reads the domain list from `path`, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Returns `InitializationError::InputError` if the source cannot be opened or
/// read.
pub fn read_domains(path: &Path) -> Result<Vec<String>, InitializationError> {
    let label = path.display().to_string();
    let input_error = |message: String| InitializationError::InputError {
        path: label.clone(),
        message,
    };

    let domains = if path.as_os_str() == STDIN_PATH {
        parse_domains(io::stdin().lock())
    } else {
        let file = File::open(path).map_err(|e| input_error(e.to_string()))?;
        parse_domains(file)
    }
    .map_err(|e| input_error(e.to_string()))?;

    debug!("Read {} domains from {}", domains.len(), label);
    Ok(domains)
}

/// Parses domains from CSV input.
///
/// Records may have any number of fields; only the first is used. Blank
/// records and `#` comment lines are skipped, and `user@domain` becomes
/// `domain`. Fields that are not valid UTF-8 are decoded lossily and kept, so
/// one bad line never hides the rest of the input.
///
/// # Errors
///
/// Returns the underlying `csv::Error` for unreadable or malformed input.
pub fn parse_domains<R: Read>(reader: R) -> Result<Vec<String>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut domains = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        // Undecodable bytes become U+FFFD; the checker rejects such names per row
        let Some(field) = record.get(0) else {
            continue;
        };
        if let Some(domain) = extract_domain(&String::from_utf8_lossy(field)) {
            domains.push(domain);
        }
    }
    Ok(domains)
}
