//! DNS record querying.
//!
//! This module provides async DNS operations using `hickory-resolver`:
//! - Mail exchanger queries (MX records)
//! - Text record queries (TXT records) with SPF/DMARC extraction
//! - The `DnsLookup` trait the checker is written against

mod extract;
mod lookup;
mod records;

// Re-export public API
pub use extract::{extract_dmarc_record, extract_spf_record};
pub use lookup::{DnsLookup, HickoryLookup};
pub use records::{classify_resolve_error, lookup_mx_records, lookup_txt_records};
