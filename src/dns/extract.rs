//! DNS record extraction utilities.
//!
//! Selects the SPF and DMARC records out of a TXT record collection. Matching
//! is a literal, case-sensitive prefix compare on the raw record text: no
//! trimming, no case folding. `" v=spf1"` and `"V=SPF1"` are not SPF records.

use crate::config::{DMARC_PREFIX, SPF_PREFIX};

/// Extracts the SPF record from TXT records.
///
/// Returns the first record, in the order given, whose first six bytes are
/// `v=spf1`, or `None` if no record matches.
pub fn extract_spf_record(txt_records: &[String]) -> Option<String> {
    first_with_prefix(txt_records, SPF_PREFIX)
}

/// Extracts the DMARC record from TXT records.
///
/// The records are expected to come from `_dmarc.<domain>`. Returns the first
/// record whose first eight bytes are `v=DMARC1`.
pub fn extract_dmarc_record(txt_records: &[String]) -> Option<String> {
    first_with_prefix(txt_records, DMARC_PREFIX)
}

fn first_with_prefix(txt_records: &[String], prefix: &str) -> Option<String> {
    txt_records
        .iter()
        .find(|txt| txt.as_bytes().starts_with(prefix.as_bytes()))
        .cloned()
}
