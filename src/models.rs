use serde::{Deserialize, Serialize};

/// Outcome of checking one domain.
///
/// Either `error` is empty and the other fields reflect what the lookups
/// found, or `error` is set and every flag is false with empty records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub domain: String,
    #[serde(rename = "hasMX")]
    pub has_mx: bool,
    #[serde(rename = "hasSPF")]
    pub has_spf: bool,
    #[serde(rename = "spfRecord")]
    pub spf_record: String,
    #[serde(rename = "hasDMARC")]
    pub has_dmarc: bool,
    #[serde(rename = "dmarcRecord")]
    pub dmarc_record: String,
    pub error: String,
}

impl CheckResult {
    /// An error result: all flags false, records empty.
    pub fn failed(domain: impl Into<String>, error: impl ToString) -> Self {
        Self {
            domain: domain.into(),
            error: error.to_string(),
            ..Default::default()
        }
    }

    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// Field values in output column order.
    pub fn to_record(&self) -> [String; 7] {
        [
            self.domain.clone(),
            self.has_mx.to_string(),
            self.has_spf.to_string(),
            self.spf_record.clone(),
            self.has_dmarc.to_string(),
            self.dmarc_record.clone(),
            self.error.clone(),
        ]
    }
}
