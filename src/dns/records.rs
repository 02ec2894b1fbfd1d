//! DNS record queries (TXT, MX).
//!
//! Thin wrappers over `hickory-resolver` that map resolver failures onto
//! `LookupError`. A NODATA answer (name exists, no records of the type) is an
//! empty vector; NXDOMAIN is an error.

use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::error::ProtoErrorKind;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::LookupError;

/// Queries TXT (text) records for a name.
///
/// # Returns
///
/// The TXT record strings in the order the resolver returned them. Records made
/// of several character-strings are joined without a separator.
///
/// # Errors
///
/// `NxDomain`, `Timeout` or `Resolve` as classified by `classify_resolve_error`.
pub async fn lookup_txt_records(
    name: &str,
    resolver: &TokioAsyncResolver,
) -> Result<Vec<String>, LookupError> {
    match resolver.lookup(name, RecordType::TXT).await {
        Ok(lookup) => {
            let txt_records: Vec<String> = lookup
                .iter()
                .filter_map(|rdata| {
                    if let RData::TXT(txt) = rdata {
                        Some(
                            txt.iter()
                                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                                .collect::<Vec<String>>()
                                .join(""),
                        )
                    } else {
                        None
                    }
                })
                .collect();
            Ok(txt_records)
        }
        Err(e) => match classify_resolve_error(name, &e) {
            LookupError::NoRecords(_) => Ok(Vec::new()),
            err => {
                log::debug!("TXT record lookup failed for {name}: {e}");
                Err(err)
            }
        },
    }
}

/// Queries MX (mail exchanger) records for a domain.
///
/// # Returns
///
/// A vector of (priority, hostname) tuples, sorted by priority (lower = higher priority).
/// Empty when the domain exists but publishes no MX records.
///
/// # Errors
///
/// `NxDomain`, `Timeout` or `Resolve` as classified by `classify_resolve_error`.
pub async fn lookup_mx_records(
    domain: &str,
    resolver: &TokioAsyncResolver,
) -> Result<Vec<(u16, String)>, LookupError> {
    match resolver.lookup(domain, RecordType::MX).await {
        Ok(lookup) => {
            let mut mx_records: Vec<(u16, String)> = lookup
                .iter()
                .filter_map(|rdata| {
                    if let RData::MX(mx) = rdata {
                        Some((mx.preference(), mx.exchange().to_utf8()))
                    } else {
                        None
                    }
                })
                .collect();
            mx_records.sort_by_key(|(priority, _)| *priority);
            Ok(mx_records)
        }
        Err(e) => match classify_resolve_error(domain, &e) {
            LookupError::NoRecords(_) => Ok(Vec::new()),
            err => {
                if matches!(err, LookupError::Timeout(_)) {
                    log::warn!("MX record lookup timed out for {domain}: {e}");
                } else {
                    log::debug!("Failed to lookup MX records for {domain}: {e}");
                }
                Err(err)
            }
        },
    }
}

/// Maps a resolver error onto the lookup error taxonomy.
pub fn classify_resolve_error(name: &str, error: &ResolveError) -> LookupError {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => {
            if *response_code == ResponseCode::NXDomain {
                LookupError::NxDomain(name.to_string())
            } else {
                LookupError::NoRecords(name.to_string())
            }
        }
        ResolveErrorKind::Timeout => LookupError::Timeout(name.to_string()),
        ResolveErrorKind::Proto(proto) if matches!(proto.kind(), ProtoErrorKind::Timeout) => {
            LookupError::Timeout(name.to_string())
        }
        _ => LookupError::Resolve {
            domain: name.to_string(),
            message: error.to_string(),
        },
    }
}
