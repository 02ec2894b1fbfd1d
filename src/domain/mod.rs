//! Domain extraction and validation utilities.
//!
//! Key functions:
//! - `extract_domain()` - Turns an input field (domain or email address) into the name to check
//! - `validate_domain()` - Rejects names that cannot be sent to a resolver at all

use crate::config::{MAX_DOMAIN_LENGTH, MAX_LABEL_LENGTH};
use crate::error_handling::LookupError;

/// Extracts the domain to check from one input field.
///
/// Surrounding whitespace is trimmed. Email addresses (`user@example.com`)
/// yield the part after the last `@`. Returns `None` for blank fields and
/// `#` comments.
pub fn extract_domain(field: &str) -> Option<String> {
    let trimmed = field.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let domain = match trimmed.rsplit_once('@') {
        Some((_, host)) => host.trim(),
        None => trimmed,
    };
    Some(domain.to_string())
}

/// Checks that `domain` is something a resolver can be asked about.
///
/// This is not a full hostname grammar; it only rejects empty names,
/// over-long names and labels, empty labels, embedded whitespace or
/// control characters, and names decoded from invalid UTF-8. A single
/// trailing dot (fully-qualified form) is allowed.
///
/// # Errors
///
/// Returns `LookupError::InvalidDomain` describing the first problem found.
pub fn validate_domain(domain: &str) -> Result<(), LookupError> {
    let invalid = |reason: &str| LookupError::InvalidDomain {
        domain: domain.to_string(),
        reason: reason.to_string(),
    };

    if domain.is_empty() {
        return Err(invalid("empty domain"));
    }
    if domain.len() > MAX_DOMAIN_LENGTH {
        return Err(invalid("domain name too long"));
    }
    if domain
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(invalid("domain contains whitespace or control characters"));
    }
    if domain.contains(char::REPLACEMENT_CHARACTER) {
        return Err(invalid("domain was not valid UTF-8"));
    }

    let name = domain.strip_suffix('.').unwrap_or(domain);
    if name.is_empty() {
        return Err(invalid("domain is only the root label"));
    }
    for label in name.split('.') {
        if label.is_empty() {
            return Err(invalid("empty label"));
        }
        if label.len() > MAX_LABEL_LENGTH {
            return Err(invalid("label too long"));
        }
    }
    Ok(())
}
