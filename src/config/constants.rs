//! Configuration constants.
//!
//! Defaults for the CLI and the library `Config`, plus fixed operational
//! limits.

/// Default number of concurrent workers.
pub const DEFAULT_WORKERS: usize = 10;

/// Default bounded queue capacity between the input reader and the workers.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Default sustained DNS check rate across all workers.
pub const DEFAULT_RATE_LIMIT_RPS: u32 = 10;

/// Default overall run deadline in seconds (0 disables the deadline).
pub const DEFAULT_TIMEOUT_SECS: u64 = 0;

/// DNS query timeout in seconds.
/// Most queries complete in well under a second; 3s fails fast on dead servers.
pub const DNS_TIMEOUT_SECS: u64 = 3;

/// Seconds between progress log lines while the pool is running.
pub const LOGGING_INTERVAL: u64 = 5;

/// Maximum length of a domain name in presentation format (RFC 1035).
pub const MAX_DOMAIN_LENGTH: usize = 253;

/// Maximum length of a single DNS label (RFC 1035).
pub const MAX_LABEL_LENGTH: usize = 63;

/// TXT prefix identifying an SPF record. Compared byte-for-byte.
pub const SPF_PREFIX: &str = "v=spf1";

/// TXT prefix identifying a DMARC record. Compared byte-for-byte.
pub const DMARC_PREFIX: &str = "v=DMARC1";

/// Label prepended to a domain to find its DMARC policy.
pub const DMARC_LABEL: &str = "_dmarc.";

/// Column names of the result output, in order.
pub const OUTPUT_HEADER: [&str; 7] = [
    "domain",
    "hasMX",
    "hasSPF",
    "spfRecord",
    "hasDMARC",
    "dmarcRecord",
    "error",
];
