//! Tests for command-line parsing into `Config`.

use clap::Parser;
use mail_dns_check::{Config, OutputFormat};
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn test_short_flags() {
    let config =
        Config::try_parse_from(["mail_dns_check", "in.csv", "-w", "3", "-t", "5", "-o", "r.csv"])
            .unwrap();
    assert_eq!(config.workers, 3);
    assert_eq!(config.deadline(), Some(Duration::from_secs(5)));
    assert_eq!(config.output, Some(PathBuf::from("r.csv")));
}

#[test]
fn test_rate_limit_zero_disables_limiter() {
    let config =
        Config::try_parse_from(["mail_dns_check", "in.csv", "--rate-limit-rps", "0"]).unwrap();
    assert_eq!(config.rate_limit_rps, 0);
    assert!(mail_dns_check::initialization::init_rate_limiter(
        config.rate_limit_rps,
        config.effective_burst()
    )
    .is_none());
}

#[test]
fn test_unknown_format_is_rejected() {
    let result = Config::try_parse_from(["mail_dns_check", "in.csv", "--format", "xml"]);
    assert!(result.is_err());
}

#[test]
fn test_non_numeric_workers_is_rejected() {
    let result = Config::try_parse_from(["mail_dns_check", "in.csv", "--workers", "many"]);
    assert!(result.is_err());
}

#[test]
fn test_format_values() {
    for (value, expected) in [("csv", OutputFormat::Csv), ("jsonl", OutputFormat::Jsonl)] {
        let config =
            Config::try_parse_from(["mail_dns_check", "in.csv", "--format", value]).unwrap();
        assert_eq!(config.format, expected);
    }
}
