// Shared test helpers: a scripted DNS source and input/config builders.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use mail_dns_check::{Config, DnsLookup, LogFormat, LogLevel, LookupError, OutputFormat};
use tempfile::NamedTempFile;

/// Scripted DNS answers keyed by queried name.
///
/// Names without an entry answer NXDOMAIN; an optional delay is applied to
/// every query.
#[derive(Default, Clone)]
pub struct ScriptedDns {
    mx: HashMap<String, Vec<(u16, String)>>,
    txt: HashMap<String, Vec<String>>,
    delay: Option<Duration>,
}

#[allow(dead_code)] // Not every test file uses every builder
impl ScriptedDns {
    pub fn new() -> Self {
        Self::default()
    }

    /// A domain with one MX host and the given SPF and DMARC TXT records.
    pub fn with_mail_domain(mut self, domain: &str, spf: &[&str], dmarc: &[&str]) -> Self {
        self.mx
            .insert(domain.to_string(), vec![(10, format!("mx.{domain}."))]);
        self.txt.insert(domain.to_string(), to_strings(spf));
        self.txt
            .insert(format!("_dmarc.{domain}"), to_strings(dmarc));
        self
    }

    /// A domain that exists but answers no MX records.
    pub fn with_no_mx(mut self, domain: &str) -> Self {
        self.mx.insert(domain.to_string(), Vec::new());
        self.txt.insert(domain.to_string(), Vec::new());
        self.txt.insert(format!("_dmarc.{domain}"), Vec::new());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn to_strings(records: &[&str]) -> Vec<String> {
    records.iter().map(|s| s.to_string()).collect()
}

#[async_trait]
impl DnsLookup for ScriptedDns {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<(u16, String)>, LookupError> {
        self.pause().await;
        self.mx
            .get(domain)
            .cloned()
            .ok_or_else(|| LookupError::NxDomain(domain.to_string()))
    }

    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        self.pause().await;
        self.txt
            .get(name)
            .cloned()
            .ok_or_else(|| LookupError::NxDomain(name.to_string()))
    }
}

/// Writes `lines` to a temporary input file.
#[allow(dead_code)]
pub fn write_input(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create input file");
    for line in lines {
        writeln!(file, "{line}").expect("Failed to write input file");
    }
    file.flush().expect("Failed to flush input file");
    file
}

/// Minimal config for tests: quiet logging, no rate limit, no deadline.
#[allow(dead_code)]
pub fn test_config(input: &Path, output: PathBuf, format: OutputFormat) -> Config {
    Config {
        file: input.to_path_buf(),
        workers: 4,
        queue_capacity: 8,
        rate_limit_rps: 0,
        rate_burst: 0,
        timeout_seconds: 0,
        dns_timeout_seconds: 1,
        output: Some(output),
        format,
        log_level: LogLevel::Error,
        log_format: LogFormat::Plain,
    }
}
