//! Per-domain mail DNS checks.
//!
//! `DomainChecker` runs the MX, SPF and DMARC lookups for one domain and folds
//! their outcomes into a `CheckResult`. It never fails: every problem ends up
//! in `CheckResult::error`.

use std::future::Future;
use std::sync::Arc;

use log::debug;
use tokio_util::sync::CancellationToken;

use crate::config::DMARC_LABEL;
use crate::dns::{extract_dmarc_record, extract_spf_record, DnsLookup};
use crate::domain::validate_domain;
use crate::error_handling::{ErrorType, LookupError, ProcessingStats};
use crate::models::CheckResult;

/// Checks domains for MX, SPF and DMARC records.
///
/// Generic over the DNS source so tests can script answers. Share it between
/// workers with an `Arc`.
pub struct DomainChecker<L> {
    lookup: L,
    stats: Option<Arc<ProcessingStats>>,
}

impl<L: DnsLookup> DomainChecker<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            stats: None,
        }
    }

    /// Counts failed checks by `ErrorType` in `stats`.
    pub fn with_stats(mut self, stats: Arc<ProcessingStats>) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Checks one domain.
    ///
    /// The MX lookup runs first; if it fails (NXDOMAIN, timeout, resolver error
    /// or cancellation) the result carries that error and the TXT lookups are
    /// skipped. A failed TXT lookup only clears the corresponding SPF/DMARC
    /// flag, unless it was cancelled, which turns the whole result into an
    /// error. Each lookup is attempted once.
    pub async fn check_domain(&self, cancel: &CancellationToken, domain: &str) -> CheckResult {
        match self.run_checks(cancel, domain).await {
            Ok(result) => result,
            Err(e) => {
                if let Some(stats) = &self.stats {
                    stats.increment_error(ErrorType::from(&e));
                }
                debug!("Check failed for {domain:?}: {e}");
                CheckResult::failed(domain, e)
            }
        }
    }

    async fn run_checks(
        &self,
        cancel: &CancellationToken,
        domain: &str,
    ) -> Result<CheckResult, LookupError> {
        validate_domain(domain)?;

        let mx_records = until_cancelled(cancel, self.lookup.lookup_mx(domain)).await?;

        let spf_record = self.txt_record(cancel, domain, extract_spf_record).await?;

        let dmarc_name = format!("{DMARC_LABEL}{domain}");
        let dmarc_record = self
            .txt_record(cancel, &dmarc_name, extract_dmarc_record)
            .await?;

        Ok(CheckResult {
            domain: domain.to_string(),
            has_mx: !mx_records.is_empty(),
            has_spf: spf_record.is_some(),
            spf_record: spf_record.unwrap_or_default(),
            has_dmarc: dmarc_record.is_some(),
            dmarc_record: dmarc_record.unwrap_or_default(),
            error: String::new(),
        })
    }

    /// Looks up TXT records for `name` and picks one with `select`.
    ///
    /// Only cancellation is propagated; other failures mean "no record".
    async fn txt_record(
        &self,
        cancel: &CancellationToken,
        name: &str,
        select: fn(&[String]) -> Option<String>,
    ) -> Result<Option<String>, LookupError> {
        match until_cancelled(cancel, self.lookup.lookup_txt(name)).await {
            Ok(records) => Ok(select(&records)),
            Err(LookupError::Cancelled) => Err(LookupError::Cancelled),
            Err(e) => {
                debug!("Treating TXT lookup failure for {name} as no record: {e}");
                Ok(None)
            }
        }
    }
}

/// Races a lookup against the cancellation token.
///
/// An already-cancelled token wins without polling the lookup.
async fn until_cancelled<T, F>(cancel: &CancellationToken, lookup: F) -> Result<T, LookupError>
where
    F: Future<Output = Result<T, LookupError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(LookupError::Cancelled),
        result = lookup => result,
    }
}
