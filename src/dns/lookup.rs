//! The DNS lookup seam used by the domain checker.

use std::sync::Arc;

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;

use super::records::{lookup_mx_records, lookup_txt_records};
use crate::error_handling::LookupError;

/// Source of MX and TXT answers.
///
/// The checker only depends on this trait, so it can run against the real
/// resolver or against a scripted implementation in tests.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    /// MX records as (preference, exchange) pairs. Empty on NODATA.
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<(u16, String)>, LookupError>;

    /// TXT records in resolver order. Empty on NODATA.
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError>;
}

/// `DnsLookup` backed by a shared `hickory-resolver` instance.
#[derive(Clone)]
pub struct HickoryLookup {
    resolver: Arc<TokioAsyncResolver>,
}

impl HickoryLookup {
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl DnsLookup for HickoryLookup {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<(u16, String)>, LookupError> {
        lookup_mx_records(domain, &self.resolver).await
    }

    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        lookup_txt_records(name, &self.resolver).await
    }
}

#[async_trait]
impl<T: DnsLookup + ?Sized> DnsLookup for Arc<T> {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<(u16, String)>, LookupError> {
        (**self).lookup_mx(domain).await
    }

    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        (**self).lookup_txt(name).await
    }
}
