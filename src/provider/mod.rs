//! Hosted DNS record access.
//!
//! Supports a generic interface for looking up the single `A` record published for a hostname
//! and upserting a new value for it.
//!
//! Two implementations are provided, [`route53::Route53Provider`] and
//! [`memory::InMemoryProvider`]. The former talks to the [Amazon Route 53][route53] API and owns
//! no state of its own. The latter keeps records in process memory and is not durable across
//! restarts.
//!
//! [route53]: https://docs.aws.amazon.com/Route53/latest/APIReference/Welcome.html

use crate::error::Error;
use std::sync::Arc;

pub mod memory;
pub mod route53;

#[allow(clippy::module_name_repetitions)]
pub use memory::InMemoryProvider;
#[allow(clippy::module_name_repetitions)]
pub use route53::Route53Provider;

/// `DynRecordProvider` is a type alias for a [`RecordProvider`] shared by every request handler
/// through an [`Arc`].
#[allow(clippy::module_name_repetitions)]
pub type DynRecordProvider = Arc<dyn RecordProvider + Send + Sync>;

/// One provider-side resource record, fetched fresh for every update request.
///
/// Only `value` is ever changed by an update. Every other attribute is sent back to the provider
/// exactly as it was fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub record_type: String,
    /// Disambiguates weighted records sharing a name.
    pub set_identifier: Option<String>,
    pub ttl: Option<i64>,
    pub weight: Option<i64>,
    /// The single address currently published.
    pub value: String,
}

/// An async trait describing the two calls made against the hosted DNS provider while serving
/// the [`/nic/update` API endpoint][crate::api#nicupdate-get].
#[async_trait::async_trait]
pub trait RecordProvider {
    /// Find the record published for `hostname`.
    ///
    /// Returns `Ok(None)` when the provider answered but holds no record by that name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHostname`] for an empty hostname, [`Error::Provider`] when the
    /// provider call fails, and [`Error::RecordCount`] or [`Error::MalformedRecord`] when the
    /// answer doesn't resolve to exactly one single-valued record.
    async fn find_record(&self, hostname: &str) -> Result<Option<Record>, Error>;

    /// Upsert `value` as the new value of `record`, returning whether the provider accepted it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Provider`] when the provider call fails.
    async fn update_record(&self, record: &Record, value: &str) -> Result<bool, Error>;
}

pub(crate) fn require_hostname(hostname: &str) -> Result<&str, Error> {
    if hostname.is_empty() {
        return Err(Error::InvalidHostname);
    }
    Ok(hostname)
}

/// Providers report names fully qualified (`www.example.com.`) while router clients rarely do.
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}
