//! Error types.

/// Error enumerates the possible Route 53 DynDNS error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a required [`Config`][crate::config::Config] setting is absent or empty.
    #[error("'{0}' is a required config setting")]
    MissingSetting(&'static str),

    /// Returned by [`RecordProvider::find_record`][crate::provider::RecordProvider::find_record]
    /// when the hostname to look up is empty.
    #[error("need a record name")]
    InvalidHostname,

    /// Returned when the DNS provider can't be reached, rejects our credentials, or otherwise
    /// fails a request.
    #[error("DNS provider error: {0}")]
    Provider(String),

    /// Returned when a provider lookup doesn't resolve to exactly one record set.
    #[error("expected a single record for \"{hostname}\", found {count}")]
    RecordCount { hostname: String, count: usize },

    /// Returned when a provider record set doesn't hold exactly one value, e.g. an alias record
    /// or a multi-value answer.
    #[error("record \"{name}\" holds {values} values, expected 1")]
    MalformedRecord { name: String, values: usize },

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when [trying to load a `Config`][crate::config::Config::try_from_file] fails
    /// due to invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),
}
