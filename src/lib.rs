//! Route 53 DynDNS
//!
//! A small HTTP server that speaks the [DynDNS update API][dyndns] understood by consumer routers
//! and keeps an [Amazon Route 53][route53] `A` record pointed at the router's address.
//!
//! The router authenticates with HTTP Basic credentials and calls
//! [`/nic/update`][crate::api#nicupdate-get]. The record is looked up fresh on every request and
//! only written when the address differs from the published one.
//!
//! [dyndns]: https://help.dyn.com/remote-access-api/perform-update/
//! [route53]: https://aws.amazon.com/route53/
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod config;
pub mod error;
pub mod provider;

pub use api::new as new_http;
pub use config::{Config, SharedConfig};
pub use provider::{DynRecordProvider, InMemoryProvider, Record, RecordProvider, Route53Provider};
