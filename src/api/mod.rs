//! HTTP API compatible with DynDNS router clients.
//!
//! # API Endpoints
//!
//! ## `/nic/update` (GET)
//!
//!   Also served as `/nic/update/`.
//!
//!   Requires HTTP Basic authentication with the configured
//!   [`Config::username`][`crate::config::Config::username`] and
//!   [`Config::password`][`crate::config::Config::password`]. Requests without credentials get
//!   HTTP 401 (Unauthorized), requests with the wrong credentials get HTTP 403 (Forbidden). Both
//!   carry the body `badauth` and a `WWW-Authenticate: Basic realm="Route 53 DNS Update API"`
//!   header.
//!
//!   Understands the query parameters:
//!
//!   * `hostname`: the name of the `A` record to update.
//!   * `myip`: the address to publish. Defaults to the address the request came from.
//!   * `offline`: not supported, any value is answered with `!donator`.
//!
//!   Authenticated requests always get HTTP 200 (OK) with one of the DynDNS return codes, checked
//!   in this order:
//!
//!   | body                | meaning                                                         |
//!   |---------------------|-----------------------------------------------------------------|
//!   | `!donator`          | `offline` was requested                                         |
//!   | `badagent`          | no `User-Agent`, or one listed in `BAD_USER_AGENTS`             |
//!   | `nohost`            | `hostname` missing or empty                                     |
//!   | `911`               | the DNS provider failed, or the lookup wasn't a single record   |
//!   | `nohost`            | the DNS provider has no record for `hostname`                   |
//!   | `nochg <ip>`        | the record already points at `<ip>`                             |
//!   | `good <ip>`         | the record was updated to `<ip>`                                |
//!   | `911`               | the update was refused or failed                                |
//!
//!   E.g.
//!
//!   ```bash
//!   ❯ curl -u admin:secret -A ddclient \
//!     'http://localhost:5000/nic/update?hostname=home.example.com&myip=192.168.1.1'
//!   good 192.168.1.1
//!   ```
//!
//! # Framing
//!
//! Every response, including errors produced outside the update handler, has
//! `Content-Type: text/plain` and a body of a single line ending in `\r\n`. Responses that would
//! otherwise have no token (unknown paths, timeouts, internal failures) answer `911`. Timeouts and
//! internal failures are failed updates and are sent with status 200.

mod api_error;
mod auth;
mod framing;
mod model;
mod routes;
pub mod server;

pub use server::{new, router};
