use crate::api::model::Token;
use crate::api::server::AppState;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose;
use base64::Engine;
use lazy_static::lazy_static;

pub(super) const AUTH_REALM: &str = "Route 53 DNS Update API";

lazy_static! {
    static ref BASIC_CHALLENGE: HeaderValue =
        HeaderValue::from_str(&format!("Basic realm=\"{AUTH_REALM}\"")).unwrap();
}

/// A decoded HTTP Basic `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Returns `None` when the header is absent or isn't well-formed Basic auth.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
        let (scheme, encoded) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }
        let decoded = general_purpose::STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;
        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// Gate a route behind the configured username and password.
pub(super) async fn require_basic_auth<B>(
    State(state): State<AppState>,
    request: Request<B>,
    next: Next<B>,
) -> Response {
    match BasicCredentials::from_headers(request.headers()) {
        None => {
            tracing::debug!("rejected update without credentials");
            challenge(StatusCode::UNAUTHORIZED)
        }
        Some(credentials)
            if !state
                .config
                .credentials_match(&credentials.username, &credentials.password) =>
        {
            tracing::debug!("rejected update for user \"{}\"", credentials.username);
            challenge(StatusCode::FORBIDDEN)
        }
        Some(_) => next.run(request).await,
    }
}

fn challenge(status: StatusCode) -> Response {
    (
        status,
        [(WWW_AUTHENTICATE, BASIC_CHALLENGE.clone())],
        Token::BadAuth,
    )
        .into_response()
}
