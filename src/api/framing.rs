use crate::api::model::Token;
use axum::body::{self, Bytes, Full};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;

pub(super) const CONTENT_TYPE_PLAIN: &str = "text/plain";
const CRLF: &str = "\r\n";

/// Give every outgoing response the shape router firmware parses: a single `text/plain` line
/// ending in exactly one CRLF.
///
/// Responses that carry no token of their own (server errors, and the empty bodies of 404, 405
/// or 408 responses) are answered with [`Token::GeneralError`]. Server errors and timeouts are
/// failed updates and so become HTTP 200; unmatched routes keep their 404 or 405.
pub(super) async fn frame_response(response: Response) -> Response {
    let (mut parts, body) = response.into_parts();
    let failed_update =
        parts.status.is_server_error() || parts.status == StatusCode::REQUEST_TIMEOUT;
    let payload = match hyper::body::to_bytes(body).await {
        Ok(bytes) if !bytes.is_empty() && !failed_update => bytes,
        Ok(_) => Bytes::from(Token::GeneralError.to_string()),
        Err(err) => {
            tracing::warn!("failed reading response body: {err}");
            Bytes::from(Token::GeneralError.to_string())
        }
    };

    if failed_update {
        parts.status = StatusCode::OK;
    }
    parts.headers.remove(CONTENT_LENGTH);
    parts
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_PLAIN));
    Response::from_parts(parts, body::boxed(Full::from(framed(&payload))))
}

fn framed(payload: &[u8]) -> String {
    let text = String::from_utf8_lossy(payload);
    let mut line = text.trim_end_matches(&['\r', '\n'][..]).to_string();
    line.push_str(CRLF);
    line
}
