use crate::api::model::Token;
use crate::error::Error;
use axum::response::{IntoResponse, Response};
use std::any::Any;

/// Any failure while serving an update. Router clients only ever see a [`Token`], so the cause
/// is logged here before it is collapsed.
pub(crate) struct APIError(anyhow::Error);

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let any_err = self.0;
        let token = match any_err.downcast_ref::<Error>() {
            Some(Error::InvalidHostname) => Token::NoHost,
            _ => Token::GeneralError,
        };
        match token {
            Token::GeneralError => tracing::warn!("responding {token}: {any_err:#}"),
            _ => tracing::debug!("responding {token}: {any_err:#}"),
        }
        token.into_response()
    }
}

impl<E> From<E> for APIError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Answer a panicking handler like any other failed update.
pub(super) fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::warn!("responding {}: handler panicked: {detail}", Token::GeneralError);
    Token::GeneralError.into_response()
}
