use crate::api::api_error::{self, APIError};
use crate::api::model::{Token, UpdateParams};
use crate::api::server::AppState;
use crate::api::{auth, framing};
use axum::extract::{ConnectInfo, Query, State};
use axum::http::header::USER_AGENT;
use axum::http::HeaderMap;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use axum_extra::extract::WithRejection;
use std::net::SocketAddr;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub(super) fn new(state: AppState) -> Router {
    Router::new()
        .route("/nic/update", get(nic_update))
        .route("/nic/update/", get(nic_update))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_basic_auth,
        ))
        .layer(CatchPanicLayer::custom(api_error::panic_response))
        .layer(TimeoutLayer::new(state.config.api_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::map_response(framing::frame_response))
        .with_state(state)
}

async fn nic_update(
    State(state): State<AppState>,
    ConnectInfo(client_addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    WithRejection(Query(params), _): WithRejection<Query<UpdateParams>, APIError>,
) -> Result<Token, APIError> {
    if params.offline.is_some() {
        return Ok(Token::NotSupported);
    }

    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty());
    match user_agent {
        Some(user_agent) if !state.config.user_agent_denied(user_agent) => {}
        _ => {
            tracing::debug!("rejected update from {client_addr} with user agent {user_agent:?}");
            return Ok(Token::BadAgent);
        }
    }

    let Some(hostname) = params.hostname.as_deref() else {
        return Ok(Token::NoHost);
    };
    let Some(record) = state.provider.find_record(hostname).await? else {
        tracing::debug!("no record for \"{hostname}\"");
        return Ok(Token::NoHost);
    };

    let address = params.candidate_address(client_addr.ip());
    if address == record.value {
        tracing::debug!("\"{hostname}\" already points at {address}");
        return Ok(Token::NoChange(address));
    }

    if state.provider.update_record(&record, &address).await? {
        tracing::info!(
            "updated \"{hostname}\" from {} to {address} for {client_addr}",
            record.value
        );
        Ok(Token::Good(address))
    } else {
        tracing::warn!("provider declined to update \"{hostname}\" to {address}");
        Ok(Token::GeneralError)
    }
}
