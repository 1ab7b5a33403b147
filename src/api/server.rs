use crate::api::routes;
use crate::config::SharedConfig;
use crate::provider::DynRecordProvider;
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub provider: DynRecordProvider,
}

/// The update API as a [`Router`], ready to be served with
/// [`ConnectInfo<SocketAddr>`][axum::extract::ConnectInfo] available to handlers.
pub fn router(config: SharedConfig, provider: DynRecordProvider) -> Router {
    routes::new(AppState { config, provider })
}

/// Bind [`Config::api_bind_addr`][crate::config::Config::api_bind_addr] and serve the update API
/// until the returned future is dropped or the server fails.
pub fn new(
    config: SharedConfig,
    provider: DynRecordProvider,
) -> impl Future<Output = hyper::Result<()>> {
    axum::Server::bind(&config.api_bind_addr).serve(
        router(config.clone(), provider).into_make_service_with_connect_info::<SocketAddr>(),
    )
}
