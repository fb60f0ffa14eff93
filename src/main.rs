use std::net::SocketAddr;

use axum::{Router, routing::get};
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    errors::Result,
    routes::{beacon_route::beacon_router, root_route},
    state::AppState,
};

pub mod config;
pub mod consts;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod utils;

#[cfg(test)]
mod test_support;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    let state = AppState::init(&config).await?;

    info!("Starting server");

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Serving beacons at http://{}", listener.local_addr()?);
    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_route))
        .merge(beacon_router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
