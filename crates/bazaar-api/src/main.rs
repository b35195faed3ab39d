// SPDX-License-Identifier: BUSL-1.1
//! Bazaar API server binary.
//!
//! Reads configuration from the environment, connects the optional
//! Postgres mirror, and serves the marketplace API.

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use bazaar_api::state::{ApiConfig, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("BAZAAR_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    let config = ApiConfig::from_env();
    if config.auth_token.is_none() {
        tracing::warn!("BAZAAR_AUTH_TOKEN not set — API is unauthenticated");
    }

    let db = match bazaar_api::db::init_pool().await {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!(error = %err, "database initialization failed");
            std::process::exit(1);
        }
    };

    let state = AppState::with_config(config, db);
    let app = bazaar_api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("bazaar-api listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
