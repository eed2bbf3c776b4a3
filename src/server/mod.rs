// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

pub mod auth;
pub mod error;
pub mod rate_table;

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::api::RateSource;
use crate::config::Config;
use auth::{verifier_from_config, CredentialVerifier};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub rates: Arc<dyn RateSource>,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(config: Config, rates: Arc<dyn RateSource>) -> Self {
        let verifier = verifier_from_config(&config.addin);
        Self {
            config: Arc::new(config),
            rates,
            verifier,
        }
    }

    pub fn with_verifier(mut self, verifier: Arc<dyn CredentialVerifier>) -> Self {
        self.verifier = verifier;
        self
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.allowed_origins);

    Router::new()
        .route(
            "/rate-table",
            get(rate_table::get_rate_table).post(rate_table::post_rate_table),
        )
        .route("/echo", post(rate_table::post_echo))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(state: AppState) -> Result<()> {
    let bind_addr = state.config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;

    info!(
        addr = %bind_addr,
        upstream = %state.config.upstream.base_url,
        require_api_key = state.config.addin.require_api_key,
        "ecbfx-relay started"
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server runtime error")?;

    info!("ecbfx-relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
