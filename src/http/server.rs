//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the post routes and the docs endpoint
//! - Wire up middleware (tracing, body limit, request ID)
//! - Bind server to listener
//! - Stop accepting on shutdown and drain in-flight requests

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use utoipa::openapi::OpenApi;

use crate::config::ProxyConfig;
use crate::docs;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::posts::posts_router;
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
    pub docs: Arc<OpenApi>,
}

impl AppState {
    /// Build the upstream client and the OpenAPI document from `config`.
    pub fn new(config: &ProxyConfig) -> Self {
        Self {
            upstream: Arc::new(UpstreamClient::new(config.upstream.base_url.clone())),
            docs: Arc::new(docs::document(config)),
        }
    }
}

/// Errors that can occur while serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Build the Axum router with all routes and middleware layers.
pub fn build_router(config: &ProxyConfig, state: AppState) -> Router {
    let docs_route = format!("{}/openapi.json", config.routes.docs_path);

    Router::new()
        .merge(posts_router(&config.routes.prefix))
        .route(&docs_route, get(docs::openapi_json))
        .with_state(state)
        // Extractors buffer up to the configured limit instead of axum's 2 MiB default.
        .layer(DefaultBodyLimit::max(config.listener.max_body_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes)),
        )
}

/// HTTP server for the posts proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let state = AppState::new(&config);
        Self::with_state(config, state)
    }

    /// Create a server around pre-built state (e.g. a custom upstream client).
    pub fn with_state(config: ProxyConfig, state: AppState) -> Self {
        let router = build_router(&config, state);
        Self { router, config }
    }

    /// Bind the configured listener address.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        let addr = self.config.listener.bind_address.clone();
        TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })
    }

    /// Run the server until the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            prefix = %self.config.routes.prefix,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}
