//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Bind server to listener and serve with graceful shutdown
//!
//! # Design Decisions
//! - The router is an explicit value wired with injected state; nothing
//!   registers itself against a process-wide app object
//! - Handlers share startup-built state immutably via Arc; requests
//!   never observe each other

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::http::handlers;
use crate::http::request::RequestIdLayer;
use crate::lookup::Enricher;
use crate::net::ServerIdentity;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub enricher: Arc<Enricher>,
    pub identity: Arc<ServerIdentity>,
}

/// HTTP server for the speed-test service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig, identity: ServerIdentity) -> Self {
        let state = AppState {
            enricher: Arc::new(Enricher::new(config.lookup.clone())),
            identity: Arc::new(identity),
            config: Arc::new(config.clone()),
        };

        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::index))
            .route("/api/speedtest/ping", get(handlers::ping))
            .route("/api/speedtest/download", get(handlers::download))
            .route("/api/speedtest/upload", post(handlers::upload))
            .route("/api/speedtest/network", get(handlers::network_info))
            .route("/api/speedtest/test", get(handlers::test_guide))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.limits.max_upload_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(middleware::from_fn(metrics::track))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Stops on Ctrl+C or on the shutdown broadcast, whichever first.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_signal() => {}
                    _ = shutdown.recv() => {
                        tracing::info!("Shutdown broadcast received");
                    }
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        // Signal handling is unavailable; rely on the broadcast channel.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
