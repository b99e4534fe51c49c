//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the greeting handler
//! - Wire up middleware (request tracing)
//! - Bind server to listener with graceful shutdown
//! - Forward each greeting to the downstream via `HelloClient`

use axum::{extract::State, routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::client::{ClientError, HelloClient};
use crate::config::RelayConfig;
use crate::lifecycle::ShutdownSignal;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub hello: Arc<HelloClient>,
}

/// HTTP server for the greeting relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a server whose downstream client is built from `config`.
    pub fn new(config: RelayConfig) -> Result<Self, ClientError> {
        let hello = HelloClient::from_config(&config)?;
        Ok(Self::with_client(config, hello))
    }

    /// Create a server around an existing client.
    pub fn with_client(config: RelayConfig, hello: HelloClient) -> Self {
        let state = AppState {
            hello: Arc::new(hello),
        };
        let router = Self::build_router(state);
        Self { router, config }
    }

    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/greeting", get(greeting_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Serve until a shutdown signal arrives, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            downstream = %self.config.downstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// `GET /greeting`: relay the downstream greeting verbatim.
async fn greeting_handler(State(state): State<AppState>) -> Result<String, ClientError> {
    state.hello.hello().await
}
