//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the downstream client from validated configuration
//! - Bind the listener and serve until a shutdown signal
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Logging is initialized by the caller, before anything here runs

use thiserror::Error;
use tokio::net::TcpListener;

use crate::client::ClientError;
use crate::config::RelayConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build downstream client: {0}")]
    Client(#[from] ClientError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Run the relay until Ctrl+C or SIGTERM.
pub async fn run(config: RelayConfig) -> Result<(), StartupError> {
    let server = HttpServer::new(config)?;
    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;

    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        result = &mut server_task => {
            result??;
            return Ok(());
        }
        _ = signals::shutdown_signal() => {}
    }
    shutdown.trigger();

    server_task.await??;
    Ok(())
}
