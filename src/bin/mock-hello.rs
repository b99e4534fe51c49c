//! Stand-in for the downstream greeting service.
//!
//! Answers `GET /hello` with `Hello, World!`. With `--throttle N` the first
//! N requests get `429 Too Many Requests`, which exercises the relay's retry
//! path.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::get,
    Router,
};
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mock-hello")]
struct Cli {
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Number of initial requests answered with 429.
    #[arg(long, default_value_t = 0)]
    throttle: u32,
}

#[derive(Clone)]
struct MockState {
    served: Arc<AtomicU32>,
    throttle: u32,
}

async fn hello(State(state): State<MockState>, headers: HeaderMap) -> (StatusCode, &'static str) {
    let count = state.served.fetch_add(1, Ordering::SeqCst) + 1;
    let trace_id = headers.get("trace_id").and_then(|v| v.to_str().ok()).unwrap_or("-");
    let span_id = headers.get("span_id").and_then(|v| v.to_str().ok()).unwrap_or("-");

    if count <= state.throttle {
        tracing::info!(count, trace_id, span_id, "Throttling request");
        return (StatusCode::TOO_MANY_REQUESTS, "Too Many Requests");
    }

    tracing::info!(count, trace_id, span_id, "Serving greeting");
    (StatusCode::OK, "Hello, World!")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mock_hello=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let state = MockState {
        served: Arc::new(AtomicU32::new(0)),
        throttle: cli.throttle,
    };
    let app = Router::new().route("/hello", get(hello)).with_state(state);

    let listener = TcpListener::bind(cli.bind).await?;
    tracing::info!(address = %cli.bind, throttle = cli.throttle, "Mock downstream listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(greeting_relay::lifecycle::signals::shutdown_signal())
        .await?;
    Ok(())
}
