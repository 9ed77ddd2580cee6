pub mod handlers;

use std::net::SocketAddr;

use anyhow::Result;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use handlers::blob_checker_invoked;

/// Port the Functions host assigns to its custom handler process.
static CUSTOM_HANDLER_PORT: &str = "FUNCTIONS_CUSTOMHANDLER_PORT";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port: u16 = std::env::var(CUSTOM_HANDLER_PORT)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(8080);

    let app = Router::new().route("/BlobChecker", post(blob_checker_invoked));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("blob checker listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
    info!("shutdown signal received");
}
