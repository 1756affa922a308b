use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use clap::Parser;
use std::net::SocketAddr;
use tandem_server::{ws_handler, ServerConfig};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tandem-server", about = "Two-party call signaling relay")]
struct Args {
    /// Listen port; falls back to TANDEM_PORT.
    #[arg(long)]
    port: Option<u16>,

    /// Origin allowed to connect; falls back to TANDEM_ALLOWED_ORIGIN.
    #[arg(long)]
    allow_origin: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = ServerConfig::resolve(args.port, args.allow_origin)?;

    let state = tandem_server::bootstrap();

    let cors = if config.allowed_origin == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(
                config
                    .allowed_origin
                    .parse::<HeaderValue>()
                    .context("invalid allowed origin")?,
            )
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Signaling relay listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind listen address")?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
