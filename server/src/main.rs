use anyhow::Result;
use axum::Router;
use clap::Parser;
use server::{build_app, ServerConfig};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Korean preprocessing backend base URL
    #[arg(long, default_value = "http://localhost:3000")]
    ko_backend: String,
    /// English preprocessing backend base URL
    #[arg(long, default_value = "http://localhost:3001")]
    en_backend: String,
    /// Preprocessing request timeout in seconds
    #[arg(long, default_value_t = 10)]
    backend_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let app: Router = build_app(&ServerConfig {
        ko_backend: args.ko_backend,
        en_backend: args.en_backend,
        backend_timeout_secs: args.backend_timeout_secs,
    })?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "summarization server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
