//! Pixel tracker
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request                ┌──────────────────────────────────────────┐
//!     ──────────────────────────────▶  http::server (axum + tower-http)        │
//!                                   │      │                                   │
//!                                   │      ├─ /pixel.gif, /favicon.ico         │
//!                                   │      │     cookies::Reconciler           │
//!                                   │      │     + assets (loaded at startup)  │
//!                                   │      │                                   │
//!                                   │      └─ anything else → 301 redirect     │
//!     Client Response               │                                          │
//!     ◀──────────────────────────────  Set-Cookie, P3P, payload                │
//!                                   │                                          │
//!                                   │  config · observability · lifecycle      │
//!                                   └──────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use pixel_tracker::config::load_or_default;
use pixel_tracker::observability::{logging, metrics};
use pixel_tracker::{Shutdown, StaticAssets, TrackerServer};

#[derive(Parser)]
#[command(name = "pixel-tracker")]
#[command(about = "Tracking pixel service with anonymous identifier cookies", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_or_default(cli.config.as_deref())?;
    logging::init_logging(&config.observability.log_level);

    tracing::info!("pixel-tracker v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        redirect_origin = %config.redirect.origin,
        cookie_ttl_days = config.cookies.ttl_days,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // The service must not start without both payloads
    let assets = StaticAssets::load(&config.assets)?;

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = TrackerServer::new(config, assets);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
