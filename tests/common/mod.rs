//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::time::Duration;

use pixel_tracker::config::{AssetConfig, TrackerConfig};
use pixel_tracker::{Shutdown, StaticAssets, TrackerServer};

/// Bundled assets shipped with the crate.
pub fn bundled_assets() -> AssetConfig {
    let root = env!("CARGO_MANIFEST_DIR");
    AssetConfig {
        pixel_path: format!("{root}/assets/pixel.gif"),
        favicon_path: format!("{root}/assets/favicon.ico"),
    }
}

/// Start the tracker on an ephemeral port.
///
/// Returns the bound address and the shutdown handle; keep the handle alive
/// for as long as the server should run.
pub async fn start_tracker(mut config: TrackerConfig) -> (SocketAddr, Shutdown) {
    config.assets = bundled_assets();
    let assets = StaticAssets::load(&config.assets).unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = TrackerServer::new(config, assets);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// Client that never follows redirects and ignores proxy settings.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

/// Value of the named cookie among the `Set-Cookie` headers.
#[allow(dead_code)]
pub fn set_cookie_value(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|c| {
            let pair = c.split("; ").next()?;
            let (key, value) = pair.split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}
