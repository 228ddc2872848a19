//! Static payloads served on tracked routes.
//!
//! Both files are read once at startup and shared read-only for the
//! process lifetime. A missing payload is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use thiserror::Error;

use crate::config::AssetConfig;

/// Failure to read a static payload.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("asset {0} is empty")]
    Empty(PathBuf),
}

/// The tracking pixel and favicon, byte-exact as loaded.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    pixel: Bytes,
    favicon: Bytes,
}

impl StaticAssets {
    /// Read both payloads from the configured paths.
    pub fn load(config: &AssetConfig) -> Result<Self, AssetError> {
        let pixel = read_asset(Path::new(&config.pixel_path))?;
        let favicon = read_asset(Path::new(&config.favicon_path))?;

        tracing::info!(
            pixel_path = %config.pixel_path,
            pixel_bytes = pixel.len(),
            favicon_path = %config.favicon_path,
            favicon_bytes = favicon.len(),
            "Static assets loaded"
        );

        Ok(Self { pixel, favicon })
    }

    /// Build from in-memory payloads.
    pub fn from_bytes(pixel: impl Into<Bytes>, favicon: impl Into<Bytes>) -> Self {
        Self {
            pixel: pixel.into(),
            favicon: favicon.into(),
        }
    }

    pub fn pixel(&self) -> Bytes {
        self.pixel.clone()
    }

    pub fn favicon(&self) -> Bytes {
        self.favicon.clone()
    }
}

fn read_asset(path: &Path) -> Result<Bytes, AssetError> {
    let bytes = fs::read(path).map_err(|source| AssetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(AssetError::Empty(path.to_path_buf()));
    }
    Ok(Bytes::from(bytes))
}
