//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the tracker.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the tracking service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TrackerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Identifier cookie settings.
    pub cookies: CookieConfig,

    /// Canonical site that untracked paths redirect to.
    pub redirect: RedirectConfig,

    /// Static payload locations.
    pub assets: AssetConfig,

    /// Diagnostic response headers.
    pub diagnostics: DiagnosticsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Identifier cookie configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CookieConfig {
    /// Name of the anonymous per-browser identifier cookie.
    pub primary_name: String,

    /// Name of the caller-supplied identifier cookie.
    pub secondary_name: String,

    /// Refresh or clear the secondary cookie on tracked responses.
    pub secondary_enabled: bool,

    /// Lifetime of identifier cookies in days.
    pub ttl_days: u32,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            primary_name: "aguid".to_string(),
            secondary_name: "myguid".to_string(),
            secondary_enabled: true,
            ttl_days: 365,
        }
    }
}

/// Redirect configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectConfig {
    /// Scheme and host (no path) prepended to the original request path.
    pub origin: String,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            origin: "http://www.my.jobs".to_string(),
        }
    }
}

/// Static asset locations, read once at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Path to the 1x1 tracking GIF.
    pub pixel_path: String,

    /// Path to the favicon.
    pub favicon_path: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            pixel_path: "assets/pixel.gif".to_string(),
            favicon_path: "assets/favicon.ico".to_string(),
        }
    }
}

/// Diagnostic header configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Echo `X-User-Agent` and `X-Uri-Query` on tracked responses.
    pub echo_headers: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self { echo_headers: true }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
