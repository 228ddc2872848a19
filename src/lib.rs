//! Anonymous identifier tracking service.
//!
//! Serves a tracking pixel and favicon that carry long-lived identifier
//! cookies scoped to the requesting apex domain, and redirects all other
//! traffic to a canonical site.

pub mod assets;
pub mod config;
pub mod cookies;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use assets::StaticAssets;
pub use config::TrackerConfig;
pub use cookies::{scope_domain, Reconciler};
pub use http::TrackerServer;
pub use lifecycle::Shutdown;
