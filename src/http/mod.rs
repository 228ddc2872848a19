//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, route dispatch)
//!     → /pixel.gif, /favicon.ico:
//!         request.rs (host, cookies, user agent)
//!         → cookies::Reconciler (identifier decisions)
//!         → response.rs (Set-Cookie, P3P, diagnostics, payload)
//!     → anything else:
//!         response.rs (301 to the canonical origin)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use server::{AppState, TrackerServer};
