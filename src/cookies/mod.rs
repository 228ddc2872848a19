//! Anonymous identifier cookie subsystem.
//!
//! # Data Flow
//! ```text
//! Host header
//!     → domain.rs (scope domain: ".apex.tld")
//! Cookie header (aguid, myguid)
//!     → identifier.rs (parse UUID text or mint a new v4)
//!     → reconcile.rs (decide mint / refresh / clear per role)
//!     → directive.rs (typed Set-Cookie directives)
//!     → HTTP layer renders them as response headers
//! ```
//!
//! # Design Decisions
//! - Pure and stateless: the cookie itself is the only persistence
//! - Malformed cookies are never errors; they are minted over or cleared
//! - Directives are typed values, never re-parsed from header text

pub mod directive;
pub mod domain;
pub mod identifier;
pub mod reconcile;

pub use directive::{CookieDirective, DirectiveKind};
pub use domain::scope_domain;
pub use identifier::{Identifier, IdentifierError};
pub use reconcile::{IdentifierOutcome, Reconciler, Reconciliation, P3P_POLICY};
