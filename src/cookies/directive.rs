//! Typed cookie directives for the outgoing response.

use std::fmt;

use chrono::{DateTime, Utc};

/// RFC 1123 date layout used for the `expires` attribute.
const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Whether a directive stores a value or deletes the cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    Set,
    Clear,
}

/// A single `Set-Cookie` instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieDirective {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub expires: DateTime<Utc>,
    pub kind: DirectiveKind,
}

impl CookieDirective {
    /// Store `value` under `name` until `expires`.
    pub fn set(
        name: impl Into<String>,
        value: impl Into<String>,
        domain: impl Into<String>,
        expires: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: domain.into(),
            expires,
            kind: DirectiveKind::Set,
        }
    }

    /// Delete `name` from the client: empty value, expired at the epoch.
    pub fn clear(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            domain: domain.into(),
            expires: DateTime::<Utc>::UNIX_EPOCH,
            kind: DirectiveKind::Clear,
        }
    }

    pub fn is_clear(&self) -> bool {
        self.kind == DirectiveKind::Clear
    }

    /// `name=value` pair, as echoed in diagnostic headers.
    pub fn pair(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

impl fmt::Display for CookieDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}; Domain={}; expires={}; Path=/",
            self.name,
            self.value,
            self.domain,
            self.expires.format(EXPIRES_FORMAT)
        )
    }
}
