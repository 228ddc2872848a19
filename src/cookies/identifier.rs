//! Anonymous identifiers carried in cookies.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

/// Reasons a cookie value is not a usable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The cookie value was empty.
    #[error("identifier is empty")]
    Empty,

    /// The cookie value is not UUID text in any accepted form.
    #[error("invalid identifier: {0}")]
    Malformed(String),
}

/// A 128-bit anonymous identifier.
///
/// Parsing accepts every textual UUID form (simple, hyphenated, braced,
/// urn) so cookies written by older deployments stay valid. Output is
/// always the 32-character lowercase hex form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier(Uuid);

impl Identifier {
    /// Mint a fresh random (version 4) identifier.
    pub fn mint() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a raw cookie value.
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(IdentifierError::Empty);
        }

        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|e| IdentifierError::Malformed(e.to_string()))
    }

    /// The cookie representation: 32 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        self.0.simple().to_string()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl From<Uuid> for Identifier {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
