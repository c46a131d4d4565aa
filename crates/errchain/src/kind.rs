//! Error kinds for chain nodes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification code attached to a chain node.
///
/// Kinds are plain integers so that callers can define their own taxonomy
/// with constants:
///
/// ```rust
/// use errchain::Kind;
///
/// const NOT_FOUND: Kind = Kind::new(1);
/// const TIMEOUT: Kind = Kind::new(2);
///
/// assert_ne!(NOT_FOUND, TIMEOUT);
/// assert!(Kind::UNCLASSIFIED.is_unclassified());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kind(i64);

impl Kind {
    /// The zero kind, carried by nodes nobody classified.
    pub const UNCLASSIFIED: Kind = Kind(0);

    pub const fn new(code: i64) -> Self {
        Self(code)
    }

    /// Get the raw code
    pub const fn code(self) -> i64 {
        self.0
    }

    pub const fn is_unclassified(&self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for Kind {
    fn from(code: i64) -> Self {
        Self(code)
    }
}

impl From<Kind> for i64 {
    fn from(kind: Kind) -> Self {
        kind.0
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
