//! Minimal errors for callers that do not need a chain.

use std::borrow::Cow;
use std::fmt;

/// A bare message error with no kind, location or cause.
///
/// Useful for sentinel values:
///
/// ```rust
/// use errchain::{chain, Str};
///
/// const CLOSED: Str = Str::from_static("connection closed");
///
/// let err = chain!("send failed", errchain::Part::foreign(&CLOSED));
/// assert_eq!(err.cause().map(|c| c.message()), Some("connection closed"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Str(Cow<'static, str>);

impl Str {
    pub fn new(text: impl Into<Cow<'static, str>>) -> Self {
        Self(text.into())
    }

    pub const fn from_static(text: &'static str) -> Self {
        Self(Cow::Borrowed(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Str {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Str {}
