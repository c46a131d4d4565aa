//! Source locations attached to chain nodes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque source position token, conventionally `"<file>:<line>"`.
///
/// Nothing in this crate parses a location back into its parts; it is
/// rendered and serialized as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Capture the caller's position as `"<file name>:<line>"`.
    ///
    /// Only the last path component of the file is kept.
    #[track_caller]
    pub fn here() -> Self {
        let caller = std::panic::Location::caller();
        Self::at(caller.file(), caller.line())
    }

    /// Build a location from a file path and line, keeping the file name only.
    pub fn at(file: &str, line: u32) -> Self {
        let name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        Self(format!("{}:{}", name, line))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for Location {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Location {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl AsRef<str> for Location {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
