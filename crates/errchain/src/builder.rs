//! Assembling chain nodes from optional parts.

use crate::{Error, Kind, Location};
use std::fmt;
use strum::{Display, IntoStaticStr};

/// One typed input to the chain constructor.
///
/// Each variant fills the matching field of the node being built. Plain
/// values convert with `From`, so `chain!` accepts them directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Message(String),
    Kind(Kind),
    Location(Location),
    Cause(Error),
}

impl Part {
    /// A cause taken from any error value, see [`Error::wrap`].
    pub fn foreign(err: &(dyn std::error::Error + 'static)) -> Self {
        Part::Cause(Error::wrap(err))
    }
}

impl From<&str> for Part {
    fn from(message: &str) -> Self {
        Part::Message(message.to_string())
    }
}

impl From<String> for Part {
    fn from(message: String) -> Self {
        Part::Message(message)
    }
}

impl From<Kind> for Part {
    fn from(kind: Kind) -> Self {
        Part::Kind(kind)
    }
}

impl From<Location> for Part {
    fn from(location: Location) -> Self {
        Part::Location(location)
    }
}

impl From<Error> for Part {
    fn from(cause: Error) -> Self {
        Part::Cause(cause)
    }
}

impl From<std::io::Error> for Part {
    fn from(err: std::io::Error) -> Self {
        Part::Cause(err.into())
    }
}

/// Builder for a chain node.
///
/// Every field is optional; when a field is supplied more than once the last
/// value wins. A builder that received only a cause returns that cause as-is
/// instead of wrapping it in an empty layer.
///
/// ```rust
/// use errchain::{Error, Kind};
///
/// let root = Error::msg("disk full");
/// let err = Error::builder()
///     .kind(Kind::new(5))
///     .here()
///     .message("flush failed")
///     .cause(root)
///     .build()
///     .unwrap();
///
/// assert_eq!(err.depth(), 2);
/// assert!(Error::builder().build().is_err());
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    message: Option<String>,
    kind: Option<Kind>,
    location: Option<Location>,
    cause: Option<Error>,
    parts: usize,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self.parts += 1;
        self
    }

    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = Some(kind);
        self.parts += 1;
        self
    }

    pub fn location(mut self, location: impl Into<Location>) -> Self {
        self.location = Some(location.into());
        self.parts += 1;
        self
    }

    /// Set the location to the caller's position.
    #[track_caller]
    pub fn here(self) -> Self {
        self.location(Location::here())
    }

    pub fn cause(mut self, cause: Error) -> Self {
        self.cause = Some(cause);
        self.parts += 1;
        self
    }

    /// Set the cause from any error value, see [`Error::wrap`].
    pub fn foreign_cause(self, err: &(dyn std::error::Error + 'static)) -> Self {
        self.cause(Error::wrap(err))
    }

    /// Apply one typed part.
    pub fn part(self, part: impl Into<Part>) -> Self {
        match part.into() {
            Part::Message(message) => self.message(message),
            Part::Kind(kind) => self.kind(kind),
            Part::Location(location) => self.location(location),
            Part::Cause(cause) => self.cause(cause),
        }
    }

    /// Finish the node.
    ///
    /// Fails with [`BuildErrorKind::NoParts`] when nothing was supplied. That
    /// is a programming error at the call site; callers that cannot continue
    /// after it should `expect()` the result rather than propagate it.
    pub fn build(self) -> Result<Error, BuildError> {
        if self.parts == 0 {
            return Err(BuildError::new(BuildErrorKind::NoParts));
        }
        Ok(self.finish())
    }

    fn finish(self) -> Error {
        let only_cause = self.parts == 1
            && self.message.is_none()
            && self.kind.is_none()
            && self.location.is_none();
        match self.cause {
            Some(cause) if only_cause => {
                tracing::trace!("single cause passed through unchanged");
                cause
            }
            cause => Error::from_link(
                self.message.unwrap_or_default(),
                self.kind.unwrap_or_default(),
                self.location.unwrap_or_default(),
                cause,
            ),
        }
    }
}

impl Error {
    /// Build a node from a list of typed parts.
    ///
    /// ```rust
    /// use errchain::{Error, Kind, Part};
    ///
    /// let err = Error::from_parts([Part::from("timeout"), Part::from(Kind::new(3))]).unwrap();
    /// assert_eq!(err.message(), "timeout");
    ///
    /// let same = Error::from_parts([Part::from(err.clone())]).unwrap();
    /// assert_eq!(same, err);
    /// ```
    pub fn from_parts<I>(parts: I) -> Result<Error, BuildError>
    where
        I: IntoIterator<Item = Part>,
    {
        parts
            .into_iter()
            .fold(Builder::new(), |builder, part| builder.part(part))
            .build()
    }

    /// Build a node from at least one part; used by [`chain!`](crate::chain).
    #[doc(hidden)]
    pub fn assemble(first: Part, rest: Vec<Part>) -> Error {
        rest.into_iter()
            .fold(Builder::new().part(first), |builder, part| builder.part(part))
            .finish()
    }
}

/// The kind of construction failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum BuildErrorKind {
    /// The constructor was called without any part
    NoParts,
}

/// Returned when a chain node cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildError {
    kind: BuildErrorKind,
}

impl BuildError {
    fn new(kind: BuildErrorKind) -> Self {
        Self { kind }
    }

    /// Get the error kind.
    pub fn kind(&self) -> BuildErrorKind {
        self.kind
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            BuildErrorKind::NoParts => write!(f, "{} => chain node built without any part", self.kind),
        }
    }
}

impl std::error::Error for BuildError {}
