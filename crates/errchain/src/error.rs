//! The chain node type.

use crate::codec::display::{DISPLAY_SEPARATOR, LOG_SEPARATOR, Rendered};
use crate::codec::{binary, dsv};
use crate::{Builder, Kind, Location};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One link of an error chain.
///
/// A node carries a message, a [`Kind`], a [`Location`] and an optionally
/// owned cause. Chains are built bottom-up (a node can only take an already
/// finished node as its cause), so they never contain cycles.
///
/// Walking, comparing, cloning and dropping a chain are all done with loops,
/// so arbitrarily deep chains (for example decoded from untrusted bytes) do
/// not exhaust the stack.
///
/// # Example
///
/// ```rust
/// use errchain::{chain, Kind, Location};
///
/// const BAD: Kind = Kind::new(1);
/// const WORSE: Kind = Kind::new(2);
///
/// let root = chain!(BAD, Location::new("db.rs:10"), "connection refused");
/// let err = chain!(WORSE, Location::new("api.rs:42"), "load user", root);
///
/// assert_eq!(err.depth(), 2);
/// assert!(err.is_kind(BAD));
/// assert_eq!(err.to_string(), "@ api.rs:42; load user\n\t@ db.rs:10; connection refused");
/// ```
#[derive(Default, Serialize, Deserialize)]
pub struct Error {
    #[serde(rename = "error", default, skip_serializing_if = "String::is_empty")]
    pub(crate) message: String,
    #[serde(default, skip_serializing_if = "Kind::is_unclassified")]
    pub(crate) kind: Kind,
    #[serde(default, skip_serializing_if = "Location::is_empty")]
    pub(crate) location: Location,
    #[serde(rename = "previous", default, skip_serializing_if = "Option::is_none")]
    pub(crate) cause: Option<Box<Error>>,
}

impl Error {
    /// Create a root node with the given kind and message.
    pub fn new(kind: Kind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            location: Location::default(),
            cause: None,
        }
    }

    /// Create a root node carrying only a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(Kind::UNCLASSIFIED, message)
    }

    /// Start building a node from optional parts.
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub(crate) fn from_link(
        message: String,
        kind: Kind,
        location: Location,
        cause: Option<Error>,
    ) -> Self {
        Self {
            message,
            kind,
            location,
            cause: cause.map(Box::new),
        }
    }

    /// Normalize any error into a chain node.
    ///
    /// A node from this crate is cloned with its whole chain. Anything else
    /// keeps only its rendered text, with no kind, location or cause.
    pub fn wrap(err: &(dyn std::error::Error + 'static)) -> Self {
        match err.downcast_ref::<Error>() {
            Some(node) => node.clone(),
            None => Self::msg(err.to_string()),
        }
    }

    /// Get the message of this node
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the kind of this node
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Get the location of this node
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Get the direct cause, `None` for the root cause.
    pub fn cause(&self) -> Option<&Error> {
        self.cause.as_deref()
    }

    /// Detach and return the cause.
    pub fn into_cause(mut self) -> Option<Error> {
        self.cause.take().map(|cause| *cause)
    }

    /// Iterate over this node and all of its causes, outermost first.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Number of nodes in the chain, this one included.
    pub fn depth(&self) -> usize {
        self.chain().count()
    }

    /// The innermost node of the chain.
    pub fn root_cause(&self) -> &Error {
        let mut node = self;
        while let Some(cause) = node.cause() {
            node = cause;
        }
        node
    }

    /// Check whether any node in the chain carries `kind`.
    pub fn is_kind(&self, kind: Kind) -> bool {
        self.find(kind).is_some()
    }

    /// Find the outermost node carrying `kind`.
    pub fn find(&self, kind: Kind) -> Option<&Error> {
        self.chain().find(|node| node.kind == kind)
    }

    /// Render the chain with a custom separator between nodes.
    pub fn render<'a>(&'a self, separator: &'a str) -> Rendered<'a> {
        Rendered::new(self, separator)
    }

    /// Render the chain on a single line, for log output.
    pub fn log_line(&self) -> Rendered<'_> {
        Rendered::new(self, LOG_SEPARATOR)
    }

    /// Encode the chain in the binary wire format.
    pub fn to_bytes(&self) -> Vec<u8> {
        binary::encode(self)
    }

    /// Decode a chain from the binary wire format.
    ///
    /// Malformed input never fails: problems are logged and the affected
    /// fields are left empty.
    pub fn from_bytes(buf: &[u8]) -> Self {
        binary::decode(buf)
    }

    /// Replace this node with the chain decoded from `buf`.
    pub fn unserialize(&mut self, buf: &[u8]) {
        *self = binary::decode(buf);
    }

    /// Encode the chain in the delimiter-separated text form.
    pub fn to_dsv(&self) -> String {
        dsv::encode(self)
    }

    fn same_link(&self, other: &Error) -> bool {
        self.kind == other.kind && self.location == other.location && self.message == other.message
    }
}

/// Iterator over the nodes of a chain, outermost first.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a Error>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.cause();
        Some(node)
    }
}

impl std::iter::FusedIterator for Chain<'_> {}

impl Clone for Error {
    fn clone(&self) -> Self {
        let links: Vec<&Error> = self.chain().collect();
        let mut cause = None;
        for node in links.into_iter().rev() {
            cause = Some(Error::from_link(
                node.message.clone(),
                node.kind,
                node.location.clone(),
                cause,
            ));
        }
        cause.unwrap_or_default()
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        let mut lhs = self.chain();
        let mut rhs = other.chain();
        loop {
            match (lhs.next(), rhs.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if a.same_link(b) => continue,
                _ => return false,
            }
        }
    }
}

impl Eq for Error {}

impl Drop for Error {
    fn drop(&mut self) {
        let mut next = self.cause.take();
        while let Some(mut node) = next {
            next = node.cause.take();
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Rendered::new(self, DISPLAY_SEPARATOR), f)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Link<'a>(&'a Error);

        impl fmt::Debug for Link<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct("Link")
                    .field("kind", &self.0.kind.code())
                    .field("location", &self.0.location.as_str())
                    .field("message", &self.0.message)
                    .finish()
            }
        }

        f.debug_list().entries(self.chain().map(Link)).finish()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::msg(err.to_string())
    }
}
