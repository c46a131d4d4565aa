//! # errchain
//!
//! Chainable error values with deterministic encodings.
//!
//! ## Model
//!
//! - **Error**: one link of a chain, carrying a message, a kind, a location
//!   and an owned cause
//! - **Kind**: integer classification, `0` means unclassified
//! - **Location**: opaque `"<file>:<line>"` token, captured with [`here!`]
//!   or [`Location::here`]
//!
//! ## Usage
//!
//! ```rust
//! use errchain::{chain, here, is_kind, Error, Kind};
//!
//! const NOT_FOUND: Kind = Kind::new(1);
//! const LOAD_FAILED: Kind = Kind::new(2);
//!
//! fn load() -> Result<(), Error> {
//!     let root = chain!(NOT_FOUND, here!(), "user 42 not found");
//!     Err(chain!(LOAD_FAILED, here!(), "load profile", root))
//! }
//!
//! let err = load().unwrap_err();
//! assert!(is_kind(&err, NOT_FOUND));
//!
//! let bytes = err.to_bytes();
//! assert_eq!(Error::from_bytes(&bytes), err);
//! ```
//!
//! ## Encodings
//!
//! - `Display`: one node per line, `"@ <location>; <message>"`
//! - [`codec::dsv`]: write-only text with ASCII separator bytes
//! - [`codec::binary`]: length-prefixed binary form, decoded leniently
//! - [`codec::json`]: nested JSON objects

mod builder;
pub mod codec;
mod error;
mod kind;
mod location;
mod lookup;
mod plain;

pub use builder::{BuildError, BuildErrorKind, Builder, Part};
pub use error::{Chain, Error};
pub use kind::Kind;
pub use location::Location;
pub use lookup::{has, is_kind};
pub use plain::Str;

/// Result type alias using the chain Error
pub type Result<T> = std::result::Result<T, Error>;

/// Build a chain node from one or more parts.
///
/// Each argument converts into a [`Part`]: strings set the message, a
/// [`Kind`] sets the kind, a [`Location`] sets the location and an
/// [`Error`] becomes the cause. A single `Error` argument is returned as-is.
/// Calling the macro without arguments does not compile.
///
/// ```rust
/// use errchain::{chain, Kind};
///
/// let root = chain!("disk full");
/// let err = chain!(Kind::new(7), "flush failed", root.clone());
/// assert_eq!(err.cause(), Some(&root));
/// assert_eq!(chain!(root.clone()), root);
/// ```
#[macro_export]
macro_rules! chain {
    ($first:expr $(, $rest:expr)* $(,)?) => {
        $crate::Error::assemble(
            $crate::Part::from($first),
            ::std::vec![$($crate::Part::from($rest)),*],
        )
    };
}

/// Capture the current source position as a [`Location`].
#[macro_export]
macro_rules! here {
    () => {
        $crate::Location::at(::core::file!(), ::core::line!())
    };
}

/// Build a message-only chain node from a format string.
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)*) => {
        $crate::Error::msg(::std::format!($($arg)*))
    };
}
