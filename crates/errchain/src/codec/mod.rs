//! Encodings of an error chain.
//!
//! - [`display`]: human-readable text, one node per line
//! - [`dsv`]: write-only delimiter-separated text
//! - [`binary`]: length-prefixed binary form with a lossless decoder
//! - [`json`]: JSON object nested through a `previous` key
//!
//! All encoders walk the chain with a loop, outermost node first.

pub mod binary;
pub mod display;
pub mod dsv;
pub mod json;
pub mod varint;

pub use binary::{DecodeError, DecodeErrorKind, DecodeOption, Field};
pub use display::{DISPLAY_SEPARATOR, LOG_SEPARATOR, Rendered};
pub use dsv::{RECORD_SEPARATOR, UNIT_SEPARATOR};
