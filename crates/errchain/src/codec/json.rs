//! JSON form of a chain.
//!
//! A node is an object with the keys `error`, `kind`, `location` and
//! `previous` (the cause), each omitted when empty, zero or absent.
//! Nesting follows the chain, so both directions are limited to
//! [`MAX_JSON_DEPTH`] nodes: writers refuse deeper chains and `serde_json`'s
//! recursion limit rejects deeper input.

use crate::Error;
use serde::ser::Error as _;

/// Deepest chain accepted by the JSON form.
///
/// Stays below `serde_json`'s recursion limit of 128 so everything written
/// can be read back.
pub const MAX_JSON_DEPTH: usize = 100;

pub fn to_string(err: &Error) -> serde_json::Result<String> {
    check_depth(err)?;
    serde_json::to_string(err)
}

pub fn to_string_pretty(err: &Error) -> serde_json::Result<String> {
    check_depth(err)?;
    serde_json::to_string_pretty(err)
}

pub fn from_str(text: &str) -> serde_json::Result<Error> {
    serde_json::from_str(text)
}

fn check_depth(err: &Error) -> serde_json::Result<()> {
    let depth = err.chain().take(MAX_JSON_DEPTH + 1).count();
    if depth > MAX_JSON_DEPTH {
        tracing::debug!("refusing JSON for chain deeper than {}", MAX_JSON_DEPTH);
        return Err(serde_json::Error::custom(format!(
            "chain deeper than {} links cannot be written as JSON",
            MAX_JSON_DEPTH
        )));
    }
    Ok(())
}
