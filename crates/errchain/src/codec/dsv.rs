//! Delimiter-separated text encoding.
//!
//! Each node becomes `<kind:03><US><location><US><message><RS>`, outermost
//! first. The separators are ASCII control bytes that do not appear in
//! ordinary text, so splitting on them recovers the fields as long as the
//! payload never contains them. There is no decoder for this form.

use crate::Error;
use std::fmt::Write;

/// ASCII unit separator, between the fields of one node.
pub const UNIT_SEPARATOR: char = '\x1f';

/// ASCII record separator, after each node.
pub const RECORD_SEPARATOR: char = '\x1e';

/// Encode the whole chain.
pub fn encode(err: &Error) -> String {
    let mut out = String::new();
    for node in err.chain() {
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "{:03}{}{}{}{}{}",
            node.kind().code(),
            UNIT_SEPARATOR,
            node.location(),
            UNIT_SEPARATOR,
            node.message(),
            RECORD_SEPARATOR,
        );
    }
    out
}
