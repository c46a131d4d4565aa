//! Human-readable rendering of a chain.

use crate::Error;
use std::fmt;

/// Separator used by `Display`: each cause on its own indented line.
pub const DISPLAY_SEPARATOR: &str = "\n\t";

/// Separator used for single-line log output.
pub const LOG_SEPARATOR: &str = "; ";

/// A chain rendered with a chosen separator between nodes.
///
/// Each node renders as `"@ <location>; "` when it has a location, followed
/// by its message when it has one.
#[derive(Debug, Clone, Copy)]
pub struct Rendered<'a> {
    head: &'a Error,
    separator: &'a str,
}

impl<'a> Rendered<'a> {
    pub fn new(head: &'a Error, separator: &'a str) -> Self {
        Self { head, separator }
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.head.chain().enumerate() {
            if i > 0 {
                f.write_str(self.separator)?;
            }
            if !node.location().is_empty() {
                write!(f, "@ {}; ", node.location())?;
            }
            f.write_str(node.message())?;
        }
        Ok(())
    }
}
