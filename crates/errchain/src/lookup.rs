//! Kind lookups over arbitrary error values.
//!
//! Both functions accept any `dyn std::error::Error`. Values that are not
//! chain nodes never match a kind.

use crate::{Error, Kind};

/// Check whether any node of the chain carries `kind`.
///
/// ```rust
/// use errchain::{chain, is_kind, Kind};
///
/// let err = chain!("outer", chain!(Kind::new(4), "inner"));
/// assert!(is_kind(&err, Kind::new(4)));
/// assert!(!is_kind(&std::io::Error::other("plain"), Kind::new(4)));
/// ```
pub fn is_kind(err: &(dyn std::error::Error + 'static), kind: Kind) -> bool {
    has(err, kind).is_some()
}

/// Find the outermost node carrying `kind`.
pub fn has<'a>(err: &'a (dyn std::error::Error + 'static), kind: Kind) -> Option<&'a Error> {
    err.downcast_ref::<Error>()?.find(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain;

    const FINE: Kind = Kind::new(2);
    const BAD: Kind = Kind::new(3);
    const WORSE: Kind = Kind::new(4);
    const WORST: Kind = Kind::new(5);

    #[test]
    fn test_has_walks_to_root() {
        let worst = chain!(WORST);
        let worse = chain!(WORSE, worst.clone());
        let bad = chain!(BAD, worse);

        assert_eq!(has(&bad, WORST), Some(&worst));
        assert!(has(&bad, FINE).is_none());
        assert!(is_kind(&bad, BAD));
        assert!(is_kind(&bad, WORST));
        assert!(!is_kind(&bad, FINE));
    }

    fn outermost_message<'a>(
        err: &'a (dyn std::error::Error + 'static),
        kind: Kind,
    ) -> Option<&'a str> {
        has(err, kind).map(Error::message)
    }

    #[test]
    fn test_has_borrows_from_input() {
        let err = chain!(BAD, "outer", chain!(WORSE, "inner"));
        let found = outermost_message(&err, WORSE);
        assert_eq!(found, Some("inner"));
        assert_eq!(outermost_message(&err, FINE), None);
    }

    #[test]
    fn test_boxed_errors() {
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(chain!(BAD, "boxed"));
        assert!(is_kind(boxed.as_ref(), BAD));

        let foreign: Box<dyn std::error::Error + Send + Sync> = Box::new(std::io::Error::other("x"));
        assert!(!is_kind(foreign.as_ref(), Kind::UNCLASSIFIED));
        assert!(has(foreign.as_ref(), Kind::UNCLASSIFIED).is_none());
    }
}
