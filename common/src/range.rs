//! [`Range`]-related definitions.

use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` range of a measurable value.
///
/// Order of the bounds is not enforced: a `min` greater than `max` is
/// representable, as users may type bounds in any order.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Range<T> {
    /// Lower bound of this [`Range`].
    pub min: T,

    /// Upper bound of this [`Range`].
    pub max: T,
}

impl<T> Range<T> {
    /// Creates a new [`Range`] with the provided bounds.
    #[must_use]
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

#[cfg(test)]
mod spec {
    use super::Range;

    #[test]
    fn keeps_inverted_bounds() {
        let range = Range::new(5, 2);
        assert_eq!((range.min, range.max), (5, 2));
    }
}
