//! Side-by-side [`Comparison`] of entities.

use askama::Template;
use derive_more::Debug;

use super::Cell;

/// Placeholder shown for missing data.
pub const MISSING: &str = "-";

/// Compared aspect of an entity.
#[derive(Debug)]
pub struct Criterion<'a, T> {
    /// Label of this [`Criterion`].
    pub label: &'static str,

    /// Accessor of the value, returning [`None`] if the data is missing.
    #[debug(skip)]
    accessor: Box<dyn Fn(&T) -> Option<String> + Send + Sync + 'a>,
}

impl<'a, T> Criterion<'a, T> {
    /// Creates a new [`Criterion`].
    #[must_use]
    pub fn new(
        label: &'static str,
        accessor: impl Fn(&T) -> Option<String> + Send + Sync + 'a,
    ) -> Self {
        Self {
            label,
            accessor: Box::new(accessor),
        }
    }

    /// Returns the value of this [`Criterion`] for the provided `item`, or
    /// the [`MISSING`] placeholder.
    #[must_use]
    pub fn value(&self, item: &T) -> String {
        (self.accessor)(item).unwrap_or_else(|| MISSING.to_owned())
    }
}

/// Comparison of entities along an ordered list of [`Criterion`]s.
///
/// Rendered transposed: one row per [`Criterion`] and one column per entity.
#[derive(Debug, Template)]
#[template(path = "components/comparison.html")]
pub struct Comparison<'a, T> {
    /// Ordered [`Criterion`]s.
    criteria: Vec<Criterion<'a, T>>,

    /// Compared entities.
    #[debug(skip)]
    items: &'a [T],

    /// Renderer of the heading of an entity column.
    #[debug(skip)]
    heading: Box<dyn Fn(&T) -> Cell + Send + Sync + 'a>,
}

impl<'a, T> Comparison<'a, T> {
    /// Creates a new [`Comparison`] of the provided `items`, heading the
    /// entity columns with the provided `heading`.
    #[must_use]
    pub fn new(
        criteria: Vec<Criterion<'a, T>>,
        items: &'a [T],
        heading: impl Fn(&T) -> Cell + Send + Sync + 'a,
    ) -> Self {
        Self {
            criteria,
            items,
            heading: Box::new(heading),
        }
    }

    /// Returns the headings of the entity columns.
    #[must_use]
    pub fn headings(&self) -> Vec<Cell> {
        self.items.iter().map(|i| (self.heading)(i)).collect()
    }

    /// Returns the rows of this [`Comparison`]: a label followed by the
    /// value of every entity.
    #[must_use]
    pub fn rows(&self) -> Vec<(&'static str, Vec<String>)> {
        self.criteria
            .iter()
            .map(|c| (c.label, self.items.iter().map(|i| c.value(i)).collect()))
            .collect()
    }
}
