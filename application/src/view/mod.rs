//! Server-side rendered components.

pub mod cell;
pub mod comparison;
pub mod filter;
pub mod listing;
pub mod pagination;
pub mod table;

pub use self::{
    cell::Cell,
    comparison::{Comparison, Criterion},
    filter::FilterForm,
    pagination::Navigation,
    table::{Column, Row, Selection, Table},
};

/// Option of a choice control: a checkbox or an option of a `<select>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Choice {
    /// Submitted value.
    pub value: &'static str,

    /// Human readable label.
    pub label: &'static str,

    /// Indicator whether this [`Choice`] is selected.
    pub selected: bool,
}
