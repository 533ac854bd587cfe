//! Inventory [`Filter`] form and its query string representation.
//!
//! Storefront URLs carry the browsing state, so that every page of a
//! filtered listing is linkable: facets as repeated `{facet}={value}` pairs,
//! ranges as `{range}Min`/`{range}Max` pairs.

use askama::Template;
use common::{pagination::Arguments, Kind as _};
use rust_decimal::Decimal;
use service::{
    domain::{
        filter::{Facet, FacetKind, RangeKey},
        Filter,
    },
    read::diamond::list::{self, Selector, Sort, SortBy, SortOrder},
};
use url::form_urlencoded;

use super::Choice;

/// Suffix of the lower bound of a range parameter.
const MIN: &str = "Min";

/// Suffix of the upper bound of a range parameter.
const MAX: &str = "Max";

/// Parses a [`Selector`] from the provided query string `pairs`.
///
/// Unknown keys and invalid values are ignored, and pagination falls back to
/// the first page of the provided `limit`.
#[must_use]
pub fn parse(pairs: &[(String, String)], limit: u32) -> Selector {
    let mut filter = Filter::default();
    let (mut page, mut limit) = (1, limit);
    let (mut sort_by, mut sort_order) = (None, None);

    for (key, value) in pairs {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.as_str() {
            "page" => page = value.parse().unwrap_or(page),
            "limit" => limit = value.parse().unwrap_or(limit),
            "sortBy" => sort_by = Some(value),
            "sortOrder" => sort_order = Some(value),
            key => {
                if let Ok(kind) = key.parse::<FacetKind>() {
                    if let Some(facet) = Facet::parse(kind, value) {
                        if !filter.is_selected(facet) {
                            filter.toggle(facet);
                        }
                    }
                } else if let Some((range, is_min)) = range_param(key) {
                    if let Ok(n) = value.parse::<Decimal>() {
                        let mut bounds = filter.range(range);
                        if is_min {
                            bounds.min = n;
                        } else {
                            bounds.max = n;
                        }
                        filter.set_range(range, bounds);
                    }
                }
            }
        }
    }

    Selector {
        filter,
        arguments: Arguments::new(page, limit),
        sort: sort_by.and_then(|by| Sort::parse(by, sort_order)),
    }
}

/// Splits the provided range parameter `key` into its [`RangeKey`] and
/// whether it's the lower bound.
fn range_param(key: &str) -> Option<(RangeKey, bool)> {
    if let Some(range) = key.strip_suffix(MIN) {
        return Some((range.parse().ok()?, true));
    }
    let range = key.strip_suffix(MAX)?;
    Some((range.parse().ok()?, false))
}

/// Encodes the provided [`Selector`] into a query string, omitting the
/// defaults.
#[must_use]
pub fn query(selector: &Selector) -> String {
    let Selector {
        filter,
        arguments,
        sort,
    } = selector;

    let mut q = form_urlencoded::Serializer::new(String::new());
    for kind in FacetKind::ALL {
        for value in filter.values(*kind) {
            _ = q.append_pair(kind.as_str(), value);
        }
    }
    for key in RangeKey::ALL {
        let range = filter.range(*key);
        if range != key.default_range() {
            let (min, max) = (range.min.normalize(), range.max.normalize());
            _ = q.append_pair(&format!("{key}{MIN}"), &min.to_string());
            _ = q.append_pair(&format!("{key}{MAX}"), &max.to_string());
        }
    }
    if let Some(Sort { by, order }) = sort {
        _ = q.append_pair("sortBy", by.as_str());
        _ = q.append_pair("sortOrder", order.as_str());
    }
    _ = q.append_pair("page", &arguments.page.to_string());
    _ = q.append_pair("limit", &arguments.limit.to_string());
    q.finish()
}

/// Returns a copy of the provided [`Selector`] navigated to the provided
/// pagination [`Arguments`].
#[must_use]
pub fn with_arguments(selector: &Selector, arguments: Arguments) -> Selector {
    Selector {
        arguments,
        ..selector.clone()
    }
}

/// Returns the human readable label of a [`FacetKind`].
const fn facet_label(kind: FacetKind) -> &'static str {
    match kind {
        FacetKind::Shape => "Shape",
        FacetKind::Color => "Color",
        FacetKind::Clarity => "Clarity",
        FacetKind::Cut => "Cut",
        FacetKind::Polish => "Polish",
        FacetKind::Symmetry => "Symmetry",
        FacetKind::Fluorescence => "Fluorescence",
        FacetKind::Lab => "Lab",
    }
}

/// Returns the human readable label of a [`RangeKey`].
const fn range_label(key: RangeKey) -> &'static str {
    match key {
        RangeKey::Carat => "Carat",
        RangeKey::Price => "Price, $",
        RangeKey::Length => "Length, mm",
        RangeKey::Width => "Width, mm",
        RangeKey::Depth => "Depth, mm",
        RangeKey::DepthPercent => "Depth %",
        RangeKey::TablePercent => "Table %",
    }
}

/// [`Filter`] form of the inventory pages.
///
/// The form is also driven by the live filtering socket, if any.
#[derive(Debug, Template)]
#[template(path = "components/filter.html")]
pub struct FilterForm {
    /// URL the form is submitted to.
    action: &'static str,

    /// URL of the live filtering socket, if any.
    live: Option<String>,

    /// Checkbox groups of the facets.
    facets: Vec<FacetGroup>,

    /// Numeric inputs of the ranges.
    ranges: Vec<RangeInputs>,

    /// Options of the sorting field.
    sort_by: Vec<Choice>,

    /// Options of the sorting direction.
    sort_order: Vec<Choice>,

    /// Page size kept across the submissions.
    limit: u32,
}

/// Checkbox group of a [`FacetKind`].
#[derive(Debug)]
struct FacetGroup {
    /// Name of the submitted field.
    name: &'static str,

    /// Human readable label.
    label: &'static str,

    /// Checkboxes of the [`Facet`] values.
    options: Vec<Choice>,
}

/// Pair of numeric inputs of a [`RangeKey`].
#[derive(Debug)]
struct RangeInputs {
    /// Human readable label.
    label: &'static str,

    /// Lower bound.
    min: Bound,

    /// Upper bound.
    max: Bound,
}

/// Numeric input of a range bound.
#[derive(Debug)]
struct Bound {
    /// Name of the submitted field.
    name: String,

    /// Current value.
    value: String,
}

impl FilterForm {
    /// Creates a new [`FilterForm`] reflecting the provided [`Selector`] and
    /// submitting to the provided `action`.
    #[must_use]
    pub fn new(
        selector: &Selector,
        action: &'static str,
        live: Option<String>,
    ) -> Self {
        let Selector {
            filter,
            arguments,
            sort,
        } = selector;

        let facets = FacetKind::ALL
            .iter()
            .map(|kind| FacetGroup {
                name: kind.as_str(),
                label: facet_label(*kind),
                options: Facet::options(*kind)
                    .into_iter()
                    .map(|facet| Choice {
                        value: facet.as_str(),
                        label: facet.as_str(),
                        selected: filter.is_selected(facet),
                    })
                    .collect(),
            })
            .collect();

        let ranges = RangeKey::ALL
            .iter()
            .map(|key| {
                let range = filter.range(*key);
                let bound = |suffix, value: Decimal| Bound {
                    name: format!("{key}{suffix}"),
                    value: value.normalize().to_string(),
                };
                RangeInputs {
                    label: range_label(*key),
                    min: bound(MIN, range.min),
                    max: bound(MAX, range.max),
                }
            })
            .collect();

        let sort_by = SortBy::ALL
            .iter()
            .map(|by| Choice {
                value: by.as_str(),
                label: list::label(*by),
                selected: sort.is_some_and(|s| s.by == *by),
            })
            .collect();
        let sort_order = SortOrder::ALL
            .iter()
            .map(|order| Choice {
                value: order.as_str(),
                label: match order {
                    SortOrder::Asc => "Ascending",
                    SortOrder::Desc => "Descending",
                },
                selected: sort.is_some_and(|s| s.order == *order),
            })
            .collect();

        Self {
            action,
            live,
            facets,
            ranges,
            sort_by,
            sort_order,
            limit: arguments.limit,
        }
    }
}
