//! Query parameters of the inventory listing endpoints.
//!
//! Both endpoints accept the same [`Filter`] semantics under different
//! parameter names: the list endpoint takes bracketed repeated keys
//! (`shapes[]=ROUND&shapes[]=OVAL`), while the search endpoint takes plain
//! repeated keys with its own field names (`shape=ROUND&shape=OVAL`).

use common::{pagination::Arguments, Kind as _};
use rust_decimal::Decimal;

use crate::{
    domain::{
        filter::{FacetKind, RangeKey},
        Filter,
    },
    read::diamond::list::{Endpoint, Selector},
};

/// Encodes the provided [`Selector`] into the ordered query parameters of
/// the provided [`Endpoint`].
///
/// Empty facets and ranges equal to their defaults are omitted. Range bounds
/// are emitted as is, without checking their order.
#[must_use]
pub fn encode(
    endpoint: Endpoint,
    selector: &Selector,
) -> Vec<(&'static str, String)> {
    let Selector {
        filter,
        arguments,
        sort,
    } = selector;

    let mut params = pagination(*arguments);
    push_range(&mut params, endpoint, filter, RangeKey::Carat);
    for kind in FacetKind::ALL {
        let key = facet_key(endpoint, *kind);
        params.extend(
            filter
                .values(*kind)
                .into_iter()
                .map(|v| (key, v.to_owned())),
        );
    }
    for key in RangeKey::ALL.iter().filter(|k| **k != RangeKey::Carat) {
        push_range(&mut params, endpoint, filter, *key);
    }
    if let Some(sort) = sort {
        params.push(("sortBy", sort.by.as_str().to_owned()));
        params.push(("sortOrder", sort.order.as_str().to_owned()));
    }
    params
}

/// Encodes the provided pagination [`Arguments`].
#[must_use]
pub fn pagination(arguments: Arguments) -> Vec<(&'static str, String)> {
    vec![
        ("page", arguments.page.to_string()),
        ("limit", arguments.limit.to_string()),
    ]
}

/// Pushes both bounds of the [`Range`](common::Range) identified by the
/// provided [`RangeKey`], unless it equals the default one.
fn push_range(
    params: &mut Vec<(&'static str, String)>,
    endpoint: Endpoint,
    filter: &Filter,
    key: RangeKey,
) {
    let range = filter.range(key);
    if range == key.default_range() {
        return;
    }
    let (min_key, max_key) = range_keys(endpoint, key);
    params.push((min_key, number(range.min)));
    params.push((max_key, number(range.max)));
}

/// Renders the provided number in its shortest decimal form.
fn number(n: Decimal) -> String {
    n.normalize().to_string()
}

/// Returns the parameter name of the provided [`FacetKind`].
const fn facet_key(endpoint: Endpoint, kind: FacetKind) -> &'static str {
    match (endpoint, kind) {
        (Endpoint::List, FacetKind::Shape) => "shapes[]",
        (Endpoint::List, FacetKind::Color) => "colors[]",
        (Endpoint::List, FacetKind::Clarity) => "clarities[]",
        (Endpoint::List, FacetKind::Cut) => "cuts[]",
        (Endpoint::List, FacetKind::Polish) => "polishes[]",
        (Endpoint::List, FacetKind::Symmetry) => "symmetries[]",
        (Endpoint::List, FacetKind::Fluorescence) => "fluorescences[]",
        (Endpoint::List, FacetKind::Lab) => "labs[]",
        (Endpoint::Search, FacetKind::Shape) => "shape",
        (Endpoint::Search, FacetKind::Color) => "color",
        (Endpoint::Search, FacetKind::Clarity) => "clarity",
        (Endpoint::Search, FacetKind::Cut) => "cutGrade",
        (Endpoint::Search, FacetKind::Polish) => "polish",
        (Endpoint::Search, FacetKind::Symmetry) => "symmetry",
        (Endpoint::Search, FacetKind::Fluorescence) => "fluorescenceIntensity",
        (Endpoint::Search, FacetKind::Lab) => "lab",
    }
}

/// Returns the parameter names of the bounds of the provided [`RangeKey`].
const fn range_keys(
    endpoint: Endpoint,
    key: RangeKey,
) -> (&'static str, &'static str) {
    match (endpoint, key) {
        (Endpoint::List, RangeKey::Carat) => ("minCarat", "maxCarat"),
        (Endpoint::Search, RangeKey::Carat) => ("minWeight", "maxWeight"),
        (_, RangeKey::Price) => ("minPrice", "maxPrice"),
        (_, RangeKey::Length) => ("minLength", "maxLength"),
        (_, RangeKey::Width) => ("minWidth", "maxWidth"),
        (_, RangeKey::Depth) => ("minDepth", "maxDepth"),
        (Endpoint::List, RangeKey::DepthPercent) => {
            ("minDepthPercent", "maxDepthPercent")
        }
        (Endpoint::Search, RangeKey::DepthPercent) => {
            ("minDepthPerc", "maxDepthPerc")
        }
        (Endpoint::List, RangeKey::TablePercent) => ("minTable", "maxTable"),
        (Endpoint::Search, RangeKey::TablePercent) => {
            ("minTablePerc", "maxTablePerc")
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{pagination::Arguments, Range};
    use rust_decimal::Decimal;

    use crate::{
        domain::{
            diamond::{Color, Shape},
            filter::{Facet, RangeKey, DEFAULT_CARAT},
            Filter,
        },
        read::diamond::list::{Endpoint, Selector, Sort, SortBy, SortOrder},
    };

    use super::encode;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn selector(filter: Filter) -> Selector {
        Selector {
            filter,
            ..Selector::default()
        }
    }

    fn keys(params: &[(&'static str, String)]) -> Vec<&'static str> {
        params.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn default_filter_emits_only_pagination() {
        for endpoint in [Endpoint::List, Endpoint::Search] {
            let params = encode(endpoint, &Selector::default());
            assert_eq!(
                params,
                [("page", "1".to_owned()), ("limit", "20".to_owned())],
            );
        }
    }

    #[test]
    fn default_carat_range_is_omitted() {
        let filter =
            Filter::default().with_range(RangeKey::Carat, DEFAULT_CARAT);
        let params = encode(Endpoint::List, &selector(filter));
        assert!(!keys(&params).contains(&"minCarat"));
        assert!(!keys(&params).contains(&"maxCarat"));
    }

    #[test]
    fn changed_range_emits_both_bounds() {
        let filter = Filter::default()
            .with_range(RangeKey::Carat, Range::new(dec("0.5"), dec("2.0")));

        let params = encode(Endpoint::List, &selector(filter));

        assert_eq!(
            &params[2..],
            [
                ("minCarat", "0.5".to_owned()),
                ("maxCarat", "2".to_owned()),
            ],
        );
    }

    #[test]
    fn range_differing_in_one_bound_emits_both() {
        let filter = Filter::default()
            .with_range(
                RangeKey::Price,
                Range::new(Decimal::ZERO, dec("5000")),
            );

        let params = encode(Endpoint::Search, &selector(filter));

        assert_eq!(
            &params[2..],
            [
                ("minPrice", "0".to_owned()),
                ("maxPrice", "5000".to_owned()),
            ],
        );
    }

    #[test]
    fn inverted_range_is_passed_through() {
        let filter = Filter::default()
            .with_range(RangeKey::Width, Range::new(dec("8"), dec("4")));

        let params = encode(Endpoint::List, &selector(filter));

        assert_eq!(
            &params[2..],
            [("minWidth", "8".to_owned()), ("maxWidth", "4".to_owned())],
        );
    }

    #[test]
    fn list_endpoint_uses_bracketed_keys() {
        let filter = Filter::default()
            .with_toggled(Facet::Shape(Shape::Round))
            .with_toggled(Facet::Shape(Shape::Oval))
            .with_toggled(Facet::Color(Color::G))
            .with_range(
                RangeKey::TablePercent,
                Range::new(dec("54"), dec("60")),
            );

        let params = encode(Endpoint::List, &selector(filter));

        assert_eq!(
            &params[2..],
            [
                ("shapes[]", "ROUND".to_owned()),
                ("shapes[]", "OVAL".to_owned()),
                ("colors[]", "G".to_owned()),
                ("minTable", "54".to_owned()),
                ("maxTable", "60".to_owned()),
            ],
        );
    }

    #[test]
    fn search_endpoint_uses_its_own_names() {
        let filter = Filter::default()
            .with_toggled(Facet::Shape(Shape::Pear))
            .with_range(
                RangeKey::DepthPercent,
                Range::new(dec("58"), dec("63.5")),
            );

        let params = encode(Endpoint::Search, &selector(filter));

        assert_eq!(
            &params[2..],
            [
                ("shape", "PEAR".to_owned()),
                ("minDepthPerc", "58".to_owned()),
                ("maxDepthPerc", "63.5".to_owned()),
            ],
        );
    }

    #[test]
    fn sort_goes_last() {
        let params = encode(
            Endpoint::List,
            &Selector {
                filter: Filter::default().with_toggled(Facet::Color(Color::D)),
                arguments: Arguments::new(3, 50),
                sort: Some(Sort {
                    by: SortBy::Price,
                    order: SortOrder::Desc,
                }),
            },
        );

        assert_eq!(
            params,
            [
                ("page", "3".to_owned()),
                ("limit", "50".to_owned()),
                ("colors[]", "D".to_owned()),
                ("sortBy", "totalPrice".to_owned()),
                ("sortOrder", "desc".to_owned()),
            ],
        );
    }

    #[test]
    fn search_query_string_for_single_stone_weight_and_color() {
        let filter = Filter::default()
            .with_range(RangeKey::Carat, Range::new(dec("0.5"), dec("0.5")))
            .with_toggled(Facet::Color(Color::D));

        let mut url = reqwest::Url::parse("http://api.test/diamonds/search")
            .unwrap();
        _ = url
            .query_pairs_mut()
            .extend_pairs(encode(Endpoint::Search, &selector(filter)));
        let query = url.query().unwrap();

        assert!(
            query.contains("minWeight=0.5&maxWeight=0.5&color=D"),
            "{query}",
        );
        for absent in ["shape", "clarity", "Price", "Length", "Perc", "lab"] {
            assert!(!query.contains(absent), "{absent} in {query}");
        }
    }
}
