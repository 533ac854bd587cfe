//! [`Listing`]-related read definitions.

#[cfg(doc)]
use crate::domain::Listing;

pub mod list {
    //! [`Listing`] list definitions.

    use common::{define_kind, pagination};
    use serde::{Deserialize, Serialize};

    use crate::domain::{diamond::Audience, Filter, Listing};

    /// Page of [`Listing`]s.
    pub type Page = pagination::Page<Listing>;

    /// Selector of a [`Page`] of [`Listing`]s.
    #[derive(Clone, Debug, Default)]
    pub struct Selector {
        /// [`Filter`] the [`Listing`]s must satisfy.
        pub filter: Filter,

        /// Pagination [`Arguments`](pagination::Arguments).
        pub arguments: pagination::Arguments,

        /// Requested [`Sort`], if any.
        pub sort: Option<Sort>,
    }

    /// Ordering of a [`Page`].
    #[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
    pub struct Sort {
        /// Field to sort by.
        pub by: SortBy,

        /// Direction to sort in.
        pub order: SortOrder,
    }

    impl Sort {
        /// Parses a [`Sort`] from its `sortBy` and `sortOrder` values,
        /// ascending when no order is given.
        #[must_use]
        pub fn parse(by: &str, order: Option<&str>) -> Option<Self> {
            Some(Self {
                by: by.parse().ok()?,
                order: order.map_or(Some(SortOrder::Asc), |o| o.parse().ok())?,
            })
        }
    }

    define_kind! {
        #[doc = "Field a [`Page`] is sorted by."]
        enum SortBy {
            #[doc = "Total price."]
            Price = "totalPrice",

            #[doc = "Carat weight."]
            Carat = "weight",

            #[doc = "Color grade."]
            Color = "color",

            #[doc = "Clarity grade."]
            Clarity = "clarity",

            #[doc = "Listing date, newest first when descending."]
            Newest = "createdAt",
        }
    }

    define_kind! {
        #[doc = "Direction a [`Page`] is sorted in."]
        enum SortOrder {
            #[doc = "Ascending."]
            Asc = "asc",

            #[doc = "Descending."]
            Desc = "desc",
        }
    }

    /// Inventory endpoint a [`Page`] is requested from.
    ///
    /// Both endpoints are kept distinct: they accept differently named
    /// parameters and may apply different matching rules server-side.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum Endpoint {
        /// Unfiltered list.
        List,

        /// Filtered search.
        Search,
    }

    impl Endpoint {
        /// Picks the [`Endpoint`] suitable for the provided [`Filter`].
        #[must_use]
        pub fn for_filter(filter: &Filter) -> Self {
            if filter.has_active_filters() {
                Self::Search
            } else {
                Self::List
            }
        }

        /// Returns the URL path segments of this [`Endpoint`].
        #[must_use]
        pub const fn path(self) -> &'static [&'static str] {
            match self {
                Self::List => &["diamonds"],
                Self::Search => &["diamonds", "search"],
            }
        }
    }

    /// Request of a [`Page`] from a specific [`Endpoint`].
    #[derive(Clone, Debug)]
    pub struct Request {
        /// [`Endpoint`] to request.
        pub endpoint: Endpoint,

        /// [`Audience`] to shape the [`Listing`]s for.
        pub audience: Audience,

        /// [`Selector`] of the [`Page`].
        pub selector: Selector,
    }

    impl Request {
        /// Creates a new [`Request`] picking the [`Endpoint`] by the
        /// [`Selector`]'s [`Filter`].
        #[must_use]
        pub fn browse(audience: Audience, selector: Selector) -> Self {
            Self {
                endpoint: Endpoint::for_filter(&selector.filter),
                audience,
                selector,
            }
        }
    }

    /// Returns the human readable label of a [`SortBy`] option.
    #[must_use]
    pub fn label(by: SortBy) -> &'static str {
        match by {
            SortBy::Price => "Price",
            SortBy::Carat => "Carat",
            SortBy::Color => "Color",
            SortBy::Clarity => "Clarity",
            SortBy::Newest => "Newest",
        }
    }

    #[cfg(test)]
    mod spec {
        use common::Range;
        use rust_decimal::Decimal;

        use crate::domain::{diamond::Audience, filter::RangeKey, Filter};

        use super::{Endpoint, Request, Selector, Sort, SortBy, SortOrder};

        #[test]
        fn picks_endpoint_by_filter() {
            assert_eq!(
                Endpoint::for_filter(&Filter::default()),
                Endpoint::List,
            );

            let filter = Filter::default().with_range(
                RangeKey::Depth,
                Range::new(Decimal::ONE, Decimal::TEN),
            );
            let req = Request::browse(
                Audience::Customer,
                Selector { filter, ..Selector::default() },
            );
            assert_eq!(req.endpoint, Endpoint::Search);
            assert_eq!(req.endpoint.path(), ["diamonds", "search"]);
        }

        #[test]
        fn parses_sort() {
            assert_eq!(
                Sort::parse("totalPrice", Some("desc")),
                Some(Sort { by: SortBy::Price, order: SortOrder::Desc }),
            );
            assert_eq!(
                Sort::parse("weight", None),
                Some(Sort { by: SortBy::Carat, order: SortOrder::Asc }),
            );
            assert_eq!(Sort::parse("weight", Some("sideways")), None);
            assert_eq!(Sort::parse("", None), None);
        }
    }
}
