//! Abstractions for page-based pagination.
//!
//! Totals and navigation flags are always reported by the remote API and are
//! taken verbatim: nothing here recomputes them locally.

use serde::{Deserialize, Serialize};

/// Pagination information reported along with a [`Page`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Info {
    /// Number of the current page, starting from `1`.
    pub current_page: u32,

    /// Total number of pages.
    pub total_pages: u32,

    /// Total number of records across all pages.
    pub total_records: u64,

    /// Number of records per page.
    pub records_per_page: u32,

    /// Indicator whether a next page exists.
    pub has_next_page: bool,

    /// Indicator whether a previous page exists.
    pub has_prev_page: bool,
}

/// A page of `T`s.
#[derive(Clone, Debug)]
pub struct Page<T> {
    /// Items on this [`Page`].
    pub items: Vec<T>,

    /// Pagination [`Info`] of this [`Page`].
    pub info: Info,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            info: Info::default(),
        }
    }
}

impl<T> Page<T> {
    /// Maps the items of this [`Page`] keeping its [`Info`].
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            info: self.info,
        }
    }
}

/// Pagination arguments of a request.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Arguments {
    /// Requested page number, starting from `1`.
    pub page: u32,

    /// Requested number of items per page.
    pub limit: u32,
}

impl Arguments {
    /// Default number of items per page.
    pub const DEFAULT_LIMIT: u32 = 20;

    /// Creates new [`Arguments`], coercing zero values to `1`.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }
}

impl Default for Arguments {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_LIMIT)
    }
}

/// Pagination controller tracking the requested page and the latest [`Info`]
/// reported by the server.
#[derive(Clone, Copy, Debug, Default)]
pub struct Controller {
    /// Currently requested [`Arguments`].
    arguments: Arguments,

    /// Latest [`Info`] reported by the server, if any.
    info: Option<Info>,
}

impl Controller {
    /// Creates a new [`Controller`] starting at the first page.
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            arguments: Arguments::new(1, limit),
            info: None,
        }
    }

    /// Returns the currently requested [`Arguments`].
    #[must_use]
    pub const fn arguments(&self) -> Arguments {
        self.arguments
    }

    /// Returns the currently requested page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.arguments.page
    }

    /// Returns the currently requested page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.arguments.limit
    }

    /// Navigates to the provided `page`.
    pub fn go_to(&mut self, page: u32) {
        self.arguments.page = page.max(1);
    }

    /// Navigates to the next page, if the server reported there is one.
    ///
    /// Returns whether the page has changed.
    pub fn next(&mut self) -> bool {
        if !self.has_next_page() {
            return false;
        }
        self.arguments.page = self.arguments.page.saturating_add(1);
        true
    }

    /// Navigates to the previous page, if the server reported there is one.
    ///
    /// Returns whether the page has changed.
    pub fn prev(&mut self) -> bool {
        if !self.has_prev_page() || self.arguments.page <= 1 {
            return false;
        }
        self.arguments.page -= 1;
        true
    }

    /// Changes the page size, going back to the first page, so that no
    /// out-of-range page is requested.
    pub fn set_limit(&mut self, limit: u32) {
        self.arguments = Arguments::new(1, limit);
    }

    /// Stores the [`Info`] reported by the server.
    pub fn apply(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Returns the latest [`Info`] reported by the server, if any.
    #[must_use]
    pub const fn info(&self) -> Option<&Info> {
        self.info.as_ref()
    }

    /// Indicates whether the server reported a next page.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.info.is_some_and(|i| i.has_next_page)
    }

    /// Indicates whether the server reported a previous page.
    #[must_use]
    pub fn has_prev_page(&self) -> bool {
        self.info.is_some_and(|i| i.has_prev_page)
    }

    /// Returns the total number of pages reported by the server.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.info.map_or(0, |i| i.total_pages)
    }

    /// Returns the total number of records reported by the server.
    #[must_use]
    pub fn total_records(&self) -> u64 {
        self.info.map_or(0, |i| i.total_records)
    }
}

#[cfg(test)]
mod spec {
    use super::{Arguments, Controller, Info};

    fn info(page: u32, total_pages: u32, next: bool, prev: bool) -> Info {
        Info {
            current_page: page,
            total_pages,
            total_records: u64::from(total_pages) * 20,
            records_per_page: 20,
            has_next_page: next,
            has_prev_page: prev,
        }
    }

    #[test]
    fn limit_change_resets_page() {
        let mut ctrl = Controller::new(20);
        ctrl.go_to(7);
        assert_eq!(ctrl.page(), 7);

        ctrl.set_limit(50);

        assert_eq!(ctrl.arguments(), Arguments { page: 1, limit: 50 });
    }

    #[test]
    fn navigation_follows_server_flags() {
        let mut ctrl = Controller::new(20);
        assert!(!ctrl.next(), "no server info yet");

        ctrl.apply(info(1, 3, true, false));
        assert!(ctrl.next());
        assert_eq!(ctrl.page(), 2);

        // Flags are taken verbatim, even if they disagree with the totals.
        ctrl.apply(info(2, 3, false, true));
        assert!(!ctrl.next());
        assert_eq!(ctrl.page(), 2);
        assert!(ctrl.prev());
        assert_eq!(ctrl.page(), 1);
    }

    #[test]
    fn totals_are_not_recomputed() {
        let mut ctrl = Controller::new(20);
        assert_eq!(ctrl.total_pages(), 0);

        ctrl.apply(Info {
            total_pages: 9,
            total_records: 3,
            ..Info::default()
        });
        assert_eq!(ctrl.total_pages(), 9);
        assert_eq!(ctrl.total_records(), 3);
    }

    #[test]
    fn zero_arguments_are_coerced() {
        assert_eq!(Arguments::new(0, 0), Arguments { page: 1, limit: 1 });

        let mut ctrl = Controller::new(10);
        ctrl.go_to(0);
        assert_eq!(ctrl.page(), 1);
    }

    #[test]
    fn deserializes_api_pagination() {
        let info: Info = serde_json::from_str(
            r#"{"currentPage":2,"totalPages":5,"totalRecords":93,
                "recordsPerPage":20,"hasNextPage":true,"hasPrevPage":true}"#,
        )
        .unwrap();
        assert_eq!(info.current_page, 2);
        assert_eq!(info.total_records, 93);
        assert!(info.has_next_page && info.has_prev_page);
    }
}
