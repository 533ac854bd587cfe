//! Interactive browsing of the inventory.
//!
//! A browsing [`Session`] accumulates [`Change`]s of the [`Filter`], sort
//! and pagination. Bursts of changes are coalesced by a [`Debounce`] window
//! before a page is requested, and every request is tagged with a
//! [`Generation`], so that a slow response of an outdated request is never
//! committed over a newer one.

use std::{future, time::Duration};

use common::{
    pagination::{self, Arguments, Info},
    Range,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::time::{self, Instant};

use crate::{
    domain::{
        filter::{Facet, RangeKey},
        Filter,
    },
    read::diamond::list::{Selector, Sort},
};

/// Fixed-window debounce of bursty changes.
#[derive(Clone, Copy, Debug)]
pub struct Debounce {
    /// Quiet period required after the last change.
    window: Duration,

    /// [`Instant`] the current window elapses at, if armed.
    deadline: Option<Instant>,
}

impl Debounce {
    /// Creates a new idle [`Debounce`] with the provided `window`.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Registers a change, (re)arming the window.
    pub fn touch(&mut self) {
        self.deadline = Some(Instant::now() + self.window);
    }

    /// Indicates whether a change is waiting for the window to elapse.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Resolves once the window elapses after the last change, disarming
    /// this [`Debounce`]. Never resolves while idle.
    ///
    /// Cancel-safe: dropping the returned future keeps the window armed.
    pub async fn elapsed(&mut self) {
        match self.deadline {
            Some(deadline) => {
                time::sleep_until(deadline).await;
                self.deadline = None;
            }
            None => future::pending().await,
        }
    }
}

/// Number of a request issued by a [`Sequencer`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Generation(u64);

/// Issuer of monotonically increasing [`Generation`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sequencer {
    /// Latest issued [`Generation`].
    latest: u64,
}

impl Sequencer {
    /// Issues the next [`Generation`], outdating all the previous ones.
    pub fn issue(&mut self) -> Generation {
        self.latest += 1;
        Generation(self.latest)
    }

    /// Indicates whether the provided [`Generation`] is the latest issued.
    #[must_use]
    pub const fn is_latest(&self, generation: Generation) -> bool {
        generation.0 == self.latest
    }
}

/// Change of a browsing [`Session`] state.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Change {
    /// Toggles a [`Facet`] value.
    Toggle(Facet),

    /// Replaces a [`Range`].
    SetRange {
        /// [`RangeKey`] of the replaced [`Range`].
        key: RangeKey,

        /// New [`Range`].
        range: Range<Decimal>,
    },

    /// Resets the [`Filter`] to its defaults.
    Reset,

    /// Changes the [`Sort`].
    Sort {
        /// New [`Sort`], if any.
        sort: Option<Sort>,
    },

    /// Navigates to the provided page.
    GoTo {
        /// Page to navigate to.
        page: u32,
    },

    /// Navigates to the next page.
    Next,

    /// Navigates to the previous page.
    Prev,

    /// Changes the page size.
    Limit {
        /// New page size.
        limit: u32,
    },
}

impl Change {
    /// Indicates whether this [`Change`] alters the [`Filter`].
    #[must_use]
    pub const fn is_filter(&self) -> bool {
        matches!(self, Self::Toggle(_) | Self::SetRange { .. } | Self::Reset)
    }
}

/// State of an interactive browsing session.
#[derive(Clone, Debug)]
pub struct Session {
    /// Current [`Filter`].
    filter: Filter,

    /// Current [`Sort`], if any.
    sort: Option<Sort>,

    /// Pagination [`Controller`](pagination::Controller).
    pagination: pagination::Controller,

    /// [`Sequencer`] of the page requests.
    sequencer: Sequencer,
}

impl Session {
    /// Creates a new [`Session`] with the default [`Filter`].
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self::from_selector(Selector {
            arguments: Arguments::new(1, limit),
            ..Selector::default()
        })
    }

    /// Creates a new [`Session`] resuming the provided [`Selector`].
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        let Selector {
            filter,
            arguments,
            sort,
        } = selector;

        let mut pagination = pagination::Controller::new(arguments.limit);
        pagination.go_to(arguments.page);
        Self {
            filter,
            sort,
            pagination,
            sequencer: Sequencer::default(),
        }
    }

    /// Returns the current [`Filter`].
    #[must_use]
    pub const fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Returns the current [`Sort`], if any.
    #[must_use]
    pub const fn sort(&self) -> Option<Sort> {
        self.sort
    }

    /// Returns the pagination [`Controller`](pagination::Controller).
    #[must_use]
    pub const fn pagination(&self) -> &pagination::Controller {
        &self.pagination
    }

    /// Applies the provided [`Change`].
    ///
    /// Changes of the [`Filter`] or the [`Sort`] go back to the first page,
    /// as the previous page number is meaningless for a different result
    /// set.
    ///
    /// Returns whether a new page should be requested.
    pub fn apply(&mut self, change: Change) -> bool {
        match change {
            Change::Toggle(facet) => self.filter.toggle(facet),
            Change::SetRange { key, range } => {
                self.filter.set_range(key, range);
            }
            Change::Reset => self.filter.reset(),
            Change::Sort { sort } => {
                if self.sort == sort {
                    return false;
                }
                self.sort = sort;
            }
            Change::GoTo { page } => {
                let page = page.max(1);
                if self.pagination.page() == page {
                    return false;
                }
                self.pagination.go_to(page);
                return true;
            }
            Change::Next => return self.pagination.next(),
            Change::Prev => return self.pagination.prev(),
            Change::Limit { limit } => {
                self.pagination.set_limit(limit);
                return true;
            }
        }
        self.pagination.go_to(1);
        true
    }

    /// Issues a new page request, outdating all the previous ones.
    pub fn request(&mut self) -> (Generation, Selector) {
        (
            self.sequencer.issue(),
            Selector {
                filter: self.filter.clone(),
                arguments: self.pagination.arguments(),
                sort: self.sort,
            },
        )
    }

    /// Indicates whether the provided [`Generation`] is of the latest issued
    /// request.
    #[must_use]
    pub const fn is_latest(&self, generation: Generation) -> bool {
        self.sequencer.is_latest(generation)
    }

    /// Commits the pagination [`Info`] of a response to the request of the
    /// provided [`Generation`].
    ///
    /// Returns `false` and ignores the [`Info`] if a newer request has been
    /// issued since, so the response must be discarded.
    pub fn commit(&mut self, generation: Generation, info: Info) -> bool {
        if !self.sequencer.is_latest(generation) {
            return false;
        }
        self.pagination.apply(info);
        true
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{pagination::Info, Range};
    use rust_decimal::Decimal;
    use tokio::time::{self, Instant};

    use crate::{
        domain::{
            diamond::Color,
            filter::{Facet, RangeKey},
        },
        read::diamond::list::{Sort, SortBy, SortOrder},
    };

    use super::{Change, Debounce, Session};

    fn info(next: bool) -> Info {
        Info {
            current_page: 1,
            total_pages: 9,
            total_records: 170,
            records_per_page: 20,
            has_next_page: next,
            has_prev_page: false,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_coalesces_burst() {
        let mut debounce = Debounce::new(Duration::from_millis(500));
        let start = Instant::now();

        for _ in 0..3 {
            debounce.touch();
            time::advance(Duration::from_millis(200)).await;
        }
        assert!(debounce.is_armed());

        debounce.elapsed().await;

        assert!(start.elapsed() >= Duration::from_millis(900));
        assert!(!debounce.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_debounce_never_fires() {
        let mut debounce = Debounce::new(Duration::from_millis(500));

        let res =
            time::timeout(Duration::from_secs(10), debounce.elapsed()).await;

        assert!(res.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_wait_keeps_debounce_armed() {
        let mut debounce = Debounce::new(Duration::from_millis(500));
        debounce.touch();

        let res =
            time::timeout(Duration::from_millis(100), debounce.elapsed()).await;

        assert!(res.is_err());
        assert!(debounce.is_armed());
        debounce.elapsed().await;
        assert!(!debounce.is_armed());
    }

    #[test]
    fn stale_response_is_not_committed() {
        let mut session = Session::new(20);

        let (slow, _) = session.request();
        assert!(session.apply(Change::Toggle(Facet::Color(Color::D))));
        let (fresh, selector) = session.request();
        assert_eq!(selector.filter.colors, [Color::D]);

        assert!(!session.is_latest(slow));
        assert!(session.is_latest(fresh));
        assert!(session.commit(fresh, info(true)));
        assert!(!session.commit(slow, info(false)));
        assert!(session.pagination().has_next_page());
    }

    #[test]
    fn filter_change_goes_back_to_first_page() {
        let mut session = Session::new(20);
        assert!(session.apply(Change::GoTo { page: 4 }));
        assert_eq!(session.pagination().page(), 4);

        assert!(session.apply(Change::SetRange {
            key: RangeKey::Carat,
            range: Range::new(Decimal::ONE, Decimal::TWO),
        }));

        assert_eq!(session.pagination().page(), 1);
    }

    #[test]
    fn limit_change_goes_back_to_first_page() {
        let mut session = Session::new(20);
        _ = session.apply(Change::GoTo { page: 3 });

        assert!(session.apply(Change::Limit { limit: 50 }));

        let (_, selector) = session.request();
        assert_eq!(selector.arguments.page, 1);
        assert_eq!(selector.arguments.limit, 50);
    }

    #[test]
    fn navigation_follows_server_flags() {
        let mut session = Session::new(20);
        assert!(!session.apply(Change::Next), "no server info yet");

        let (generation, _) = session.request();
        assert!(session.commit(generation, info(true)));
        assert!(session.apply(Change::Next));
        assert_eq!(session.pagination().page(), 2);
        assert!(!session.apply(Change::GoTo { page: 2 }));
    }

    #[test]
    fn same_sort_needs_no_request() {
        let mut session = Session::new(20);
        let sort = Some(Sort {
            by: SortBy::Carat,
            order: SortOrder::Desc,
        });

        assert!(session.apply(Change::Sort { sort }));
        assert!(!session.apply(Change::Sort { sort }));
        assert_eq!(session.sort(), sort);
    }

    #[test]
    fn parses_wire_changes() {
        let changes: Vec<Change> = serde_json::from_str(
            r#"[
                {"type": "toggle", "facet": "color", "value": "D"},
                {"type": "setRange", "key": "carat",
                 "range": {"min": 0.5, "max": 2}},
                {"type": "sort", "sort": {"by": "totalPrice", "order": "asc"}},
                {"type": "goTo", "page": 2},
                {"type": "reset"}
            ]"#,
        )
        .unwrap();

        let mut session = Session::new(20);
        for change in changes {
            _ = session.apply(change);
        }
        assert!(!session.filter().has_active_filters());
        assert_eq!(session.pagination().page(), 1);
        assert_eq!(
            session.sort(),
            Some(Sort {
                by: SortBy::Price,
                order: SortOrder::Asc,
            }),
        );
    }
}
