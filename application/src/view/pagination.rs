//! Pagination [`Navigation`].

use askama::Template;
use common::pagination::{Arguments, Controller};

/// Navigation of a paginated list.
#[derive(Debug, Template)]
#[template(path = "components/pagination.html")]
pub struct Navigation {
    /// Link to the previous page, if there is one.
    prev: Option<String>,

    /// Link to the next page, if there is one.
    next: Option<String>,

    /// Current page number.
    page: u32,

    /// Total number of pages.
    total_pages: u32,

    /// Total number of records.
    total_records: u64,

    /// Selectable page sizes.
    sizes: Vec<PageSize>,
}

/// Selectable page size of a [`Navigation`].
#[derive(Debug)]
struct PageSize {
    /// Number of records per page.
    size: u32,

    /// Link switching to this [`PageSize`], or [`None`] if it's the current
    /// one.
    href: Option<String>,
}

impl Navigation {
    /// Creates the [`Navigation`] of the provided pagination [`Controller`].
    ///
    /// Links are built with the provided `href` from the [`Arguments`] they
    /// lead to. The previous/next links are shown according to the flags
    /// reported by the server only.
    #[must_use]
    pub fn new(
        pagination: &Controller,
        page_sizes: &[u32],
        href: impl Fn(Arguments) -> String,
    ) -> Self {
        let page = pagination.page();
        let limit = pagination.limit();

        Self {
            prev: pagination
                .has_prev_page()
                .then(|| href(Arguments::new(page - 1, limit))),
            next: pagination
                .has_next_page()
                .then(|| href(Arguments::new(page.saturating_add(1), limit))),
            page,
            total_pages: pagination.total_pages(),
            total_records: pagination.total_records(),
            sizes: page_sizes
                .iter()
                .map(|&size| PageSize {
                    size,
                    href: (size != limit)
                        .then(|| href(Arguments::new(1, size))),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::pagination::{Arguments, Controller, Info};

    use super::Navigation;

    fn href(args: Arguments) -> String {
        format!("?page={}&limit={}", args.page, args.limit)
    }

    #[test]
    fn follows_server_flags() {
        let mut pagination = Controller::new(20);
        pagination.go_to(2);
        pagination.apply(Info {
            current_page: 2,
            total_pages: 2,
            total_records: 35,
            records_per_page: 20,
            has_next_page: false,
            has_prev_page: true,
        });

        let html = Navigation::new(&pagination, &[20, 50], href).to_string();

        assert!(
            html.contains(r#"<a href="?page=1&#38;limit=20" rel="prev">"#),
            "{html}",
        );
        assert!(
            html.contains(
                r#"<span class="disabled" aria-disabled="true">Next</span>"#,
            ),
            "{html}",
        );
        assert!(html.contains("Page 2 of 2"), "{html}");
        assert!(html.contains("35 records"), "{html}");
    }

    #[test]
    fn page_size_links_go_back_to_first_page() {
        let mut pagination = Controller::new(20);
        pagination.go_to(3);

        let html = Navigation::new(&pagination, &[20, 50], href).to_string();

        assert!(html.contains("<strong>20</strong>"), "{html}");
        assert!(
            html.contains(r#"<a href="?page=1&#38;limit=50">50</a>"#),
            "{html}",
        );
    }
}
