//! Server-rendered pages.

pub mod admin;
pub mod cart;
pub mod contact;
pub mod diamonds;
pub mod enquiries;
pub mod live;

use std::fmt;

use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use tracing as log;

use crate::{define_error, Error};

/// Name of the [`tracing::Span`] for the page handlers.
pub(crate) const SPAN_NAME: &str = "Page";

/// Section of the site a [`Page`] belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Section {
    /// Customer-facing storefront.
    Storefront,

    /// Staff-only back-office.
    BackOffice,
}

/// Page shell wrapping the rendered components.
#[derive(Debug, Template)]
#[template(path = "page.html")]
pub struct Page<B: fmt::Display> {
    /// Title of this [`Page`].
    pub title: String,

    /// [`Section`] this [`Page`] belongs to.
    pub section: Section,

    /// Notice shown above the [`Page::body`], if any.
    pub notice: Option<String>,

    /// Rendered components.
    pub body: B,
}

impl<B: fmt::Display> Page<B> {
    /// Creates a new storefront [`Page`].
    #[must_use]
    pub fn storefront(title: impl Into<String>, body: B) -> Self {
        Self {
            title: title.into(),
            section: Section::Storefront,
            notice: None,
            body,
        }
    }

    /// Creates a new back-office [`Page`].
    #[must_use]
    pub fn back_office(title: impl Into<String>, body: B) -> Self {
        Self {
            section: Section::BackOffice,
            ..Self::storefront(title, body)
        }
    }

    /// Shows the provided `notice` above the content of this [`Page`].
    #[must_use]
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    /// Indicates whether this [`Page`] belongs to the back-office.
    #[must_use]
    pub fn is_back_office(&self) -> bool {
        self.section == Section::BackOffice
    }
}

impl<B: fmt::Display> IntoResponse for Page<B> {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                log::error!("failed to render `Page`: {e}");
                Error::internal(&e).into_response()
            }
        }
    }
}

/// Page shown in place of a form whose input is invalid.
///
/// The form is rendered again along with the [`FormError`] message.
#[derive(Debug)]
pub struct Rejected<B: fmt::Display> {
    /// [`FormError`] the input was rejected with.
    pub error: FormError,

    /// [`Page`] with the form rendered again.
    pub page: Page<B>,
}

impl<B: fmt::Display> IntoResponse for Rejected<B> {
    fn into_response(self) -> Response {
        let Self { error, page } = self;
        let status = Error::from(error).status_code;
        (status, page.with_notice(error.to_string())).into_response()
    }
}

define_error! {
    enum FormError {
        #[code = "INVALID_CERTIFICATE_NUMBER"]
        #[status = BAD_REQUEST]
        #[message = "Certificate number is invalid"]
        InvalidCertificateNumber,

        #[code = "INVALID_SUBJECT"]
        #[status = UNPROCESSABLE_ENTITY]
        #[message = "Subject must be up to 200 characters and not blank"]
        InvalidSubject,

        #[code = "INVALID_MESSAGE"]
        #[status = UNPROCESSABLE_ENTITY]
        #[message = "Message must be up to 5000 characters and not blank"]
        InvalidMessage,

        #[code = "INVALID_NAME"]
        #[status = UNPROCESSABLE_ENTITY]
        #[message = "Name must not be blank"]
        InvalidName,

        #[code = "INVALID_EMAIL"]
        #[status = UNPROCESSABLE_ENTITY]
        #[message = "Email address is invalid"]
        InvalidEmail,

        #[code = "INVALID_PHONE"]
        #[status = UNPROCESSABLE_ENTITY]
        #[message = "Phone number is invalid"]
        InvalidPhone,

        #[code = "INVALID_PASSWORD"]
        #[status = UNPROCESSABLE_ENTITY]
        #[message = "Password must be 8 to 128 characters long"]
        InvalidPassword,

        #[code = "INVALID_KIND"]
        #[status = UNPROCESSABLE_ENTITY]
        #[message = "Unknown kind of request"]
        InvalidKind,

        #[code = "INVALID_ROLE"]
        #[status = UNPROCESSABLE_ENTITY]
        #[message = "Unknown role"]
        InvalidRole,
    }
}

#[cfg(test)]
mod spec {
    use askama::Template as _;
    use axum::response::IntoResponse as _;

    use crate::view::Cell;

    use super::{FormError, Page, Rejected};

    #[test]
    fn renders_body_unescaped_and_title_escaped() {
        let html = Page::storefront(
            "Rings & <more>",
            Cell::link("/diamonds?shape=PEAR", "Pears & <more>"),
        )
        .render()
        .unwrap();

        assert!(html.contains("<title>Rings &#38; &#60;more&#62;"), "{html}");
        assert!(
            html.contains(concat!(
                r#"<a href="/diamonds?shape=PEAR">"#,
                "Pears &#38; &#60;more&#62;</a>",
            )),
            "{html}",
        );
    }

    #[test]
    fn back_office_shows_staff_navigation() {
        let html = Page::back_office("Inventory", "").render().unwrap();
        assert!(html.contains(r#"href="/admin/users""#), "{html}");

        let html = Page::storefront("Diamonds", "").render().unwrap();
        assert!(!html.contains(r#"href="/admin/users""#), "{html}");
    }

    #[test]
    fn rejected_form_keeps_error_status() {
        let resp = Rejected {
            error: FormError::InvalidEmail,
            page: Page::storefront("Contact us", ""),
        }
        .into_response();

        assert_eq!(resp.status(), http::StatusCode::UNPROCESSABLE_ENTITY);
    }
}
