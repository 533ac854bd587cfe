//! Public contact form.

use askama::Template;
use axum::{
    extract::Query,
    response::{IntoResponse as _, Response},
    Form,
};
use common::Kind as _;
use serde::Deserialize;
use service::{
    command::SubmitForm,
    domain::{enquiry, submission, user},
    Command as _,
};
use tracing as log;

use crate::{
    page::{FormError, Page, Rejected, SPAN_NAME},
    view::Choice,
    AsError, Context, Error,
};

/// Path of the contact page.
pub const PATH: &str = "/contact";

/// Returns the human-readable label of the provided [`submission::Kind`].
const fn label(kind: submission::Kind) -> &'static str {
    match kind {
        submission::Kind::Contact => "General question",
        submission::Kind::Sell => "Sell a diamond",
        submission::Kind::Career => "Careers",
    }
}

/// Form of the contact page.
///
/// Rendered with its current values.
#[derive(Debug, Default, Deserialize, Template)]
#[serde(default)]
#[template(path = "forms/contact.html")]
pub struct ContactForm {
    /// Wire value of the [`submission::Kind`].
    pub kind: String,

    /// Name of the submitter.
    pub name: String,

    /// Email address of the submitter.
    pub email: String,

    /// Phone number of the submitter, blank if not provided.
    pub phone: String,

    /// Free-form message.
    pub message: String,
}

impl ContactForm {
    /// Validates this [`ContactForm`] into a [`SubmitForm`] command.
    ///
    /// # Errors
    ///
    /// With the [`FormError`] of the first invalid field.
    pub fn validate(&self) -> Result<SubmitForm, FormError> {
        let kind = match self.kind.trim() {
            "" => submission::Kind::Contact,
            kind => kind.parse().map_err(|_| FormError::InvalidKind)?,
        };
        let name =
            user::Name::new(self.name.trim()).ok_or(FormError::InvalidName)?;
        let email = user::Email::new(self.email.trim())
            .ok_or(FormError::InvalidEmail)?;
        let phone = match self.phone.trim() {
            "" => None,
            phone => Some(
                user::Phone::new(phone).ok_or(FormError::InvalidPhone)?,
            ),
        };
        let message = enquiry::Message::new(self.message.trim())
            .ok_or(FormError::InvalidMessage)?;

        Ok(SubmitForm {
            kind,
            name,
            email,
            phone,
            message,
        })
    }

    /// Returns the topics to choose from, preselecting the current one.
    fn topics(&self) -> Vec<Choice> {
        submission::Kind::ALL
            .iter()
            .map(|kind| Choice {
                value: kind.as_str(),
                label: label(*kind),
                selected: self.kind.eq_ignore_ascii_case(kind.as_str()),
            })
            .collect()
    }
}

/// Query of the contact page.
#[derive(Debug, Default, Deserialize)]
pub struct Topic {
    /// Wire value of the preselected [`submission::Kind`].
    pub kind: Option<String>,
}

/// Contact page.
#[tracing::instrument(
    skip_all,
    fields(http.page = "contact", otel.name = SPAN_NAME),
)]
#[expect(
    clippy::unused_async,
    reason = "`async` is required to match signature"
)]
pub async fn index(Query(topic): Query<Topic>) -> Page<ContactForm> {
    let form = ContactForm {
        kind: topic.kind.unwrap_or_default(),
        ..ContactForm::default()
    };
    Page::storefront("Contact us", form)
}

/// Submits the contact form.
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_KIND` - the topic is unknown;
/// - `INVALID_NAME` - the name is blank;
/// - `INVALID_EMAIL` - the email address is malformed;
/// - `INVALID_PHONE` - the phone number is malformed;
/// - `INVALID_MESSAGE` - the message is blank or too long.
#[tracing::instrument(
    skip_all,
    fields(http.page = "contact/submit", otel.name = SPAN_NAME),
)]
pub async fn create(
    ctx: Context,
    Form(form): Form<ContactForm>,
) -> Result<Response, Error> {
    let cmd = match form.validate() {
        Ok(cmd) => cmd,
        Err(error) => {
            return Ok(Rejected {
                error,
                page: Page::storefront("Contact us", form),
            }
            .into_response());
        }
    };

    let submission = ctx
        .service()
        .execute(cmd)
        .await
        .map_err(AsError::into_error)?;
    log::info!(
        "`FormSubmission({})` of `{}` kind received",
        submission.id,
        submission.kind,
    );

    Ok(Page::storefront("Contact us", ContactForm::default())
        .with_notice("Thank you! We will get back to you shortly.")
        .into_response())
}
