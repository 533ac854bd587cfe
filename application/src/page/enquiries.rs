//! Customer enquiry pages.

use askama::Template;
use axum::{
    extract::Query,
    response::{IntoResponse as _, Redirect, Response},
    Form,
};
use serde::Deserialize;
use service::{
    command::CreateEnquiry,
    domain::{diamond::CertificateNumber, enquiry, Enquiry},
    query, read, Command as _, Query as _,
};
use tracing as log;

use crate::{
    page::{FormError, Page, Rejected, SPAN_NAME},
    view::{Cell, Column, Row, Table},
    AsError, Context, Error,
};

/// Path of the enquiries page.
pub const PATH: &str = "/enquiries";

impl Row for Enquiry {
    fn id(&self) -> Option<String> {
        Some(self.id.to_string())
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "subject" => Some(self.subject.clone()),
            "message" => Some(self.message.clone()),
            "customer" => Some(format!(
                "{} <{}>",
                self.customer.name, self.customer.email,
            )),
            "certificateNumber" => {
                self.certificate_number.as_ref().map(ToString::to_string)
            }
            "status" => Some(self.status.to_string()),
            "reply" => self.reply.clone(),
            "createdAt" => Some(self.created_at.to_date_string()),
            "repliedAt" => self
                .replied_at
                .as_ref()
                .map(enquiry::ReplyDateTime::to_date_string),
            _ => None,
        }
    }
}

/// Returns the [`Column`]s of the customer's enquiries table.
fn columns<'a>() -> Vec<Column<'a, Enquiry>> {
    vec![
        Column::new("createdAt", "Asked"),
        Column::new("subject", "Subject"),
        Column::new("certificateNumber", "Diamond").render(|e: &Enquiry| {
            e.certificate_number.as_ref().map_or_else(Cell::empty, |cert| {
                Cell::link(format!("/diamonds/{cert}"), cert.to_string())
            })
        }),
        Column::new("status", "Status")
            .cell_class(|e: &Enquiry| Some(format!("status-{}", e.status))),
        Column::new("reply", "Reply"),
    ]
}

/// Query of the enquiries page.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prefill {
    /// [`CertificateNumber`] of the diamond to ask about.
    pub certificate_number: Option<String>,
}

/// Form raising a new [`Enquiry`].
///
/// Rendered with its current values.
#[derive(Debug, Default, Deserialize, Template)]
#[serde(rename_all = "camelCase")]
#[template(path = "forms/enquiry.html")]
pub struct EnquiryForm {
    /// Subject line.
    #[serde(default)]
    pub subject: String,

    /// Question text.
    #[serde(default)]
    pub message: String,

    /// [`CertificateNumber`] of the diamond being asked about, if any.
    #[serde(default)]
    pub certificate_number: String,
}

impl EnquiryForm {
    /// Validates this [`EnquiryForm`] into a [`CreateEnquiry`] command.
    ///
    /// # Errors
    ///
    /// With the [`FormError`] of the first invalid field.
    pub fn validate(&self) -> Result<CreateEnquiry, FormError> {
        let subject = enquiry::Subject::new(self.subject.trim())
            .ok_or(FormError::InvalidSubject)?;
        let message = enquiry::Message::new(self.message.trim())
            .ok_or(FormError::InvalidMessage)?;
        let certificate_number = match self.certificate_number.trim() {
            "" => None,
            cert => Some(
                CertificateNumber::new(cert)
                    .ok_or(FormError::InvalidCertificateNumber)?,
            ),
        };
        Ok(CreateEnquiry {
            subject,
            message,
            certificate_number,
        })
    }
}

/// Body of the enquiries page.
#[derive(Debug, Template)]
#[template(path = "pages/enquiries.html")]
struct Enquiries<'a> {
    /// Form raising a new [`Enquiry`].
    form: EnquiryForm,

    /// Table of the enquiries of the signed-in customer, if any.
    table: Option<Table<'a, Enquiry>>,
}

/// Enquiries page: the form raising a new [`Enquiry`], followed by the
/// enquiries of the signed-in customer.
///
/// # Errors
///
/// If the enquiries cannot be fetched.
#[tracing::instrument(
    skip_all,
    fields(http.page = "enquiries", otel.name = SPAN_NAME),
)]
pub async fn index(
    ctx: Context,
    Query(prefill): Query<Prefill>,
) -> Result<Response, Error> {
    let form = EnquiryForm {
        certificate_number: prefill.certificate_number.unwrap_or_default(),
        ..EnquiryForm::default()
    };

    if !ctx.is_authorized() {
        return Ok(Page::storefront("Enquiries", form)
            .with_notice("Sign in to see the replies to your enquiries")
            .into_response());
    }

    let enquiries = ctx
        .service()
        .execute(query::enquiries::Mine::by(read::enquiry::Mine))
        .await
        .map_err(AsError::into_error)?;

    let body = Enquiries {
        form,
        table: Some(Table::new(columns(), &enquiries)),
    };
    Ok(Page::storefront("Enquiries", body).into_response())
}

/// Raises a new [`Enquiry`].
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_SUBJECT` - the subject is blank or too long;
/// - `INVALID_MESSAGE` - the message is blank or too long;
/// - `INVALID_CERTIFICATE_NUMBER` - the certificate number is malformed.
#[tracing::instrument(
    skip_all,
    fields(http.page = "enquiries/create", otel.name = SPAN_NAME),
)]
pub async fn create(
    ctx: Context,
    Form(form): Form<EnquiryForm>,
) -> Result<Response, Error> {
    let cmd = match form.validate() {
        Ok(cmd) => cmd,
        Err(error) => {
            return Ok(Rejected {
                error,
                page: Page::storefront("Enquiries", form),
            }
            .into_response());
        }
    };

    let enquiry = ctx
        .service()
        .execute(cmd)
        .await
        .map_err(AsError::into_error)?;
    log::info!("`Enquiry({})` raised", enquiry.id);

    Ok(Redirect::to(PATH).into_response())
}
