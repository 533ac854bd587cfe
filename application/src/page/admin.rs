//! Back-office pages managing users, enquiries and form submissions.

use askama::Template;
use axum::{
    extract::{Path, Query},
    response::{IntoResponse as _, Redirect, Response},
    Form,
};
use common::{
    pagination::{Arguments, Controller, Info},
    Kind as _,
};
use secrecy::SecretBox;
use serde::Deserialize;
use service::{
    command::{CreateAdmin, RemoveAdmin, ReplyEnquiry, ReviewUser},
    domain::{enquiry, user, AdminUser, Enquiry, FormSubmission, PendingUser},
    query, read, Command as _, Query as _,
};

use crate::{
    define_error,
    page::{FormError, Page, Rejected, SPAN_NAME},
    view::{Cell, Choice, Column, Navigation, Row, Table},
    AsError, Context, Error,
};

/// Path of the pending users page.
pub const USERS: &str = "/admin/users";

/// Path of the admins page.
pub const ADMINS: &str = "/admin/admins";

/// Path of the enquiries inbox.
pub const ENQUIRIES: &str = "/admin/enquiries";

/// Path of the form submissions page.
pub const SUBMISSIONS: &str = "/admin/submissions";

/// Pagination query of the paged back-office lists.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct Paging {
    /// Requested page, the first one if omitted.
    pub page: Option<u32>,

    /// Requested page size, the configured default if omitted.
    pub limit: Option<u32>,
}

impl Paging {
    /// Resolves this [`Paging`] into pagination [`Arguments`].
    #[must_use]
    pub fn arguments(self, default_limit: u32) -> Arguments {
        Arguments::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(default_limit),
        )
    }
}

/// Creates the pagination [`Navigation`] of the list at the provided
/// `path`.
fn paginate(
    path: &'static str,
    arguments: Arguments,
    info: Info,
    page_sizes: &[u32],
) -> Navigation {
    let mut controller = Controller::new(arguments.limit);
    controller.go_to(arguments.page);
    controller.apply(info);
    Navigation::new(&controller, page_sizes, |args| {
        format!("{path}?page={}&limit={}", args.page, args.limit)
    })
}

/// Body of a paginated back-office list.
#[derive(Debug, Template)]
#[template(path = "pages/paged.html")]
struct Paged<'a, R: Row> {
    /// [`Table`] of the current page.
    table: Table<'a, R>,

    /// [`Navigation`] between the pages.
    navigation: Navigation,
}

impl Row for PendingUser {
    fn id(&self) -> Option<String> {
        Some(self.id.to_string())
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "name" => Some(self.name.clone()),
            "email" => Some(self.email.clone()),
            "company" => self.company.clone(),
            "phone" => self.phone.clone(),
            "status" => Some(self.status.to_string()),
            "createdAt" => Some(self.created_at.to_date_string()),
            _ => None,
        }
    }
}

/// Pending users page.
///
/// # Errors
///
/// If the pending users cannot be fetched.
#[tracing::instrument(
    skip_all,
    fields(http.page = "admin/users", otel.name = SPAN_NAME),
)]
pub async fn users(ctx: Context) -> Result<Response, Error> {
    let users = ctx
        .service()
        .execute(query::users::Pending::by(read::user::Pending))
        .await
        .map_err(AsError::into_error)?;

    let columns = vec![
        Column::new("createdAt", "Registered"),
        Column::new("name", "Name"),
        Column::new("email", "Email"),
        Column::new("company", "Company"),
        Column::new("phone", "Phone"),
        Column::new("status", "Status"),
        Column::new("actions", "").render(|u: &PendingUser| {
            user::Decision::ALL
                .iter()
                .map(|decision| {
                    Cell::action(
                        format!("{USERS}/{}/{decision}", u.id),
                        match decision {
                            user::Decision::Approve => "Approve",
                            user::Decision::Reject => "Reject",
                        },
                    )
                })
                .collect()
        }),
    ];

    Ok(Page::back_office("Pending users", Table::new(columns, &users))
        .into_response())
}

/// Approves or rejects a pending user.
///
/// # Errors
///
/// Possible error codes:
/// - `UNKNOWN_DECISION` - the decision is neither `approve` nor `reject`.
#[tracing::instrument(
    skip_all,
    fields(
        http.page = "admin/users/review",
        user.id = %id,
        otel.name = SPAN_NAME,
    ),
)]
pub async fn review(
    ctx: Context,
    Path((id, decision)): Path<(String, String)>,
) -> Result<Redirect, Error> {
    let decision = decision
        .parse::<user::Decision>()
        .map_err(|_| Error::from(AdminError::UnknownDecision))?;

    ctx.service()
        .execute(ReviewUser {
            id: id.into(),
            decision,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Redirect::to(USERS))
}

impl Row for AdminUser {
    fn id(&self) -> Option<String> {
        Some(self.id.to_string())
    }

    fn field(&self, key: &str) -> Option<String> {
        Some(match key {
            "name" => self.name.clone(),
            "email" => self.email.clone(),
            "role" => self.role.to_string(),
            "createdAt" => self.created_at.to_date_string(),
            _ => return None,
        })
    }
}

/// Form creating a new [`AdminUser`].
///
/// Rendered with its current values, leaving the password blank.
#[derive(Default, Deserialize, Template, derive_more::Debug)]
#[serde(default)]
#[template(path = "forms/admin.html")]
pub struct AdminForm {
    /// Full name.
    pub name: String,

    /// Email address.
    pub email: String,

    /// Initial password.
    #[debug(skip)]
    pub password: String,

    /// Wire value of the [`user::Role`].
    pub role: String,
}

impl AdminForm {
    /// Validates this [`AdminForm`] into a [`CreateAdmin`] command.
    ///
    /// # Errors
    ///
    /// With the [`FormError`] of the first invalid field.
    pub fn validate(&self) -> Result<CreateAdmin, FormError> {
        let name =
            user::Name::new(self.name.trim()).ok_or(FormError::InvalidName)?;
        let email = user::Email::new(self.email.trim())
            .ok_or(FormError::InvalidEmail)?;
        let password = user::Password::new(self.password.as_str())
            .ok_or(FormError::InvalidPassword)?;
        let role = match self.role.trim() {
            "" => user::Role::Admin,
            role => role.parse().map_err(|_| FormError::InvalidRole)?,
        };

        Ok(CreateAdmin {
            name,
            email,
            password: SecretBox::init_with(move || password),
            role,
        })
    }

    /// Returns the roles to choose from, preselecting the current one.
    fn roles(&self) -> Vec<Choice> {
        user::Role::ALL
            .iter()
            .map(|role| Choice {
                value: role.as_str(),
                label: role.as_str(),
                selected: self.role.eq_ignore_ascii_case(role.as_str()),
            })
            .collect()
    }
}

/// Body of the admins page.
#[derive(Debug, Template)]
#[template(path = "pages/admins.html")]
struct Admins<'a> {
    /// [`Table`] of the existing admins.
    table: Table<'a, AdminUser>,

    /// [`AdminForm`] creating a new admin.
    form: AdminForm,
}

/// Admins page.
///
/// # Errors
///
/// If the admins cannot be fetched.
#[tracing::instrument(
    skip_all,
    fields(http.page = "admin/admins", otel.name = SPAN_NAME),
)]
pub async fn admins(ctx: Context) -> Result<Response, Error> {
    let admins = ctx
        .service()
        .execute(query::users::Admins::by(read::user::Admins))
        .await
        .map_err(AsError::into_error)?;

    let columns = vec![
        Column::new("createdAt", "Created"),
        Column::new("name", "Name"),
        Column::new("email", "Email"),
        Column::new("role", "Role"),
        Column::new("actions", "").render(|a: &AdminUser| {
            Cell::action(format!("{ADMINS}/{}/remove", a.id), "Remove")
        }),
    ];

    let body = Admins {
        table: Table::new(columns, &admins),
        form: AdminForm::default(),
    };
    Ok(Page::back_office("Admins", body).into_response())
}

/// Creates a new [`AdminUser`].
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_NAME` - the name is blank;
/// - `INVALID_EMAIL` - the email address is malformed;
/// - `INVALID_PASSWORD` - the password is too short or too long;
/// - `INVALID_ROLE` - the role is unknown.
#[tracing::instrument(
    skip_all,
    fields(http.page = "admin/admins/create", otel.name = SPAN_NAME),
)]
pub async fn create_admin(
    ctx: Context,
    Form(form): Form<AdminForm>,
) -> Result<Response, Error> {
    let cmd = match form.validate() {
        Ok(cmd) => cmd,
        Err(error) => {
            return Ok(Rejected {
                error,
                page: Page::back_office("New admin", form),
            }
            .into_response());
        }
    };

    _ = ctx
        .service()
        .execute(cmd)
        .await
        .map_err(AsError::into_error)?;

    Ok(Redirect::to(ADMINS).into_response())
}

/// Removes an [`AdminUser`].
///
/// # Errors
///
/// If the remote API refuses the removal.
#[tracing::instrument(
    skip_all,
    fields(
        http.page = "admin/admins/remove",
        user.id = %id,
        otel.name = SPAN_NAME,
    ),
)]
pub async fn remove_admin(
    ctx: Context,
    Path(id): Path<String>,
) -> Result<Redirect, Error> {
    ctx.service()
        .execute(RemoveAdmin { id: id.into() })
        .await
        .map_err(AsError::into_error)?;

    Ok(Redirect::to(ADMINS))
}

/// Returns the reply form of the provided [`Enquiry`], or its reply if it
/// has been replied already.
fn reply_cell(enquiry: &Enquiry) -> Cell {
    enquiry.reply.as_ref().map_or_else(
        || Cell::Prompt {
            action: format!("{ENQUIRIES}/{}/reply", enquiry.id),
            field: "message",
            label: "Reply".into(),
        },
        |reply| Cell::text(reply.as_str()),
    )
}

/// Enquiries inbox.
///
/// # Errors
///
/// If the enquiries cannot be fetched.
#[tracing::instrument(
    skip_all,
    fields(http.page = "admin/enquiries", otel.name = SPAN_NAME),
)]
pub async fn enquiries(
    ctx: Context,
    Query(paging): Query<Paging>,
) -> Result<Response, Error> {
    let arguments = paging.arguments(ctx.service().config().page_size);
    let page = ctx
        .service()
        .execute(query::enquiries::All::by(arguments))
        .await
        .map_err(AsError::into_error)?;

    let columns = vec![
        Column::new("createdAt", "Asked"),
        Column::new("customer", "Customer"),
        Column::new("certificateNumber", "Diamond"),
        Column::new("subject", "Subject"),
        Column::new("message", "Message"),
        Column::new("status", "Status"),
        Column::new("reply", "Reply").render(reply_cell),
    ];

    let body = Paged {
        table: Table::new(columns, &page.items),
        navigation: paginate(
            ENQUIRIES,
            arguments,
            page.info,
            ctx.page_sizes(),
        ),
    };
    Ok(Page::back_office("Enquiries", body).into_response())
}

/// Form replying to an [`Enquiry`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReplyForm {
    /// Text of the reply.
    pub message: String,
}

/// Replies to an [`Enquiry`].
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_MESSAGE` - the reply is blank or too long.
#[tracing::instrument(
    skip_all,
    fields(
        http.page = "admin/enquiries/reply",
        enquiry.id = %id,
        otel.name = SPAN_NAME,
    ),
)]
pub async fn reply(
    ctx: Context,
    Path(id): Path<String>,
    Form(form): Form<ReplyForm>,
) -> Result<Redirect, Error> {
    let message = enquiry::Message::new(form.message.trim())
        .ok_or_else(|| Error::from(FormError::InvalidMessage))?;

    _ = ctx
        .service()
        .execute(ReplyEnquiry {
            id: id.into(),
            message,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Redirect::to(ENQUIRIES))
}

impl Row for FormSubmission {
    fn id(&self) -> Option<String> {
        Some(self.id.to_string())
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "kind" => Some(self.kind.to_string()),
            "name" => Some(self.name.clone()),
            "email" => Some(self.email.clone()),
            "phone" => self.phone.clone(),
            "message" => Some(self.message.clone()),
            "submittedAt" => Some(self.submitted_at.to_date_string()),
            _ => None,
        }
    }
}

/// Form submissions page.
///
/// # Errors
///
/// If the submissions cannot be fetched.
#[tracing::instrument(
    skip_all,
    fields(http.page = "admin/submissions", otel.name = SPAN_NAME),
)]
pub async fn submissions(
    ctx: Context,
    Query(paging): Query<Paging>,
) -> Result<Response, Error> {
    let arguments = paging.arguments(ctx.service().config().page_size);
    let page = ctx
        .service()
        .execute(query::submissions::List::by(arguments))
        .await
        .map_err(AsError::into_error)?;

    let columns = vec![
        Column::new("submittedAt", "Submitted"),
        Column::new("kind", "Kind"),
        Column::new("name", "Name"),
        Column::new("email", "Email"),
        Column::new("phone", "Phone"),
        Column::new("message", "Message"),
    ];

    let body = Paged {
        table: Table::new(columns, &page.items),
        navigation: paginate(
            SUBMISSIONS,
            arguments,
            page.info,
            ctx.page_sizes(),
        ),
    };
    Ok(Page::back_office("Form submissions", body).into_response())
}

define_error! {
    enum AdminError {
        #[code = "UNKNOWN_DECISION"]
        #[status = NOT_FOUND]
        #[message = "Unknown review decision"]
        UnknownDecision,
    }
}
