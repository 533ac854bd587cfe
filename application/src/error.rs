//! [`Error`]-related definitions.

use std::fmt;

use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::typed_header::TypedHeaderRejection;
use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{command, infra::api};
use tracerr::{Trace, Traced};
use tracing as log;

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[status = $status_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error,
            Eq,
            PartialEq,
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            status_code: ::http::StatusCode::$status_code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// Error shown to the user instead of the requested page.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`http::StatusCode`] of this [`Error`].
    pub status_code: http::StatusCode,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an internal server error.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_SERVER_ERROR",
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            status_code: _,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("{trace}"))),
        )
    }
}

/// Page rendering an [`Error`] along with a manual retry link.
#[derive(Debug, Template)]
#[template(path = "error.html")]
struct ErrorPage<'a> {
    /// HTTP status of the failure.
    status: http::StatusCode,

    /// [`Error`] code.
    code: Code,

    /// Message shown to the user.
    message: &'a str,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.status_code.is_server_error() {
            log::error!("{self}");
        } else {
            log::debug!("{self}");
        }

        let page = ErrorPage {
            status: self.status_code,
            code: self.code,
            message: &self.message,
        };
        match page.render() {
            Ok(html) => (self.status_code, Html(html)).into_response(),
            Err(e) => {
                log::error!("failed to render `ErrorPage`: {e}");
                (self.status_code, self.message).into_response()
            }
        }
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for TypedHeaderRejection {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error {
            code: "BAD_REQUEST",
            status_code: http::StatusCode::BAD_REQUEST,
            message: self.to_string(),
            backtrace: None,
        })
    }
}

impl AsError for api::Error {
    fn try_as_error(&self) -> Option<Error> {
        use http::StatusCode as S;

        let (code, status_code) = match self {
            Self::Status { status, .. } => match *status {
                401 => ("UNAUTHORIZED", S::UNAUTHORIZED),
                403 => ("FORBIDDEN", S::FORBIDDEN),
                404 => ("NOT_FOUND", S::NOT_FOUND),
                400..=499 => (
                    "REQUEST_REJECTED",
                    S::from_u16(*status).unwrap_or(S::BAD_REQUEST),
                ),
                _ => ("API_FAILED", S::BAD_GATEWAY),
            },
            Self::Rejected(_) => ("REQUEST_REJECTED", S::UNPROCESSABLE_ENTITY),
            Self::Transport(_) | Self::Decode(_) | Self::MissingData => {
                ("API_FAILED", S::BAD_GATEWAY)
            }
            Self::BaseUrl(_) => return None,
        };

        Some(Error {
            code,
            status_code,
            message: self.message().to_owned(),
            backtrace: None,
        })
    }
}

impl AsError for command::add_to_cart::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Api(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::remove_cart_items::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Api(e) => e.try_as_error(),
            Self::NothingSelected => Some(CartError::NothingSelected.into()),
        }
    }
}

impl AsError for command::create_enquiry::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Api(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::reply_enquiry::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Api(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::review_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Api(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::create_admin::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Api(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::remove_admin::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Api(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::submit_form::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Api(e) => e.try_as_error(),
        }
    }
}

define_error! {
    enum CartError {
        #[code = "NOTHING_SELECTED"]
        #[status = BAD_REQUEST]
        #[message = "Select at least one item to remove"]
        NothingSelected,
    }
}

#[cfg(test)]
mod spec {
    use axum::response::IntoResponse as _;
    use service::infra::api::{self, GENERIC_MESSAGE};

    use super::{AsError as _, CartError, Error};

    #[test]
    fn envelope_message_reaches_user() {
        let err = api::Error::Status {
            status: 409,
            message: "Diamond is already in the cart".into(),
        }
        .into_error();

        assert_eq!(err.status_code, http::StatusCode::CONFLICT);
        assert_eq!(err.message, "Diamond is already in the cart");
    }

    #[test]
    fn missing_resource_is_not_found() {
        let err = api::Error::Status {
            status: 404,
            message: GENERIC_MESSAGE.into(),
        }
        .into_error();

        assert_eq!(err.code, "NOT_FOUND");
        assert_eq!(err.status_code, http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn upstream_failure_is_bad_gateway_with_generic_message() {
        let err = api::Error::MissingData.into_error();
        assert_eq!(err.status_code, http::StatusCode::BAD_GATEWAY);
        assert_eq!(err.message, GENERIC_MESSAGE);

        let err = api::Error::Status {
            status: 503,
            message: GENERIC_MESSAGE.into(),
        }
        .into_error();
        assert_eq!(err.status_code, http::StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn misconfiguration_is_internal() {
        let err = api::Error::BaseUrl("data:x".into()).into_error();

        assert_eq!(err.code, "INTERNAL_SERVER_ERROR");
    }

    #[test]
    fn coded_error_keeps_its_status() {
        let err = Error::from(CartError::NothingSelected);

        assert_eq!(err.code, "NOTHING_SELECTED");
        assert_eq!(
            err.to_string(),
            "[NOTHING_SELECTED]: Select at least one item to remove",
        );
    }

    #[test]
    fn renders_error_page() {
        let resp = Error::from(CartError::NothingSelected).into_response();

        assert_eq!(resp.status(), http::StatusCode::BAD_REQUEST);
    }
}
