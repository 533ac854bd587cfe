//! Remote inventory [`Api`]-related implementations.

pub mod http;
pub mod params;

use common::pagination::{Info, Page};
use derive_more::{Display, Error as StdError, From};
use serde::{
    de::{DeserializeOwned, IgnoredAny},
    Deserialize,
};

pub use self::http::Http;

/// Operation over the remote inventory API.
pub use common::Handler as Api;

/// Message shown when the API failure carries no message of its own.
pub const GENERIC_MESSAGE: &str = "Something went wrong";

/// [`Api`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Request couldn't be performed or its response couldn't be read.
    #[display("Request failed: {_0}")]
    #[from]
    Transport(reqwest::Error),

    /// API responded with a non-2xx HTTP status.
    #[display("API responded with `{status}`: {message}")]
    Status {
        /// HTTP status code of the response.
        status: u16,

        /// Message from the response [`Envelope`], or the
        /// [`GENERIC_MESSAGE`].
        message: String,
    },

    /// API responded with `success: false`.
    #[display("API rejected the request: {_0}")]
    Rejected(#[error(not(source))] String),

    /// Response body is not a valid [`Envelope`].
    #[display("Malformed API response: {_0}")]
    #[from]
    Decode(serde_json::Error),

    /// Successful [`Envelope`] carries no data.
    #[display("API response carries no data")]
    MissingData,

    /// Configured base URL cannot have a path appended to it.
    #[display("Invalid API base URL: {_0}")]
    BaseUrl(#[error(not(source))] String),
}

impl Error {
    /// Returns the message to be shown to the user.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Status { message, .. } | Self::Rejected(message) => message,
            Self::Transport(_)
            | Self::Decode(_)
            | Self::MissingData
            | Self::BaseUrl(_) => GENERIC_MESSAGE,
        }
    }

    /// Indicates whether the requested resource doesn't exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Envelope every API response is wrapped into.
#[derive(Clone, Debug, Deserialize)]
pub struct Envelope<T> {
    /// Indicator whether the request succeeded.
    #[serde(default)]
    pub success: bool,

    /// Human readable outcome of the request.
    #[serde(default)]
    pub message: Option<String>,

    /// Payload of the response.
    pub data: Option<T>,

    /// Pagination [`Info`] of a list response.
    #[serde(default)]
    pub pagination: Option<Info>,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decodes an [`Envelope`] from the provided HTTP `status` and `body`.
    ///
    /// # Errors
    ///
    /// - [`Error::Status`] if the `status` is not 2xx;
    /// - [`Error::Decode`] if the `body` is not a valid [`Envelope`];
    /// - [`Error::Rejected`] if the [`Envelope`] reports no `success`.
    pub fn decode(status: u16, body: &[u8]) -> Result<Self, Error> {
        if !(200..300).contains(&status) {
            let message = serde_json::from_slice::<Envelope<IgnoredAny>>(body)
                .ok()
                .and_then(|e| e.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_MESSAGE.into());
            return Err(Error::Status { status, message });
        }

        let envelope: Self = serde_json::from_slice(body)?;
        if !envelope.success {
            return Err(Error::Rejected(
                envelope
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_MESSAGE.into()),
            ));
        }
        Ok(envelope)
    }
}

impl<T> Envelope<T> {
    /// Returns the payload of this [`Envelope`].
    ///
    /// # Errors
    ///
    /// With [`Error::MissingData`] if this [`Envelope`] has no payload.
    pub fn into_data(self) -> Result<T, Error> {
        self.data.ok_or(Error::MissingData)
    }

    /// Converts this [`Envelope`] of a list into a [`Page`], taking its
    /// pagination [`Info`] verbatim.
    #[must_use]
    pub fn into_page<I>(self) -> Page<I>
    where
        T: IntoIterator<Item = I>,
    {
        Page {
            items: self
                .data
                .map(|d| d.into_iter().collect())
                .unwrap_or_default(),
            info: self.pagination.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Envelope, Error, GENERIC_MESSAGE};

    #[test]
    fn decodes_successful_envelope() {
        let body = br#"{"success":true,"message":"ok","data":[1,2,3],
            "pagination":{"currentPage":1,"totalPages":4,"totalRecords":10,
            "recordsPerPage":3,"hasNextPage":true,"hasPrevPage":false}}"#;

        let page = Envelope::<Vec<u8>>::decode(200, body).unwrap().into_page();

        assert_eq!(page.items, [1, 2, 3]);
        assert_eq!(page.info.total_pages, 4);
        assert!(page.info.has_next_page);
    }

    #[test]
    fn rejected_envelope_keeps_its_message() {
        let err = Envelope::<u8>::decode(
            200,
            br#"{"success":false,"message":"Diamond is on hold"}"#,
        )
        .unwrap_err();

        assert!(matches!(err, Error::Rejected(_)));
        assert_eq!(err.message(), "Diamond is on hold");
    }

    #[test]
    fn missing_success_flag_is_a_failure() {
        let err = Envelope::<u8>::decode(200, br#"{"data":1}"#).unwrap_err();
        assert_eq!(err.message(), GENERIC_MESSAGE);
    }

    #[test]
    fn error_status_uses_envelope_message_or_fallback() {
        let err = Envelope::<u8>::decode(
            403,
            br#"{"success":false,"message":"Account not approved"}"#,
        )
        .unwrap_err();
        assert_eq!(err.message(), "Account not approved");
        assert!(!err.is_not_found());

        let err = Envelope::<u8>::decode(502, b"<html>Bad Gateway</html>")
            .unwrap_err();
        assert!(matches!(err, Error::Status { status: 502, .. }));
        assert_eq!(err.message(), GENERIC_MESSAGE);

        let err = Envelope::<u8>::decode(404, b"").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = Envelope::<u8>::decode(200, b"not json").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert_eq!(err.message(), GENERIC_MESSAGE);
    }

    #[test]
    fn absent_data_is_reported() {
        let err = Envelope::<u8>::decode(200, br#"{"success":true}"#)
            .unwrap()
            .into_data()
            .unwrap_err();
        assert!(matches!(err, Error::MissingData));
    }
}
