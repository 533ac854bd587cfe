//! [`Enquiry`] definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display};
use serde::{Deserialize, Serialize};

use super::diamond::CertificateNumber;

define_id! {
    #[doc = "ID of an [`Enquiry`]."]
    Id
}

/// Question of a customer, optionally about a specific diamond.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    /// ID of this [`Enquiry`].
    #[serde(rename = "_id")]
    pub id: Id,

    /// Subject line.
    pub subject: String,

    /// Question text.
    pub message: String,

    /// [`Customer`] who asked.
    pub customer: Customer,

    /// [`CertificateNumber`] of the diamond being asked about, if any.
    pub certificate_number: Option<CertificateNumber>,

    /// [`Status`] of this [`Enquiry`].
    pub status: Status,

    /// Reply of the staff, if any.
    pub reply: Option<String>,

    /// [`DateTime`] when this [`Enquiry`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Enquiry`] was replied.
    pub replied_at: Option<ReplyDateTime>,
}

/// Customer who raised an [`Enquiry`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Customer {
    /// Full name.
    pub name: String,

    /// Email address.
    pub email: String,
}

define_kind! {
    #[doc = "Status of an [`Enquiry`]."]
    enum Status {
        #[doc = "Waiting for a reply."]
        Pending = "PENDING",

        #[doc = "Replied by the staff."]
        Replied = "REPLIED",

        #[doc = "Closed without further action."]
        Closed = "CLOSED",
    }
}

/// New [`Enquiry`] to be raised.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct New {
    /// [`Subject`] of the [`Enquiry`].
    pub subject: Subject,

    /// [`Message`] of the [`Enquiry`].
    pub message: Message,

    /// [`CertificateNumber`] of the diamond being asked about.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_number: Option<CertificateNumber>,
}

/// Reply to an [`Enquiry`].
#[derive(Clone, Debug)]
pub struct Reply {
    /// ID of the replied [`Enquiry`].
    pub id: Id,

    /// [`Message`] of the reply.
    pub message: Message,
}

/// Subject line of an [`Enquiry`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Subject(String);

impl Subject {
    /// Creates a new [`Subject`] if the given `subject` is valid.
    #[must_use]
    pub fn new(subject: impl Into<String>) -> Option<Self> {
        let subject = subject.into();
        Self::check(&subject).then_some(Self(subject))
    }

    /// Checks whether the given `subject` is a valid [`Subject`].
    fn check(subject: impl AsRef<str>) -> bool {
        let subject = subject.as_ref();
        !subject.trim().is_empty()
            && subject.chars().count() <= 200
            && !subject.chars().any(char::is_control)
    }
}

impl FromStr for Subject {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Subject`")
    }
}

/// Free-form text of an [`Enquiry`], its reply or a form submission.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Message(String);

impl Message {
    /// Creates a new [`Message`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is a valid [`Message`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        !text.trim().is_empty() && text.chars().count() <= 5000
    }
}

impl FromStr for Message {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Message`")
    }
}

/// [`DateTime`] when an [`Enquiry`] was created.
pub type CreationDateTime = DateTimeOf<(Enquiry, unit::Creation)>;

/// [`DateTime`] when an [`Enquiry`] was replied.
pub type ReplyDateTime = DateTimeOf<(Enquiry, unit::Reply)>;

#[cfg(test)]
mod spec {
    use super::{Enquiry, Message, New, Status, Subject};

    #[test]
    fn validates_texts() {
        assert!(Subject::new("Price of 2141438172").is_some());
        assert!(Subject::new("   ").is_none());
        assert!(Subject::new("line\nbreak").is_none());
        assert!(Subject::new("x".repeat(201)).is_none());

        assert!(Message::new("multi\nline\nis fine").is_some());
        assert!(Message::new("").is_none());
    }

    #[test]
    fn deserializes_enquiry() {
        let e: Enquiry = serde_json::from_value(serde_json::json!({
            "_id": "e1",
            "subject": "Availability",
            "message": "Is it still available?",
            "customer": {"name": "Ann Lee", "email": "ann@example.com"},
            "certificateNumber": "LG123",
            "status": "REPLIED",
            "reply": "Yes",
            "createdAt": "2026-10-01T12:00:00Z",
            "repliedAt": "2026-10-02T08:15:00Z",
        }))
        .unwrap();

        assert_eq!(e.status, Status::Replied);
        assert_eq!(e.customer.name, "Ann Lee");
        assert!(e.replied_at.unwrap() > e.created_at.coerce());
    }

    #[test]
    fn omits_absent_certificate() {
        let new = New {
            subject: Subject::new("Hi").unwrap(),
            message: Message::new("Question").unwrap(),
            certificate_number: None,
        };
        assert_eq!(
            serde_json::to_value(&new).unwrap(),
            serde_json::json!({"subject": "Hi", "message": "Question"}),
        );
    }
}
