//! [`FormSubmission`] definitions.

use common::{define_kind, unit, DateTimeOf};
#[cfg(doc)]
use common::DateTime;
use serde::{Deserialize, Serialize};

use super::{
    enquiry::Message,
    user::{Email, Name, Phone},
};

define_id! {
    #[doc = "ID of a [`FormSubmission`]."]
    Id
}

/// Form submitted through the public site.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    /// ID of this [`FormSubmission`].
    #[serde(rename = "_id")]
    pub id: Id,

    /// [`Kind`] of this [`FormSubmission`].
    #[serde(rename = "type")]
    pub kind: Kind,

    /// Name of the submitter.
    pub name: String,

    /// Email address of the submitter.
    pub email: String,

    /// Phone number of the submitter, if provided.
    pub phone: Option<String>,

    /// Free-form message.
    pub message: String,

    /// [`DateTime`] when this [`FormSubmission`] was submitted.
    pub submitted_at: SubmissionDateTime,
}

/// New [`FormSubmission`] to be sent.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct New {
    /// [`Kind`] of the form.
    #[serde(rename = "type")]
    pub kind: Kind,

    /// [`Name`] of the submitter.
    pub name: Name,

    /// [`Email`] of the submitter.
    pub email: Email,

    /// [`Phone`] of the submitter.
    pub phone: Option<Phone>,

    /// [`Message`] of the submitter.
    pub message: Message,
}

define_kind! {
    #[doc = "Kind of a [`FormSubmission`]."]
    enum Kind {
        #[doc = "General contact request."]
        Contact = "CONTACT",

        #[doc = "Offer to sell a stone."]
        Sell = "SELL",

        #[doc = "Job application."]
        Career = "CAREER",
    }
}

/// [`DateTime`] when a [`FormSubmission`] was submitted.
pub type SubmissionDateTime = DateTimeOf<(FormSubmission, unit::Submission)>;

#[cfg(test)]
mod spec {
    use crate::domain::{
        enquiry::Message,
        user::{Email, Name},
    };

    use super::{FormSubmission, Kind, New};

    #[test]
    fn deserializes_submission() {
        let s: FormSubmission = serde_json::from_value(serde_json::json!({
            "_id": "s1",
            "type": "SELL",
            "name": "Ann Lee",
            "email": "ann@example.com",
            "message": "2ct oval, GIA",
            "submittedAt": "2026-01-05T10:00:00Z",
        }))
        .unwrap();
        assert_eq!(s.kind, Kind::Sell);
        assert!(s.phone.is_none());
    }

    #[test]
    fn serializes_new_submission() {
        let new = New {
            kind: Kind::Contact,
            name: Name::new("Ann Lee").unwrap(),
            email: Email::new("ann@example.com").unwrap(),
            phone: None,
            message: Message::new("Hello").unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&new).unwrap(),
            serde_json::json!({
                "type": "CONTACT",
                "name": "Ann Lee",
                "email": "ann@example.com",
                "phone": null,
                "message": "Hello",
            }),
        );
    }
}
