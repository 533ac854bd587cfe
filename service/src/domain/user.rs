//! [`PendingUser`] and [`AdminUser`] definitions.

use std::{str::FromStr, sync::LazyLock};

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display};
use regex::Regex;
use secrecy::{zeroize::Zeroize, CloneableSecret, SecretBox};
use serde::{Deserialize, Serialize};

define_id! {
    #[doc = "ID of a registered user."]
    Id
}

/// Registered customer awaiting approval by the staff.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingUser {
    /// ID of this [`PendingUser`].
    #[serde(rename = "_id")]
    pub id: Id,

    /// Full name.
    pub name: String,

    /// Email address.
    pub email: String,

    /// Company the user trades for.
    pub company: Option<String>,

    /// Phone number.
    pub phone: Option<String>,

    /// [`Approval`] status.
    pub status: Approval,

    /// [`DateTime`] when this [`PendingUser`] registered.
    pub created_at: CreationDateTime<PendingUser>,
}

/// Staff member with access to the back-office.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    /// ID of this [`AdminUser`].
    #[serde(rename = "_id")]
    pub id: Id,

    /// Full name.
    pub name: String,

    /// Email address.
    pub email: String,

    /// [`Role`] in the back-office.
    pub role: Role,

    /// [`DateTime`] when this [`AdminUser`] was created.
    pub created_at: CreationDateTime<AdminUser>,
}

/// Decision on a [`PendingUser`].
#[derive(Clone, Debug)]
pub struct Review {
    /// ID of the reviewed [`PendingUser`].
    pub id: Id,

    /// [`Decision`] taken.
    pub decision: Decision,
}

/// New [`AdminUser`] to be created.
#[derive(Clone, Debug)]
pub struct NewAdmin {
    /// [`Name`] of the new [`AdminUser`].
    pub name: Name,

    /// [`Email`] of the new [`AdminUser`].
    pub email: Email,

    /// Initial [`Password`] of the new [`AdminUser`].
    pub password: SecretBox<Password>,

    /// [`Role`] of the new [`AdminUser`].
    pub role: Role,
}

define_kind! {
    #[doc = "Approval status of a registered user."]
    enum Approval {
        #[doc = "Waiting for a review."]
        Pending = "PENDING",

        #[doc = "Approved by the staff."]
        Approved = "APPROVED",

        #[doc = "Rejected by the staff."]
        Rejected = "REJECTED",
    }
}

define_kind! {
    #[doc = "Decision a [`Review`] takes."]
    enum Decision {
        #[doc = "Grant access to the storefront."]
        Approve = "approve",

        #[doc = "Deny access to the storefront."]
        Reject = "reject",
    }
}

define_kind! {
    #[doc = "Role of an [`AdminUser`]."]
    enum Role {
        #[doc = "Regular staff member."]
        Admin = "ADMIN",

        #[doc = "Staff member allowed to manage other admins."]
        SuperAdmin = "SUPER_ADMIN",
    }
}

/// Name of a person.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Email address.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("valid regex")
        });

        let address = address.as_ref();
        address.len() <= 254 && REGEX.is_match(address)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Phone number.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^([+]?\d{1,3}[-\s]?|)\d{3}[-\s]?\d{3}[-\s]?\d{4}$")
                .expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// Password of a new [`AdminUser`].
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub struct Password(String);

impl Password {
    /// Minimal length of a [`Password`].
    pub const MIN_LEN: usize = 8;

    /// Creates a new [`Password`] if the given `password` is valid.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        Self::check(&password).then_some(Self(password))
    }

    /// Checks whether the given `password` is a valid [`Password`].
    fn check(password: impl AsRef<str>) -> bool {
        let password = password.as_ref();
        password.len() >= Self::MIN_LEN && password.len() <= 128
    }

    /// Returns the raw value of this [`Password`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Password {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Password`")
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// [`DateTime`] when a `U`ser was created.
pub type CreationDateTime<U> = DateTimeOf<(U, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{
        AdminUser, Approval, Email, Name, Password, PendingUser, Phone, Role,
    };

    #[test]
    fn validates_names() {
        assert!(Name::new("Ann Lee").is_some());
        assert!(Name::new(" Ann").is_none());
        assert!(Name::new("").is_none());
    }

    #[test]
    fn validates_emails() {
        assert!(Email::new("ann@example.com").is_some());
        assert!(Email::new("ann.lee@mail.example.co").is_some());
        assert!(Email::new("ann@example").is_none());
        assert!(Email::new("ann example@x.com").is_none());
        assert!(Email::new("@example.com").is_none());
    }

    #[test]
    fn validates_phones() {
        assert!(Phone::new("+1 555-123-4567").is_some());
        assert!(Phone::new("+91 9876543210").is_some());
        assert!(Phone::new("5551234567").is_some());
        assert!(Phone::new("12-34").is_none());
    }

    #[test]
    fn validates_passwords() {
        assert!(Password::new("short").is_none());
        assert!(Password::new("long enough").is_some());
    }

    #[test]
    fn deserializes_users() {
        let pending: PendingUser = serde_json::from_value(serde_json::json!({
            "_id": "u1",
            "name": "Ann Lee",
            "email": "ann@example.com",
            "company": "Lee Gems",
            "status": "PENDING",
            "createdAt": "2026-10-01T12:00:00Z",
        }))
        .unwrap();
        assert_eq!(pending.status, Approval::Pending);
        assert!(pending.phone.is_none());

        let admin: AdminUser = serde_json::from_value(serde_json::json!({
            "_id": "a1",
            "name": "Root",
            "email": "root@example.com",
            "role": "SUPER_ADMIN",
            "createdAt": "2026-10-01T12:00:00Z",
        }))
        .unwrap();
        assert_eq!(admin.role, Role::SuperAdmin);
    }
}
