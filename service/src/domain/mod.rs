//! Domain definitions.

/// Defines a string-backed identifier assigned by the remote API.
macro_rules! define_id {
    (
        #[doc = $doc:literal]
        $name:ident
    ) => {
        #[doc = $doc]
        #[derive(
            ::derive_more::AsRef,
            Clone,
            Debug,
            ::serde::Deserialize,
            ::derive_more::Display,
            Eq,
            ::derive_more::From,
            ::derive_more::FromStr,
            Hash,
            ::derive_more::Into,
            PartialEq,
            ::serde::Serialize,
        )]
        #[as_ref(str)]
        #[from(&str, String)]
        pub struct $name(String);
    };
}

pub mod cart;
pub mod diamond;
pub mod enquiry;
pub mod filter;
pub mod submission;
pub mod user;

pub use self::{
    cart::CartItem,
    diamond::{Diamond, Listing, PublicDiamond},
    enquiry::Enquiry,
    filter::Filter,
    submission::FormSubmission,
    user::{AdminUser, PendingUser},
};
