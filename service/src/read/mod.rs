//! Read entities definitions.

pub mod cart;
pub mod diamond;
pub mod enquiry;
pub mod submission;
pub mod user;
