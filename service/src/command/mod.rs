//! [`Command`] definition.

pub mod add_to_cart;
pub mod create_admin;
pub mod create_enquiry;
pub mod remove_admin;
pub mod remove_cart_items;
pub mod reply_enquiry;
pub mod review_user;
pub mod submit_form;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    add_to_cart::AddToCart, create_admin::CreateAdmin,
    create_enquiry::CreateEnquiry, remove_admin::RemoveAdmin,
    remove_cart_items::RemoveCartItems, reply_enquiry::ReplyEnquiry,
    review_user::ReviewUser, submit_form::SubmitForm,
};
