//! [`PendingUser`] and [`AdminUser`] read definitions.

#[cfg(doc)]
use crate::domain::{AdminUser, PendingUser};

/// Selector of the [`PendingUser`]s awaiting a review.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pending;

/// Selector of all the [`AdminUser`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct Admins;
