//! [`Query`] collection related to the back-office users.

use common::operations::By;

use crate::{
    domain::{AdminUser, PendingUser},
    read,
};
#[cfg(doc)]
use crate::Query;

use super::ApiQuery;

/// Queries the [`PendingUser`]s awaiting a review.
pub type Pending = ApiQuery<By<Vec<PendingUser>, read::user::Pending>>;

/// Queries all the [`AdminUser`]s.
pub type Admins = ApiQuery<By<Vec<AdminUser>, read::user::Admins>>;
