//! [`Query`] collection related to a single [`Listing`].

use common::operations::By;

use crate::domain::{diamond::Lookup, Listing};
#[cfg(doc)]
use crate::{domain::diamond::Key, Query};

use super::ApiQuery;

/// Queries a [`Listing`] by its [`Key`], if it exists.
pub type ByKey = ApiQuery<By<Option<Listing>, Lookup>>;
