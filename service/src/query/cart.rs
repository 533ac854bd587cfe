//! [`Query`] collection related to the [`CartItem`]s.

use common::operations::By;

use crate::{domain::CartItem, read};
#[cfg(doc)]
use crate::Query;

use super::ApiQuery;

/// Queries the [`CartItem`]s of the authorized customer.
pub type Items = ApiQuery<By<Vec<CartItem>, read::cart::Mine>>;
