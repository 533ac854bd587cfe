//! [`CartItem`]-related read definitions.

#[cfg(doc)]
use crate::domain::CartItem;

/// Selector of the [`CartItem`]s belonging to the authorized customer.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mine;
