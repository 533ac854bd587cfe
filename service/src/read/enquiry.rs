//! [`Enquiry`]-related read definitions.

#[cfg(doc)]
use crate::domain::Enquiry;

/// Selector of the [`Enquiry`]s raised by the authorized customer.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mine;

pub mod list {
    //! Paginated [`Enquiry`] list definitions.

    use common::pagination;

    use crate::domain::Enquiry;

    /// Selector of a [`Page`] of all the [`Enquiry`]s.
    pub type Selector = pagination::Arguments;

    /// Page of [`Enquiry`]s.
    pub type Page = pagination::Page<Enquiry>;
}
