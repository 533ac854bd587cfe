//! [`FormSubmission`]-related read definitions.

#[cfg(doc)]
use crate::domain::FormSubmission;

pub mod list {
    //! Paginated [`FormSubmission`] list definitions.

    use common::pagination;

    use crate::domain::FormSubmission;

    /// Selector of a [`Page`] of [`FormSubmission`]s.
    pub type Selector = pagination::Arguments;

    /// Page of [`FormSubmission`]s.
    pub type Page = pagination::Page<FormSubmission>;
}
