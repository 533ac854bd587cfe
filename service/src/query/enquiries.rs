//! [`Query`] collection related to the multiple [`Enquiry`]s.

use common::operations::By;

use crate::{domain::Enquiry, read};
#[cfg(doc)]
use crate::Query;

use super::ApiQuery;

/// Queries the [`Enquiry`]s raised by the authorized customer.
pub type Mine = ApiQuery<By<Vec<Enquiry>, read::enquiry::Mine>>;

/// Queries a page of all the [`Enquiry`]s.
pub type All = ApiQuery<
    By<read::enquiry::list::Page, read::enquiry::list::Selector>,
>;
