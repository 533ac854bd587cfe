//! [`Query`] collection related to the multiple [`FormSubmission`]s.

use common::operations::By;

use crate::read::submission::list;
#[cfg(doc)]
use crate::{domain::FormSubmission, Query};

use super::ApiQuery;

/// Queries a page of [`FormSubmission`]s.
pub type List = ApiQuery<By<list::Page, list::Selector>>;
