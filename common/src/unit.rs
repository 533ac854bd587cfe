//! Marker types describing moments in an entity lifecycle.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing an item being added to a collection.
#[derive(Clone, Copy, Debug)]
pub struct Addition;

/// Marker type describing a reply being sent.
#[derive(Clone, Copy, Debug)]
pub struct Reply;

/// Marker type describing a form being submitted.
#[derive(Clone, Copy, Debug)]
pub struct Submission;
