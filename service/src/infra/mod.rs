//! Infrastructure layer.

pub mod api;

pub use self::api::{Api, Http};
