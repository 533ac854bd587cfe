//! Service contains the business logic of the diamond storefront.
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod browse;
pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;

use std::time::Duration;

use secrecy::SecretString;
use smart_default::SmartDefault;

#[cfg(doc)]
use crate::infra::Api;

pub use self::{command::Command, infra::Http, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Quiet period coalescing bursts of browsing changes into a single page
    /// request.
    #[default(Duration::from_millis(500))]
    pub debounce: Duration,

    /// Default number of [`Listing`]s per page.
    ///
    /// [`Listing`]: domain::Listing
    #[default(common::pagination::Arguments::DEFAULT_LIMIT)]
    pub page_size: u32,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<A> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Api`] of this [`Service`].
    api: A,
}

impl<A> Service<A> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub const fn new(config: Config, api: A) -> Self {
        Self { config, api }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Api`] of this [`Service`].
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Starts a new [`browse::Session`] with the configured page size.
    #[must_use]
    pub fn session(&self) -> browse::Session {
        browse::Session::new(self.config.page_size)
    }

    /// Creates a new [`browse::Debounce`] with the configured window.
    #[must_use]
    pub const fn debounce(&self) -> browse::Debounce {
        browse::Debounce::new(self.config.debounce)
    }
}

impl Service<Http> {
    /// Returns a copy of this [`Service`] acting on behalf of the user
    /// authorized with the provided `token`.
    #[must_use]
    pub fn authorized(&self, token: SecretString) -> Self {
        Self {
            config: self.config,
            api: self.api.authorized(token),
        }
    }
}
