//! HTTP [`Api`] implementation.

mod cart;
mod diamond;
mod enquiry;
mod submission;
mod user;

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Url};
use secrecy::{ExposeSecret as _, SecretString};
use serde::de::DeserializeOwned;
use tracerr::Traced;
use tracing as log;

use crate::infra::api::{self, Envelope};
#[cfg(doc)]
use crate::infra::Api;

/// [`Http`] client configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL every endpoint path is appended to.
    pub base_url: Url,

    /// Timeout of a whole request, if any.
    pub timeout: Option<Duration>,

    /// Bearer token to authorize requests with, if any.
    pub token: Option<SecretString>,
}

/// [`Api`] client talking JSON over HTTP.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// Base URL every endpoint path is appended to.
    base_url: Url,

    /// Bearer token to authorize requests with, if any.
    token: Option<SecretString>,
}

impl Http {
    /// Creates a new [`Http`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the [`Config::base_url`] cannot be a base, or the underlying client
    /// fails to initialize.
    pub fn new(conf: Config) -> Result<Self, Traced<api::Error>> {
        let Config {
            base_url,
            timeout,
            token,
        } = conf;

        if base_url.cannot_be_a_base() {
            return Err(tracerr::new!(api::Error::BaseUrl(base_url.into())));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(tracerr::from_and_wrap!(=> api::Error))?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Returns a copy of this [`Http`] client authorizing its requests with
    /// the provided `token` instead of the configured one.
    #[must_use]
    pub fn authorized(&self, token: SecretString) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    /// Builds the URL of the endpoint at the provided path `segments`.
    fn endpoint<S: AsRef<str>>(&self, segments: &[S]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            _ = path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Starts a request to the endpoint at the provided path `segments`.
    fn request<S: AsRef<str>>(
        &self,
        method: Method,
        segments: &[S],
    ) -> RequestBuilder {
        let req = self.client.request(method, self.endpoint(segments));
        match &self.token {
            Some(token) => req.bearer_auth(token.expose_secret()),
            None => req,
        }
    }

    /// Sends the provided request and decodes its [`Envelope`].
    async fn send<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> Result<Envelope<T>, Traced<api::Error>> {
        let resp = req
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> api::Error))?;
        let (status, url) = (resp.status(), resp.url().clone());
        let body = resp
            .bytes()
            .await
            .map_err(tracerr::from_and_wrap!(=> api::Error))?;

        Envelope::decode(status.as_u16(), &body).map_err(|e| {
            log::warn!("`{url}` responded with `{status}`: {e}");
            tracerr::new!(e)
        })
    }
}

#[cfg(test)]
mod spec {
    use reqwest::Url;

    use super::{Config, Http};

    fn http(base: &str) -> Http {
        Http::new(Config {
            base_url: Url::parse(base).unwrap(),
            timeout: None,
            token: None,
        })
        .unwrap()
    }

    #[test]
    fn appends_segments_to_base_path() {
        let api = http("http://127.0.0.1:5000/api");
        assert_eq!(
            api.endpoint(&["diamonds", "search"]).as_str(),
            "http://127.0.0.1:5000/api/diamonds/search",
        );

        let api = http("http://127.0.0.1:5000/api/");
        assert_eq!(
            api.endpoint(&["admin", "users", "pending"]).as_str(),
            "http://127.0.0.1:5000/api/admin/users/pending",
        );
    }

    #[test]
    fn escapes_path_segments() {
        let api = http("http://api.test");
        assert_eq!(
            api.endpoint(&["diamonds", "a/b c"]).as_str(),
            "http://api.test/diamonds/a%2Fb%20c",
        );
    }

    #[test]
    fn rejects_non_base_url() {
        assert!(Http::new(Config {
            base_url: Url::parse("mailto:ops@example.com").unwrap(),
            timeout: None,
            token: None,
        })
        .is_err());
    }
}
