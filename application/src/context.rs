//! [`Context`]-related definitions.

use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, RequestPartsExt as _};
use axum_extra::{
    headers::{authorization::Bearer, Authorization, Cookie},
    TypedHeader,
};
use secrecy::SecretString;

use crate::{AsError as _, Error, Service};

/// Name of the cookie carrying the bearer token of browser sessions.
pub const TOKEN_COOKIE: &str = "token";

/// Page sizes offered by the pagination navigation.
#[derive(Clone, Debug)]
pub struct PageSizes(pub Arc<[u32]>);

/// Request context.
#[derive(Clone, Debug)]
pub struct Context {
    /// [`Service`] acting on behalf of the caller.
    service: Service,

    /// Indicator whether the caller provided a bearer token.
    authorized: bool,

    /// Offered [`PageSizes`].
    page_sizes: Arc<[u32]>,
}

impl Context {
    /// Returns [`Service`] instance of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Indicates whether the caller provided a bearer token.
    ///
    /// The token itself is only validated by the remote API.
    #[must_use]
    pub const fn is_authorized(&self) -> bool {
        self.authorized
    }

    /// Returns the page sizes offered by the pagination navigation.
    #[must_use]
    pub fn page_sizes(&self) -> &[u32] {
        &self.page_sizes
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Context
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let service = parts
            .extensions
            .get::<Service>()
            .cloned()
            .ok_or_else(|| Error::internal(&"missing `Service` extension"))?;
        let page_sizes = parts
            .extensions
            .get::<PageSizes>()
            .map_or_else(|| Arc::from([]), |s| s.0.clone());

        let token = match parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
        {
            Ok(TypedHeader(Authorization(bearer))) => {
                Some(bearer.token().to_owned())
            }
            Err(e) if e.is_missing() => parts
                .extract::<TypedHeader<Cookie>>()
                .await
                .ok()
                .and_then(|TypedHeader(c)| {
                    c.get(TOKEN_COOKIE).map(ToOwned::to_owned)
                }),
            Err(e) => return Err(e.into_error()),
        };

        Ok(match token {
            Some(token) => Self {
                service: service.authorized(SecretString::from(token)),
                authorized: true,
                page_sizes,
            },
            None => Self {
                service,
                authorized: false,
                page_sizes,
            },
        })
    }
}
