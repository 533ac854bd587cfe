//! [`Query`] collection related to the multiple [`Listing`]s.

use common::operations::{By, Select};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::diamond::Audience,
    infra::{api, Api},
    read::diamond::list::{self, Endpoint, Selector},
    Service,
};
#[cfg(doc)]
use crate::domain::{Filter, Listing};

use super::{ApiQuery, Query};

/// Queries a page of [`Listing`]s from the explicitly chosen [`Endpoint`].
pub type ByRequest = ApiQuery<By<list::Page, list::Request>>;

/// Queries a page of [`Listing`]s from the [`Endpoint`] matching the
/// [`Filter`]: [`Endpoint::Search`] when any filter is active,
/// [`Endpoint::List`] otherwise.
#[derive(Clone, Debug)]
pub struct Browse {
    /// [`Audience`] to shape the [`Listing`]s for.
    pub audience: Audience,

    /// [`Selector`] of the page.
    pub selector: Selector,
}

/// Queries a page of [`Listing`]s from the [`Endpoint::List`].
#[derive(Clone, Debug)]
pub struct List {
    /// [`Audience`] to shape the [`Listing`]s for.
    pub audience: Audience,

    /// [`Selector`] of the page.
    pub selector: Selector,
}

/// Queries a page of [`Listing`]s from the [`Endpoint::Search`].
#[derive(Clone, Debug)]
pub struct Search {
    /// [`Audience`] to shape the [`Listing`]s for.
    pub audience: Audience,

    /// [`Selector`] of the page.
    pub selector: Selector,
}

impl<A> Query<Browse> for Service<A>
where
    A: Api<
        Select<By<list::Page, list::Request>>,
        Ok = list::Page,
        Err = Traced<api::Error>,
    >,
{
    type Ok = list::Page;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Browse { audience, selector }: Browse,
    ) -> Result<Self::Ok, Self::Err> {
        let req = list::Request::browse(audience, selector);
        log::debug!("browsing `{:?}` endpoint", req.endpoint);

        self.execute(ByRequest::by(req))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<A> Query<List> for Service<A>
where
    A: Api<
        Select<By<list::Page, list::Request>>,
        Ok = list::Page,
        Err = Traced<api::Error>,
    >,
{
    type Ok = list::Page;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        List { audience, selector }: List,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(ByRequest::by(list::Request {
            endpoint: Endpoint::List,
            audience,
            selector,
        }))
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<A> Query<Search> for Service<A>
where
    A: Api<
        Select<By<list::Page, list::Request>>,
        Ok = list::Page,
        Err = Traced<api::Error>,
    >,
{
    type Ok = list::Page;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Search { audience, selector }: Search,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(ByRequest::by(list::Request {
            endpoint: Endpoint::Search,
            audience,
            selector,
        }))
        .await
        .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use std::sync::Mutex;

    use common::{
        operations::{By, Select},
        Range,
    };
    use rust_decimal::Decimal;
    use tracerr::Traced;

    use crate::{
        domain::{diamond::Audience, filter::RangeKey, Filter},
        infra::{api, Api},
        read::diamond::list::{self, Endpoint, Selector},
        Config, Service,
    };

    use super::{Browse, Query as _, Search};

    /// [`Api`] recording the requested endpoints.
    #[derive(Debug, Default)]
    struct Recorder(Mutex<Vec<Endpoint>>);

    impl Api<Select<By<list::Page, list::Request>>> for Recorder {
        type Ok = list::Page;
        type Err = Traced<api::Error>;

        async fn execute(
            &self,
            Select(by): Select<By<list::Page, list::Request>>,
        ) -> Result<Self::Ok, Self::Err> {
            self.0.lock().unwrap().push(by.into_inner().endpoint);
            Ok(list::Page::default())
        }
    }

    #[tokio::test]
    async fn browse_picks_endpoint_by_active_filters() {
        let svc = Service::new(Config::default(), Recorder::default());
        let active = Filter::default()
            .with_range(
                RangeKey::Price,
                Range::new(Decimal::ONE, Decimal::TEN),
            );

        for filter in [Filter::default(), active.clone()] {
            _ = svc
                .execute(Browse {
                    audience: Audience::Customer,
                    selector: Selector {
                        filter,
                        ..Selector::default()
                    },
                })
                .await
                .unwrap();
        }
        _ = svc
            .execute(Search {
                audience: Audience::Staff,
                selector: Selector::default(),
            })
            .await
            .unwrap();

        assert_eq!(
            *svc.api().0.lock().unwrap(),
            [Endpoint::List, Endpoint::Search, Endpoint::Search],
        );
    }
}
