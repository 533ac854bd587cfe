//! [`Listing`]-related [`Api`] implementations.

use common::operations::{By, Select};
use reqwest::Method;
use tracerr::Traced;

use crate::{
    domain::{
        diamond::{Audience, Lookup},
        Diamond, Listing, PublicDiamond,
    },
    infra::{
        api::{self, params, Http},
        Api,
    },
    read::diamond::list,
};

impl Api<Select<By<list::Page, list::Request>>> for Http {
    type Ok = list::Page;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Request>>,
    ) -> Result<Self::Ok, Self::Err> {
        let list::Request {
            endpoint,
            audience,
            selector,
        } = by.into_inner();

        let req = self
            .request(Method::GET, endpoint.path())
            .query(&params::encode(endpoint, &selector));
        Ok(match audience {
            Audience::Staff => self
                .send::<Vec<Diamond>>(req)
                .await
                .map_err(tracerr::wrap!())?
                .into_page()
                .map(Listing::Internal),
            Audience::Customer => self
                .send::<Vec<PublicDiamond>>(req)
                .await
                .map_err(tracerr::wrap!())?
                .into_page()
                .map(Listing::Public),
        })
    }
}

impl Api<Select<By<Option<Listing>, Lookup>>> for Http {
    type Ok = Option<Listing>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, Lookup>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Lookup { key, audience } = by.into_inner();

        let key = key.to_string();
        let req = self.request(Method::GET, &["diamonds", key.as_str()]);
        let listing = match audience {
            Audience::Staff => self
                .send::<Diamond>(req)
                .await
                .and_then(|e| e.into_data().map_err(tracerr::wrap!()))
                .map(Listing::Internal),
            Audience::Customer => self
                .send::<PublicDiamond>(req)
                .await
                .and_then(|e| e.into_data().map_err(tracerr::wrap!()))
                .map(Listing::Public),
        };
        match listing {
            Ok(l) => Ok(Some(l)),
            Err(e) if e.as_ref().is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
