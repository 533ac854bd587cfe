//! [`CartItem`]-related [`Api`] implementations.

use common::operations::{By, Delete, Insert, Select};
use reqwest::Method;
use serde::de::IgnoredAny;
use tracerr::Traced;

use crate::{
    domain::{cart, CartItem},
    infra::{
        api::{self, Http},
        Api,
    },
    read,
};

impl Api<Select<By<Vec<CartItem>, read::cart::Mine>>> for Http {
    type Ok = Vec<CartItem>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<CartItem>, read::cart::Mine>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .send::<Vec<CartItem>>(self.request(Method::GET, &["cart"]))
            .await
            .map_err(tracerr::wrap!())?
            .data
            .unwrap_or_default())
    }
}

impl Api<Insert<cart::New>> for Http {
    type Ok = CartItem;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<cart::New>,
    ) -> Result<Self::Ok, Self::Err> {
        self.send(self.request(Method::POST, &["cart"]).json(&new))
            .await
            .map_err(tracerr::wrap!())?
            .into_data()
            .map_err(tracerr::wrap!())
    }
}

impl Api<Delete<cart::Id>> for Http {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Delete(id): Delete<cart::Id>,
    ) -> Result<Self::Ok, Self::Err> {
        self.send::<IgnoredAny>(
            self.request(Method::DELETE, &["cart", id.as_ref()]),
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
