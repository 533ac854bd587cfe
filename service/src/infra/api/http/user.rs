//! [`PendingUser`] and [`AdminUser`] [`Api`] implementations.

use common::{
    operations::{By, Delete, Insert, Select, Update},
    Kind as _,
};
use reqwest::Method;
use secrecy::ExposeSecret as _;
use serde::de::IgnoredAny;
use tracerr::Traced;

use crate::{
    domain::{user, AdminUser, PendingUser},
    infra::{
        api::{self, Http},
        Api,
    },
    read,
};

impl Api<Select<By<Vec<PendingUser>, read::user::Pending>>> for Http {
    type Ok = Vec<PendingUser>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<PendingUser>, read::user::Pending>>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self.request(Method::GET, &["admin", "users", "pending"]);
        Ok(self
            .send::<Vec<PendingUser>>(req)
            .await
            .map_err(tracerr::wrap!())?
            .data
            .unwrap_or_default())
    }
}

impl Api<Update<user::Review>> for Http {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Update(review): Update<user::Review>,
    ) -> Result<Self::Ok, Self::Err> {
        let user::Review { id, decision } = review;

        let req = self.request(
            Method::PATCH,
            &["admin", "users", id.as_ref(), decision.as_str()],
        );
        self.send::<IgnoredAny>(req)
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl Api<Select<By<Vec<AdminUser>, read::user::Admins>>> for Http {
    type Ok = Vec<AdminUser>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<AdminUser>, read::user::Admins>>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self.request(Method::GET, &["admin", "admins"]);
        Ok(self
            .send::<Vec<AdminUser>>(req)
            .await
            .map_err(tracerr::wrap!())?
            .data
            .unwrap_or_default())
    }
}

impl Api<Insert<user::NewAdmin>> for Http {
    type Ok = AdminUser;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<user::NewAdmin>,
    ) -> Result<Self::Ok, Self::Err> {
        let user::NewAdmin {
            name,
            email,
            password,
            role,
        } = new;

        let req = self.request(Method::POST, &["admin", "admins"]).json(
            &serde_json::json!({
                "name": name,
                "email": email,
                "password": password.expose_secret().as_str(),
                "role": role,
            }),
        );
        self.send(req)
            .await
            .map_err(tracerr::wrap!())?
            .into_data()
            .map_err(tracerr::wrap!())
    }
}

impl Api<Delete<user::Id>> for Http {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Delete(id): Delete<user::Id>,
    ) -> Result<Self::Ok, Self::Err> {
        self.send::<IgnoredAny>(
            self.request(Method::DELETE, &["admin", "admins", id.as_ref()]),
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
