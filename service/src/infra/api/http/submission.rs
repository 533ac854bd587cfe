//! [`FormSubmission`]-related [`Api`] implementations.

use common::operations::{By, Insert, Select};
use reqwest::Method;
use tracerr::Traced;

use crate::{
    domain::{submission, FormSubmission},
    infra::{
        api::{self, params, Http},
        Api,
    },
    read::submission::list,
};

impl Api<Insert<submission::New>> for Http {
    type Ok = FormSubmission;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<submission::New>,
    ) -> Result<Self::Ok, Self::Err> {
        self.send(self.request(Method::POST, &["submissions"]).json(&new))
            .await
            .map_err(tracerr::wrap!())?
            .into_data()
            .map_err(tracerr::wrap!())
    }
}

impl Api<Select<By<list::Page, list::Selector>>> for Http {
    type Ok = list::Page;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self
            .request(Method::GET, &["admin", "submissions"])
            .query(&params::pagination(by.into_inner()));
        Ok(self
            .send::<Vec<FormSubmission>>(req)
            .await
            .map_err(tracerr::wrap!())?
            .into_page())
    }
}
