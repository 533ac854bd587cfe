//! [`Enquiry`]-related [`Api`] implementations.

use common::operations::{By, Insert, Select, Update};
use reqwest::Method;
use tracerr::Traced;

use crate::{
    domain::{enquiry, Enquiry},
    infra::{
        api::{self, params, Http},
        Api,
    },
    read,
};

impl Api<Select<By<Vec<Enquiry>, read::enquiry::Mine>>> for Http {
    type Ok = Vec<Enquiry>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Enquiry>, read::enquiry::Mine>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .send::<Vec<Enquiry>>(self.request(Method::GET, &["enquiries"]))
            .await
            .map_err(tracerr::wrap!())?
            .data
            .unwrap_or_default())
    }
}

impl
    Api<
        Select<
            By<read::enquiry::list::Page, read::enquiry::list::Selector>,
        >,
    > for Http
{
    type Ok = read::enquiry::list::Page;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::enquiry::list::Page, read::enquiry::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self
            .request(Method::GET, &["admin", "enquiries"])
            .query(&params::pagination(by.into_inner()));
        Ok(self
            .send::<Vec<Enquiry>>(req)
            .await
            .map_err(tracerr::wrap!())?
            .into_page())
    }
}

impl Api<Insert<enquiry::New>> for Http {
    type Ok = Enquiry;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<enquiry::New>,
    ) -> Result<Self::Ok, Self::Err> {
        self.send(self.request(Method::POST, &["enquiries"]).json(&new))
            .await
            .map_err(tracerr::wrap!())?
            .into_data()
            .map_err(tracerr::wrap!())
    }
}

impl Api<Update<enquiry::Reply>> for Http {
    type Ok = Enquiry;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Update(reply): Update<enquiry::Reply>,
    ) -> Result<Self::Ok, Self::Err> {
        let enquiry::Reply { id, message } = reply;

        let req = self
            .request(
                Method::POST,
                &["admin", "enquiries", id.as_ref(), "reply"],
            )
            .json(&serde_json::json!({ "reply": message }));
        self.send(req)
            .await
            .map_err(tracerr::wrap!())?
            .into_data()
            .map_err(tracerr::wrap!())
    }
}
