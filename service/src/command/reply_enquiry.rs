//! [`Command`] for replying to an [`Enquiry`].

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{enquiry, Enquiry},
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for replying to an [`Enquiry`].
#[derive(Clone, Debug)]
pub struct ReplyEnquiry {
    /// ID of the [`Enquiry`] to reply to.
    pub id: enquiry::Id,

    /// [`enquiry::Message`] of the reply.
    pub message: enquiry::Message,
}

impl<A> Command<ReplyEnquiry> for Service<A>
where
    A: Api<Update<enquiry::Reply>, Ok = Enquiry, Err = Traced<api::Error>>,
{
    type Ok = Enquiry;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: ReplyEnquiry) -> Result<Self::Ok, Self::Err> {
        let ReplyEnquiry { id, message } = cmd;

        let enquiry = self
            .api()
            .execute(Update(enquiry::Reply { id, message }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;
        log::info!("`Enquiry({})` replied", enquiry.id);

        Ok(enquiry)
    }
}

/// Error of [`ReplyEnquiry`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    #[from]
    Api(api::Error),
}
