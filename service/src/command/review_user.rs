//! [`Command`] for approving or rejecting a [`PendingUser`].

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::PendingUser;
use crate::{
    domain::user,
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for approving or rejecting a [`PendingUser`].
#[derive(Clone, Debug)]
pub struct ReviewUser {
    /// ID of the reviewed [`PendingUser`].
    pub id: user::Id,

    /// [`user::Decision`] taken.
    pub decision: user::Decision,
}

impl<A> Command<ReviewUser> for Service<A>
where
    A: Api<Update<user::Review>, Ok = (), Err = Traced<api::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: ReviewUser) -> Result<Self::Ok, Self::Err> {
        let ReviewUser { id, decision } = cmd;

        self.api()
            .execute(Update(user::Review {
                id: id.clone(),
                decision,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;
        log::info!("`User({id})` review: {decision}");

        Ok(())
    }
}

/// Error of [`ReviewUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    #[from]
    Api(api::Error),
}
