//! [`Command`] for removing an [`AdminUser`].

use common::operations::Delete;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::AdminUser;
use crate::{
    domain::user,
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for removing an [`AdminUser`].
#[derive(Clone, Debug)]
pub struct RemoveAdmin {
    /// ID of the [`AdminUser`] to remove.
    pub id: user::Id,
}

impl<A> Command<RemoveAdmin> for Service<A>
where
    A: Api<Delete<user::Id>, Ok = (), Err = Traced<api::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: RemoveAdmin) -> Result<Self::Ok, Self::Err> {
        let RemoveAdmin { id } = cmd;

        self.api()
            .execute(Delete(id.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;
        log::info!("`AdminUser({id})` removed");

        Ok(())
    }
}

/// Error of [`RemoveAdmin`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    #[from]
    Api(api::Error),
}
