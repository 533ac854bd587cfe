//! [`Command`] for creating a new [`AdminUser`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use secrecy::SecretBox;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{user, AdminUser},
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`AdminUser`].
#[derive(Clone, Debug)]
pub struct CreateAdmin {
    /// [`user::Name`] of the new [`AdminUser`].
    pub name: user::Name,

    /// [`user::Email`] of the new [`AdminUser`].
    pub email: user::Email,

    /// Initial [`user::Password`] of the new [`AdminUser`].
    pub password: SecretBox<user::Password>,

    /// [`user::Role`] of the new [`AdminUser`].
    pub role: user::Role,
}

impl<A> Command<CreateAdmin> for Service<A>
where
    A: Api<Insert<user::NewAdmin>, Ok = AdminUser, Err = Traced<api::Error>>,
{
    type Ok = AdminUser;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateAdmin) -> Result<Self::Ok, Self::Err> {
        let CreateAdmin {
            name,
            email,
            password,
            role,
        } = cmd;

        let admin = self
            .api()
            .execute(Insert(user::NewAdmin {
                name,
                email,
                password,
                role,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))?;
        log::info!(
            "`AdminUser({})` created with `{}` role",
            admin.id,
            admin.role,
        );

        Ok(admin)
    }
}

/// Error of [`CreateAdmin`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    #[from]
    Api(api::Error),
}
