//! [`Command`] for submitting a [`FormSubmission`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{enquiry, submission, user, FormSubmission},
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for submitting a [`FormSubmission`].
#[derive(Clone, Debug)]
pub struct SubmitForm {
    /// [`submission::Kind`] of the form.
    pub kind: submission::Kind,

    /// [`user::Name`] of the submitter.
    pub name: user::Name,

    /// [`user::Email`] of the submitter.
    pub email: user::Email,

    /// [`user::Phone`] of the submitter, if provided.
    pub phone: Option<user::Phone>,

    /// [`enquiry::Message`] of the submitter.
    pub message: enquiry::Message,
}

impl<A> Command<SubmitForm> for Service<A>
where
    A: Api<
        Insert<submission::New>,
        Ok = FormSubmission,
        Err = Traced<api::Error>,
    >,
{
    type Ok = FormSubmission;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SubmitForm) -> Result<Self::Ok, Self::Err> {
        let SubmitForm {
            kind,
            name,
            email,
            phone,
            message,
        } = cmd;

        self.api()
            .execute(Insert(submission::New {
                kind,
                name,
                email,
                phone,
                message,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`SubmitForm`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    #[from]
    Api(api::Error),
}
