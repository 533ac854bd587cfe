//! [`Command`] for raising a new [`Enquiry`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{diamond::CertificateNumber, enquiry, Enquiry},
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for raising a new [`Enquiry`].
#[derive(Clone, Debug)]
pub struct CreateEnquiry {
    /// [`enquiry::Subject`] of the new [`Enquiry`].
    pub subject: enquiry::Subject,

    /// [`enquiry::Message`] of the new [`Enquiry`].
    pub message: enquiry::Message,

    /// [`CertificateNumber`] of the diamond being asked about, if any.
    pub certificate_number: Option<CertificateNumber>,
}

impl<A> Command<CreateEnquiry> for Service<A>
where
    A: Api<Insert<enquiry::New>, Ok = Enquiry, Err = Traced<api::Error>>,
{
    type Ok = Enquiry;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateEnquiry,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateEnquiry {
            subject,
            message,
            certificate_number,
        } = cmd;

        self.api()
            .execute(Insert(enquiry::New {
                subject,
                message,
                certificate_number,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`CreateEnquiry`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    #[from]
    Api(api::Error),
}
