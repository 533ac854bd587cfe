//! [`Command`] for adding a diamond to the cart.

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{cart, diamond::CertificateNumber, CartItem},
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for adding a diamond to the cart.
#[derive(Clone, Debug)]
pub struct AddToCart {
    /// [`CertificateNumber`] of the diamond to add.
    pub certificate_number: CertificateNumber,
}

impl<A> Command<AddToCart> for Service<A>
where
    A: Api<Insert<cart::New>, Ok = CartItem, Err = Traced<api::Error>>,
{
    type Ok = CartItem;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: AddToCart) -> Result<Self::Ok, Self::Err> {
        let AddToCart { certificate_number } = cmd;

        self.api()
            .execute(Insert(cart::New { certificate_number }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`AddToCart`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    #[from]
    Api(api::Error),
}
