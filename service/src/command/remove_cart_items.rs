//! [`Command`] for removing multiple [`CartItem`]s at once.

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use futures::future;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{cart, CartItem},
    infra::{api, Api},
    read,
    Service,
};

use super::Command;

/// [`Command`] for removing multiple [`CartItem`]s at once.
///
/// Deletions are issued concurrently. Once all of them succeed, the cart is
/// refetched exactly once and returned, so the caller may clear its
/// selection and re-render.
#[derive(Clone, Debug)]
pub struct RemoveCartItems {
    /// IDs of the [`CartItem`]s to remove.
    pub ids: Vec<cart::Id>,
}

impl<A> Command<RemoveCartItems> for Service<A>
where
    A: Api<Delete<cart::Id>, Ok = (), Err = Traced<api::Error>>
        + Api<
            Select<By<Vec<CartItem>, read::cart::Mine>>,
            Ok = Vec<CartItem>,
            Err = Traced<api::Error>,
        >,
{
    type Ok = Vec<CartItem>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RemoveCartItems,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RemoveCartItems { ids } = cmd;
        if ids.is_empty() {
            return Err(tracerr::new!(E::NothingSelected));
        }

        let count = ids.len();
        _ = future::try_join_all(
            ids.into_iter().map(|id| self.api().execute(Delete(id))),
        )
        .await
        .map_err(tracerr::map_from_and_wrap!(=> E))?;
        log::debug!("removed {count} cart items");

        self.api()
            .execute(Select(By::<Vec<CartItem>, _>::new(read::cart::Mine)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`RemoveCartItems`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    #[from]
    Api(api::Error),

    /// No [`CartItem`] is selected for removal.
    #[display("No cart items selected")]
    NothingSelected,
}

#[cfg(test)]
mod spec {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use common::operations::{By, Delete, Select};
    use tracerr::Traced;

    use crate::{
        domain::{cart, CartItem},
        infra::{api, Api},
        read, Config, Service,
    };

    use super::{Command as _, ExecutionError, RemoveCartItems};

    /// In-memory cart [`Api`] counting the issued requests.
    #[derive(Debug, Default)]
    struct Cart {
        deleted: Mutex<Vec<cart::Id>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        fetches: AtomicUsize,
        fail_on: Option<cart::Id>,
    }

    impl Api<Delete<cart::Id>> for Cart {
        type Ok = ();
        type Err = Traced<api::Error>;

        async fn execute(
            &self,
            Delete(id): Delete<cart::Id>,
        ) -> Result<Self::Ok, Self::Err> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            _ = self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::task::yield_now().await;
            _ = self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail_on.as_ref() == Some(&id) {
                return Err(tracerr::new!(api::Error::Rejected(
                    "Item is locked".into(),
                )));
            }
            self.deleted.lock().unwrap().push(id);
            Ok(())
        }
    }

    impl Api<Select<By<Vec<CartItem>, read::cart::Mine>>> for Cart {
        type Ok = Vec<CartItem>;
        type Err = Traced<api::Error>;

        async fn execute(
            &self,
            _: Select<By<Vec<CartItem>, read::cart::Mine>>,
        ) -> Result<Self::Ok, Self::Err> {
            _ = self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }
    }

    fn ids(raw: &[&str]) -> Vec<cart::Id> {
        raw.iter().copied().map(cart::Id::from).collect()
    }

    #[tokio::test]
    async fn deletes_concurrently_then_refetches_once() {
        let svc = Service::new(Config::default(), Cart::default());

        let cart = svc
            .execute(RemoveCartItems {
                ids: ids(&["a", "b", "c"]),
            })
            .await
            .unwrap();

        let api = svc.api();
        assert!(cart.is_empty());
        assert_eq!(api.deleted.lock().unwrap().len(), 3);
        assert_eq!(api.max_in_flight.load(Ordering::SeqCst), 3);
        assert_eq!(api.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_deletion_skips_refetch() {
        let svc = Service::new(
            Config::default(),
            Cart {
                fail_on: Some("b".into()),
                ..Cart::default()
            },
        );

        let err = svc
            .execute(RemoveCartItems {
                ids: ids(&["a", "b", "c"]),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Api(_)));
        assert_eq!(svc.api().fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_selection_is_rejected() {
        let svc = Service::new(Config::default(), Cart::default());

        let err = svc
            .execute(RemoveCartItems { ids: vec![] })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NothingSelected));
        assert_eq!(svc.api().fetches.load(Ordering::SeqCst), 0);
    }
}
