//! [`Command`] for creating a new [`Transaction`].

use common::{
    operations::{Insert, Update},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::command::ApplyTransactionStatus;
use crate::{
    domain::{animal, client, transaction, Animal, Transaction},
    infra::{database, Database},
    Service,
};
#[cfg(doc)]
use crate::domain::Client;

use super::Command;

/// [`Command`] for creating a new [`Transaction`], selling or donating an
/// [`Animal`] to a [`Client`].
///
/// The [`Transaction`] is recorded first, and only then the [`Animal`] takes
/// the [`animal::Status`] resulting from it. These two writes are not atomic:
/// if the second one fails, the [`Transaction`] stays recorded while the
/// [`Animal`] keeps its previous [`animal::Status`], which is reported as
/// [`ExecutionError::StatusNotUpdated`].
///
/// Neither the [`Animal`] availability is checked, nor the [`Animal`] is
/// reserved, so concurrent [`Transaction`]s may sell the same [`Animal`]
/// twice.
#[derive(Clone, Debug)]
pub struct CreateTransaction {
    /// ID of the [`Animal`] being sold or donated.
    pub animal_id: animal::Id,

    /// ID of the [`Client`] receiving the [`Animal`].
    pub client_id: client::Id,

    /// [`transaction::Kind`] of a new [`Transaction`].
    pub kind: transaction::Kind,

    /// Final amount of a new [`Transaction`].
    ///
    /// Required for a [`transaction::Kind::Sale`], and ignored for a
    /// [`transaction::Kind::Donation`], which is always free.
    pub amount: Option<Money>,

    /// [`transaction::Notes`] of a new [`Transaction`].
    pub notes: Option<transaction::Notes>,
}

impl<Db> Command<CreateTransaction> for Service<Db>
where
    Db: Database<
            Insert<transaction::New>,
            Ok = Transaction,
            Err = Traced<database::Error>,
        > + Database<
            Update<animal::Patch>,
            Ok = Animal,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Transaction;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateTransaction,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateTransaction {
            animal_id,
            client_id,
            kind,
            amount,
            notes,
        } = cmd;

        let amount = match kind {
            transaction::Kind::Sale => amount
                .ok_or(E::AmountRequired)
                .map_err(tracerr::wrap!())?,
            transaction::Kind::Donation => Money::ZERO,
        };

        let transaction = self
            .database()
            .execute(Insert(transaction::New {
                animal_id,
                client_id,
                kind,
                amount,
                notes,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let status = kind.resulting_status();
        match self
            .database()
            .execute(Update(animal::Patch::status(animal_id, status)))
            .await
        {
            Ok(_) => Ok(transaction),
            Err(e) => {
                log::warn!(
                    "`Transaction(id: {})` is recorded, but `Animal(id: {})` \
                     status is not updated to `{status}`: {e}",
                    transaction.id,
                    animal_id,
                );
                Err(tracerr::new!(E::StatusNotUpdated {
                    transaction,
                    source: e.into_inner(),
                }))
            }
        }
    }
}

/// Error of [`CreateTransaction`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Transaction`] is not recorded, because of a [`Database`] error.
    ///
    /// Nothing has been written.
    #[display("`Transaction` is not recorded: {_0}")]
    NotRecorded(database::Error),

    /// [`transaction::Kind::Sale`] is missing its amount.
    #[display("`Sale` requires an amount")]
    #[from(ignore)]
    AmountRequired,

    /// [`Transaction`] is recorded, but the [`Animal`] status is not updated
    /// because of a [`Database`] error.
    ///
    /// May be reconciled with the [`ApplyTransactionStatus`] command.
    #[display(
        "`Transaction(id: {})` is recorded, but `Animal(id: {})` status is \
         not updated: {source}",
        transaction.id,
        transaction.animal_id,
    )]
    #[from(ignore)]
    StatusNotUpdated {
        /// Recorded [`Transaction`].
        transaction: Transaction,

        /// [`Database`] error of the status update.
        source: database::Error,
    },
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::{
        command::create_animal::spec::create_rex,
        domain::{animal, client, transaction, Animal, Transaction},
        infra::{
            memory::{Fault, Method},
            Memory,
        },
        query, Command as _, Query as _, Service,
    };

    use super::{CreateTransaction, ExecutionError};

    async fn setup() -> (Service<Memory>, Animal) {
        let service = Service::new(Default::default(), Memory::new());
        let rex: Animal = service.execute(create_rex()).await.unwrap();
        (service, rex)
    }

    fn money(amount: &str) -> Money {
        amount.parse().unwrap()
    }

    async fn animal(service: &Service<Memory>, id: animal::Id) -> Animal {
        service
            .execute(query::animal::ById::by(id))
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn sale_sells_animal() {
        let (service, rex) = setup().await;

        let sale = service
            .execute(CreateTransaction {
                animal_id: rex.id,
                client_id: 7.into(),
                kind: transaction::Kind::Sale,
                amount: Some(money("450")),
                notes: None,
            })
            .await
            .unwrap();

        assert_eq!(sale.kind, transaction::Kind::Sale);
        assert_eq!(sale.amount, money("450"));
        assert_eq!(sale.animal_id, rex.id);
        assert_eq!(animal(&service, rex.id).await.status, animal::Status::Sold);
    }

    #[tokio::test]
    async fn donation_is_free_and_adopts_animal() {
        let (service, rex) = setup().await;

        let donation = service
            .execute(CreateTransaction {
                animal_id: rex.id,
                client_id: 7.into(),
                kind: transaction::Kind::Donation,
                amount: Some(money("120")),
                notes: Some("Good home".parse().unwrap()),
            })
            .await
            .unwrap();

        assert_eq!(donation.amount, Money::ZERO);
        assert_eq!(
            animal(&service, rex.id).await.status,
            animal::Status::Adopted,
        );
    }

    #[tokio::test]
    async fn sale_without_amount_writes_nothing() {
        let (service, rex) = setup().await;

        let err = service
            .execute(CreateTransaction {
                animal_id: rex.id,
                client_id: 7.into(),
                kind: transaction::Kind::Sale,
                amount: None,
                notes: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::AmountRequired));
        assert!(service
            .execute(query::transaction::List::by(()))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn failed_recording_is_not_recorded() {
        let (service, rex) = setup().await;
        service
            .database()
            .inject(Fault::new::<Transaction>(Method::Post))
            .await;

        let err = service
            .execute(CreateTransaction {
                animal_id: rex.id,
                client_id: 7.into(),
                kind: transaction::Kind::Sale,
                amount: Some(money("450")),
                notes: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NotRecorded(_)));
        assert_eq!(
            animal(&service, rex.id).await.status,
            animal::Status::Available,
        );
    }

    #[tokio::test]
    async fn failed_status_update_is_partially_completed() {
        let (service, rex) = setup().await;
        service
            .database()
            .inject(Fault::new::<Animal>(Method::Put))
            .await;

        let err = service
            .execute(CreateTransaction {
                animal_id: rex.id,
                client_id: 7.into(),
                kind: transaction::Kind::Sale,
                amount: Some(money("450")),
                notes: None,
            })
            .await
            .unwrap_err();

        let ExecutionError::StatusNotUpdated { transaction, .. } = err.as_ref()
        else {
            panic!("expected `StatusNotUpdated`, got: {err}");
        };
        let recorded: Vec<Transaction> = service
            .execute(query::transaction::List::by(()))
            .await
            .unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].id, transaction.id);
        assert_eq!(
            animal(&service, rex.id).await.status,
            animal::Status::Available,
        );
    }

    #[tokio::test]
    async fn does_not_guard_repeated_transactions() {
        let (service, rex) = setup().await;

        for kind in [transaction::Kind::Sale, transaction::Kind::Donation] {
            service
                .execute(CreateTransaction {
                    animal_id: rex.id,
                    client_id: client::Id::from(7),
                    kind,
                    amount: Some(money("10")),
                    notes: None,
                })
                .await
                .unwrap();
        }

        let recorded: Vec<Transaction> = service
            .execute(query::transaction::List::by(()))
            .await
            .unwrap();
        assert_eq!(recorded.len(), 2);
        assert_eq!(
            animal(&service, rex.id).await.status,
            animal::Status::Adopted,
        );
    }
}
