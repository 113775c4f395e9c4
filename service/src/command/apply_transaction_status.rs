//! [`Command`] for applying the [`animal::Status`] resulting from a
//! [`Transaction`] to its [`Animal`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::command::CreateTransaction;
use crate::{
    domain::{animal, transaction, Animal, Transaction},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for applying the [`animal::Status`] resulting from an already
/// recorded [`Transaction`] to its [`Animal`].
///
/// Reconciles the [`CreateTransaction`] outcome, whose [`Animal`] status
/// update has failed. Repeating it is harmless.
#[derive(Clone, Copy, Debug)]
pub struct ApplyTransactionStatus {
    /// ID of the recorded [`Transaction`].
    pub transaction_id: transaction::Id,
}

impl<Db> Command<ApplyTransactionStatus> for Service<Db>
where
    Db: Database<
            Select<By<Option<Transaction>, transaction::Id>>,
            Ok = Option<Transaction>,
            Err = Traced<database::Error>,
        > + Database<
            Update<animal::Patch>,
            Ok = Animal,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Animal;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ApplyTransactionStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ApplyTransactionStatus { transaction_id } = cmd;

        let transaction = self
            .database()
            .execute(Select(By::<Option<Transaction>, _>::new(transaction_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::TransactionNotExists(transaction_id))
            .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Update(animal::Patch::status(
                transaction.animal_id,
                transaction.kind.resulting_status(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`ApplyTransactionStatus`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Transaction`] with the provided ID doesn't exist.
    #[display("`Transaction(id: {_0})` doesn't exist")]
    #[from(ignore)]
    TransactionNotExists(#[error(not(source))] transaction::Id),
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::{
        command::{
            create_animal::spec::create_rex,
            create_transaction::ExecutionError as CreateError,
            CreateTransaction,
        },
        domain::{animal, transaction, Animal},
        infra::{
            memory::{Fault, Method},
            Memory,
        },
        query, Command as _, Query as _, Service,
    };

    use super::{ApplyTransactionStatus, ExecutionError};

    #[tokio::test]
    async fn reconciles_partially_completed_transaction() {
        let service = Service::new(Default::default(), Memory::new());
        let rex: Animal = service.execute(create_rex()).await.unwrap();

        let fault = Fault::new::<Animal>(Method::Put);
        service.database().inject(fault).await;
        let err = service
            .execute(CreateTransaction {
                animal_id: rex.id,
                client_id: 3.into(),
                kind: transaction::Kind::Donation,
                amount: None,
                notes: None,
            })
            .await
            .unwrap_err();
        let CreateError::StatusNotUpdated { transaction, .. } = err.as_ref()
        else {
            panic!("expected `StatusNotUpdated`, got: {err}");
        };
        let transaction_id = transaction.id;

        service.database().heal(fault).await;
        for _ in 0..2 {
            let adopted = service
                .execute(ApplyTransactionStatus { transaction_id })
                .await
                .unwrap();
            assert_eq!(adopted.status, animal::Status::Adopted);
        }

        let rex = service
            .execute(query::animal::ById::by(rex.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rex.status, animal::Status::Adopted);
        assert_eq!(rex.sale_price, "500".parse::<Money>().unwrap());
    }

    #[tokio::test]
    async fn errors_on_unknown_transaction() {
        let service = Service::new(Default::default(), Memory::new());

        let err = service
            .execute(ApplyTransactionStatus {
                transaction_id: 42.into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::TransactionNotExists(id) if i32::from(*id) == 42,
        ));
    }
}
