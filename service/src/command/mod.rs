//! [`Command`] definition.

pub mod animal;
pub mod apply_transaction_status;
pub mod breed;
pub mod client;
pub mod create_animal;
pub mod create_transaction;
pub mod species;

use common::operations::{By, Delete, Insert, Update};
use tracerr::Traced;

use crate::{
    infra::{database, Database},
    Service,
};

/// [`Command`] of the [`Service`].
pub use common::Handler as Command;

pub use self::{
    apply_transaction_status::ApplyTransactionStatus,
    create_animal::CreateAnimal, create_transaction::CreateTransaction,
};

/// [`Command`] performing a single [`Database`] write operation as is.
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct DatabaseCommand<Op>(Op);

impl<T> DatabaseCommand<Insert<T>> {
    /// Creates a new [`DatabaseCommand`] inserting the provided value.
    #[must_use]
    pub fn insert(value: T) -> Self {
        Self(Insert(value))
    }
}

impl<T> DatabaseCommand<Update<T>> {
    /// Creates a new [`DatabaseCommand`] applying the provided changes.
    #[must_use]
    pub fn update(changes: T) -> Self {
        Self(Update(changes))
    }
}

impl<W, B> DatabaseCommand<Delete<By<W, B>>> {
    /// Creates a new [`DatabaseCommand`] deleting a `W` by the provided `B`.
    #[must_use]
    pub fn delete(by: B) -> Self {
        Self(Delete(By::new(by)))
    }
}

impl<Db, Op> Command<DatabaseCommand<Op>> for Service<Db>
where
    Db: Database<Op, Err = Traced<database::Error>>,
{
    type Ok = <Db as Database<Op>>::Ok;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        DatabaseCommand(op): DatabaseCommand<Op>,
    ) -> Result<Self::Ok, Self::Err> {
        self.database()
            .execute(op)
            .await
            .map_err(tracerr::wrap!())
    }
}
