//! [`TransactionTotals`] definition.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::Transaction,
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] summing up all the recorded [`Transaction`]s into
/// [`read::transaction::Totals`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TransactionTotals;

impl<Db> Query<TransactionTotals> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Transaction>, ()>>,
        Ok = Vec<Transaction>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = read::transaction::Totals;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: TransactionTotals,
    ) -> Result<Self::Ok, Self::Err> {
        let transactions = self
            .database()
            .execute(Select(By::<Vec<Transaction>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(read::transaction::Totals::aggregate(&transactions))
    }
}
