//! [`Query`] collection related to [`Transaction`]s.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{transaction, Transaction},
    infra::{database, Database},
    Query, Service,
};

use super::DatabaseQuery;

/// Queries all the [`Transaction`]s.
pub type List = DatabaseQuery<By<Vec<Transaction>, ()>>;

/// Queries a [`Transaction`] by its [`transaction::Id`].
pub type ById = DatabaseQuery<By<Option<Transaction>, transaction::Id>>;

/// Queries [`Transaction`]s which took place within a
/// [`transaction::DateRange`].
pub type ByDateRange =
    DatabaseQuery<By<Vec<Transaction>, transaction::DateRange>>;

/// [`Query`] of the [`Transaction`]s of a [`transaction::Kind`], in the order
/// the [`Database`] returns them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ByKind(pub transaction::Kind);

impl<Db> Query<ByKind> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Transaction>, ()>>,
        Ok = Vec<Transaction>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Transaction>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        ByKind(kind): ByKind,
    ) -> Result<Self::Ok, Self::Err> {
        let mut transactions = self
            .database()
            .execute(Select(By::<Vec<Transaction>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        transactions.retain(|t| t.kind == kind);
        Ok(transactions)
    }
}

#[cfg(test)]
mod spec {
    use time::{macros::date, OffsetDateTime};

    use crate::{
        command::{create_animal::spec::create_rex, CreateTransaction},
        domain::{animal::Animal, transaction},
        infra::Memory,
        query, Command as _, Query as _, Service,
    };

    use super::ByKind;

    #[tokio::test]
    async fn filters_by_kind_and_date() {
        let service = Service::new(Default::default(), Memory::new());
        let rex: Animal = service.execute(create_rex()).await.unwrap();
        for kind in [
            transaction::Kind::Sale,
            transaction::Kind::Donation,
            transaction::Kind::Sale,
        ] {
            let _ = service
                .execute(CreateTransaction {
                    animal_id: rex.id,
                    client_id: 1.into(),
                    kind,
                    amount: Some("1".parse().unwrap()),
                    notes: None,
                })
                .await
                .unwrap();
        }

        let sales = service
            .execute(ByKind(transaction::Kind::Sale))
            .await
            .unwrap();
        assert_eq!(
            sales.iter().map(|t| i32::from(t.id)).collect::<Vec<_>>(),
            [1, 3],
        );

        let today = OffsetDateTime::now_utc().date();
        let recorded = service
            .execute(query::transaction::ByDateRange::by(
                transaction::DateRange {
                    start: today.previous_day().unwrap(),
                    end: today.next_day().unwrap(),
                },
            ))
            .await
            .unwrap();
        assert_eq!(recorded.len(), 3);

        let past = service
            .execute(query::transaction::ByDateRange::by(
                transaction::DateRange {
                    start: date!(2000 - 01 - 01),
                    end: date!(2000 - 12 - 31),
                },
            ))
            .await
            .unwrap();
        assert!(past.is_empty());
    }
}
