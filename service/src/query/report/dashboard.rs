//! [`Dashboard`] definition.

use common::{
    operations::{By, Select},
    DateTime,
};
use tracerr::Traced;

use crate::{
    domain::{Animal, Client, Transaction},
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] aggregating a [`read::Dashboard`] as of the provided moment.
///
/// [`Animal`]s, [`Client`]s and [`Transaction`]s are fetched concurrently,
/// and a failure of any fetch fails the whole [`Dashboard`].
#[derive(Clone, Copy, Debug)]
pub struct Dashboard {
    /// Moment defining the current month.
    pub now: DateTime,
}

impl<Db> Query<Dashboard> for Service<Db>
where
    Db: Database<
            Select<By<Vec<Animal>, ()>>,
            Ok = Vec<Animal>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Client>, ()>>,
            Ok = Vec<Client>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Transaction>, ()>>,
            Ok = Vec<Transaction>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = read::Dashboard;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Dashboard { now }: Dashboard,
    ) -> Result<Self::Ok, Self::Err> {
        let (animals, clients, transactions) = futures::try_join!(
            self.database().execute(Select(By::<Vec<Animal>, _>::new(()))),
            self.database().execute(Select(By::<Vec<Client>, _>::new(()))),
            self.database()
                .execute(Select(By::<Vec<Transaction>, _>::new(()))),
        )
        .map_err(tracerr::wrap!())?;

        Ok(read::Dashboard::aggregate(
            &animals,
            &clients,
            &transactions,
            now,
            self.config().utc_offset,
        ))
    }
}

#[cfg(test)]
mod spec {
    use common::{DateTime, Money};

    use crate::{
        command::{create_animal::spec::create_rex, CreateTransaction},
        domain::{transaction, Animal, Client},
        infra::{
            memory::{Fault, Method},
            Memory,
        },
        Command as _, Query as _, Service,
    };

    use super::Dashboard;

    #[tokio::test]
    async fn aggregates_current_state() {
        let service = Service::new(Default::default(), Memory::new());
        let rex: Animal = service.execute(create_rex()).await.unwrap();
        let _: Animal = service.execute(create_rex()).await.unwrap();
        let _ = service
            .execute(CreateTransaction {
                animal_id: rex.id,
                client_id: 1.into(),
                kind: transaction::Kind::Sale,
                amount: Some("450".parse().unwrap()),
                notes: None,
            })
            .await
            .unwrap();

        let dashboard = service
            .execute(Dashboard {
                now: DateTime::now(),
            })
            .await
            .unwrap();

        assert_eq!(dashboard.total_animals, 2);
        assert_eq!(dashboard.available_animals, 1);
        assert_eq!(dashboard.total_clients, 0);
        assert_eq!(dashboard.monthly_transactions, 1);
        assert_eq!(dashboard.monthly_revenue, "450".parse::<Money>().unwrap());
        assert_eq!(dashboard.recent_transactions.len(), 1);
    }

    #[tokio::test]
    async fn fails_as_a_whole() {
        let service = Service::new(Default::default(), Memory::new());
        let _: Animal = service.execute(create_rex()).await.unwrap();
        service
            .database()
            .inject(Fault::new::<Client>(Method::Get))
            .await;

        let res = service
            .execute(Dashboard {
                now: DateTime::now(),
            })
            .await;

        assert!(res.is_err());
    }
}
