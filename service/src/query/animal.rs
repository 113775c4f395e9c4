//! [`Query`] collection related to [`Animal`]s.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{animal, Animal},
    infra::{database, Database},
    Query, Service,
};

use super::DatabaseQuery;

/// Queries all the [`Animal`]s.
pub type List = DatabaseQuery<By<Vec<Animal>, ()>>;

/// Queries an [`Animal`] by its [`animal::Id`].
pub type ById = DatabaseQuery<By<Option<Animal>, animal::Id>>;

/// Queries [`Animal`]s matching an [`animal::Search`].
pub type Search = DatabaseQuery<By<Vec<Animal>, animal::Search>>;

/// [`Query`] of the [`Animal`]s which may take part in a new
/// [`Transaction`], in the order the [`Database`] returns them.
///
/// [`Transaction`]: crate::domain::Transaction
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Available;

impl<Db> Query<Available> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Animal>, ()>>,
        Ok = Vec<Animal>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Animal>;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Available) -> Result<Self::Ok, Self::Err> {
        let mut animals = self
            .database()
            .execute(Select(By::<Vec<Animal>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        animals.retain(Animal::is_available);
        Ok(animals)
    }
}

/// [`Query`] of the [`Animal`] about to take part in a new [`Transaction`],
/// ensuring it exists and is [`animal::Status::Available`].
///
/// The [`Animal`] is not reserved, so it may stop being available right after.
///
/// [`Transaction`]: crate::domain::Transaction
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Candidate(pub animal::Id);

impl<Db> Query<Candidate> for Service<Db>
where
    Db: Database<
        Select<By<Option<Animal>, animal::Id>>,
        Ok = Option<Animal>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Animal;
    type Err = Traced<CandidateError>;

    async fn execute(
        &self,
        Candidate(id): Candidate,
    ) -> Result<Self::Ok, Self::Err> {
        use CandidateError as E;

        let animal = self
            .database()
            .execute(Select(By::<Option<Animal>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotExists(id))
            .map_err(tracerr::wrap!())?;
        if !animal.is_available() {
            return Err(tracerr::new!(E::NotAvailable(animal.status)));
        }
        Ok(animal)
    }
}

/// Error of [`Candidate`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum CandidateError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Animal`] with the provided ID doesn't exist.
    #[display("`Animal(id: {_0})` doesn't exist")]
    #[from(ignore)]
    NotExists(#[error(not(source))] animal::Id),

    /// [`Animal`] has another [`animal::Status`] than
    /// [`animal::Status::Available`].
    #[display("`Animal` is `{_0}`, not available")]
    #[from(ignore)]
    NotAvailable(#[error(not(source))] animal::Status),
}
