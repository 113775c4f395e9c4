//! In-memory [`Database`] implementation.

use std::{collections::HashSet, sync::Arc};

use common::{
    operations::{By, Delete, Insert, Select, Update},
    DateTime,
};
use derive_more::{Display, Error as StdError};
use tokio::sync::RwLock;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        animal, breed, client, species, transaction, Animal, Breed, Client,
        Species, Transaction,
    },
    infra::{
        database::{self, Changes, Draft, Removable, Resource},
        Database,
    },
};

/// In-memory [`Database`] behaving like the remote store does.
///
/// Assigns IDs and timestamps to the created [`Resource`]s, and filters
/// searches on its own. [`Fault`]s may be injected into it to make the
/// desired operations fail.
#[derive(Clone, Debug, Default)]
pub struct Memory(Arc<RwLock<State>>);

impl Memory {
    /// Creates a new empty [`Memory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every operation matching the provided [`Fault`] fail until it's
    /// [healed].
    ///
    /// [healed]: Memory::heal
    pub async fn inject(&self, fault: Fault) {
        log::debug!("injecting `{fault}` fault");
        _ = self.0.write().await.faults.insert(fault);
    }

    /// Removes the previously [injected] [`Fault`].
    ///
    /// [injected]: Memory::inject
    pub async fn heal(&self, fault: Fault) {
        _ = self.0.write().await.faults.remove(&fault);
    }
}

/// State of a [`Memory`] database.
#[derive(Debug, Default)]
pub struct State {
    /// Stored [`Species`].
    species: Table<Species>,

    /// Stored [`Breed`]s.
    breeds: Table<Breed>,

    /// Stored [`Animal`]s.
    animals: Table<Animal>,

    /// Stored [`Client`]s.
    clients: Table<Client>,

    /// Stored [`Transaction`]s.
    transactions: Table<Transaction>,

    /// Currently injected [`Fault`]s.
    faults: HashSet<Fault>,
}

impl State {
    /// Fails if the provided [`Fault`] is currently injected.
    fn check(&self, fault: Fault) -> Result<(), Traced<Error>> {
        if self.faults.contains(&fault) {
            return Err(tracerr::new!(Error::Injected(fault)));
        }
        Ok(())
    }
}

/// Table of [`Resource`]s of a single kind, kept in insertion order.
#[derive(Debug)]
pub struct Table<T> {
    /// Rows of this [`Table`].
    rows: Vec<T>,

    /// Last ID assigned in this [`Table`].
    last_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            last_id: 0,
        }
    }
}

impl<T: Resource> Table<T> {
    /// Reserves the next ID in this [`Table`].
    fn next_id(&mut self) -> T::Id {
        self.last_id += 1;
        self.last_id.into()
    }

    /// Returns the row with the provided ID, if any.
    fn get(&self, id: T::Id) -> Option<&T> {
        self.rows.iter().find(|r| r.id() == id)
    }

    /// Returns the mutable row with the provided ID.
    fn get_mut(&mut self, id: T::Id) -> Result<&mut T, Traced<Error>> {
        self.rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| tracerr::new!(Error::not_found::<T>(id)))
    }

    /// Removes the row with the provided ID.
    fn remove(&mut self, id: T::Id) -> Result<T, Traced<Error>> {
        let pos = self
            .rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| tracerr::new!(Error::not_found::<T>(id)))?;
        Ok(self.rows.remove(pos))
    }
}

/// Operation of a [`Memory`] database being made to fail.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[display("{method} {resource}")]
pub struct Fault {
    /// [`Resource::NAME`] of the failing [`Resource`].
    pub resource: &'static str,

    /// Failing [`Method`].
    pub method: Method,
}

impl Fault {
    /// Creates a new [`Fault`] of the provided [`Method`] on `T` resources.
    #[must_use]
    pub fn new<T: Resource>(method: Method) -> Self {
        Self {
            resource: T::NAME,
            method,
        }
    }
}

/// Kind of an operation on a [`Resource`], named after the HTTP method the
/// remote store serves it with.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Method {
    /// Listing or getting.
    #[display("GET")]
    Get,

    /// Creation.
    #[display("POST")]
    Post,

    /// Modification.
    #[display("PUT")]
    Put,

    /// Removal.
    #[display("DELETE")]
    Delete,
}

/// [`Memory`] database error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// Injected [`Fault`] was hit.
    #[display("Injected `{_0}` fault")]
    Injected(#[error(not(source))] Fault),

    /// [`Resource`] to be modified doesn't exist.
    #[display("`{resource}` with ID `{id}` doesn't exist")]
    NotFound {
        /// [`Resource::NAME`] of the missing [`Resource`].
        resource: &'static str,

        /// ID of the missing [`Resource`].
        id: i32,
    },
}

impl Error {
    /// Creates a new [`Error::NotFound`] for the provided `T` resource ID.
    fn not_found<T: Resource>(id: T::Id) -> Self {
        Self::NotFound {
            resource: T::NAME,
            id: id.into(),
        }
    }
}

/// [`Resource`] having its own [`Table`] in a [`Memory`] database.
pub trait Stored: Resource {
    /// Returns the [`Table`] of this [`Resource`].
    fn table(state: &State) -> &Table<Self>;

    /// Returns the mutable [`Table`] of this [`Resource`].
    fn table_mut(state: &mut State) -> &mut Table<Self>;
}

/// [`Draft`] turned into a [`Stored`] resource by a [`Memory`] database.
pub trait Materialize: Draft<Resource: Stored> {
    /// Creates the [`Resource`] with the provided ID and creation time.
    fn materialize(
        self,
        id: <Self::Resource as Resource>::Id,
        now: DateTime,
    ) -> Self::Resource;
}

/// [`Changes`] applied to a [`Stored`] resource by a [`Memory`] database.
pub trait Apply: Changes<Resource: Stored> {
    /// Applies these [`Changes`] to the provided [`Resource`] at the
    /// provided modification time.
    fn apply(self, resource: &mut Self::Resource, now: DateTime);
}

/// Implements [`Stored`] for the provided [`Resource`] and its [`Table`]
/// field.
macro_rules! impl_stored {
    ($($resource:ty => $field:ident),* $(,)?) => {$(
        impl Stored for $resource {
            fn table(state: &State) -> &Table<Self> {
                &state.$field
            }

            fn table_mut(state: &mut State) -> &mut Table<Self> {
                &mut state.$field
            }
        }
    )*};
}

impl_stored! {
    Species => species,
    Breed => breeds,
    Animal => animals,
    Client => clients,
    Transaction => transactions,
}

impl<T: Stored> Database<Select<By<Vec<T>, ()>>> for Memory {
    type Ok = Vec<T>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<T>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let state = self.0.read().await;
        state
            .check(Fault::new::<T>(Method::Get))
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?;
        Ok(T::table(&state).rows.clone())
    }
}

impl<T: Stored> Database<Select<By<Option<T>, T::Id>>> for Memory {
    type Ok = Option<T>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<T>, T::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let state = self.0.read().await;
        state
            .check(Fault::new::<T>(Method::Get))
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?;
        Ok(T::table(&state).get(by.into_inner()).cloned())
    }
}

impl<N: Materialize> Database<Insert<N>> for Memory {
    type Ok = N::Resource;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<N>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.0.write().await;
        state
            .check(Fault::new::<N::Resource>(Method::Post))
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?;

        let table = <N::Resource as Stored>::table_mut(&mut state);
        let id = table.next_id();
        let resource = draft.materialize(id, DateTime::now());
        table.rows.push(resource.clone());
        Ok(resource)
    }
}

impl<C: Apply> Database<Update<C>> for Memory {
    type Ok = C::Resource;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(changes): Update<C>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.0.write().await;
        state
            .check(Fault::new::<C::Resource>(Method::Put))
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?;

        let resource = <C::Resource as Stored>::table_mut(&mut state)
            .get_mut(changes.id())
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?;
        changes.apply(resource, DateTime::now());
        Ok(resource.clone())
    }
}

impl<T: Stored + Removable> Database<Delete<By<T, T::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<T, T::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.0.write().await;
        state
            .check(Fault::new::<T>(Method::Delete))
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?;

        T::table_mut(&mut state)
            .remove(by.into_inner())
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))
            .map(drop)
    }
}

impl Database<Select<By<Vec<Animal>, animal::Search>>> for Memory {
    type Ok = Vec<Animal>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Animal>, animal::Search>>,
    ) -> Result<Self::Ok, Self::Err> {
        let search = by.into_inner();

        let state = self.0.read().await;
        state
            .check(Fault::new::<Animal>(Method::Get))
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?;
        Ok(state
            .animals
            .rows
            .iter()
            .filter(|a| search.matches(a))
            .cloned()
            .collect())
    }
}

impl Database<Select<By<Vec<Client>, client::Search>>> for Memory {
    type Ok = Vec<Client>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Client>, client::Search>>,
    ) -> Result<Self::Ok, Self::Err> {
        let search = by.into_inner();

        let state = self.0.read().await;
        state
            .check(Fault::new::<Client>(Method::Get))
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?;
        Ok(state
            .clients
            .rows
            .iter()
            .filter(|c| search.matches(c))
            .cloned()
            .collect())
    }
}

impl Database<Select<By<Vec<Transaction>, transaction::DateRange>>>
    for Memory
{
    type Ok = Vec<Transaction>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Transaction>, transaction::DateRange>>,
    ) -> Result<Self::Ok, Self::Err> {
        let range = by.into_inner();

        let state = self.0.read().await;
        state
            .check(Fault::new::<Transaction>(Method::Get))
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?;
        Ok(state
            .transactions
            .rows
            .iter()
            .filter(|t| range.contains(t.date))
            .cloned()
            .collect())
    }
}

impl Materialize for species::New {
    fn materialize(self, id: species::Id, now: DateTime) -> Species {
        let Self { name } = self;
        Species {
            id,
            name,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        }
    }
}

impl Materialize for breed::New {
    fn materialize(self, id: breed::Id, now: DateTime) -> Breed {
        let Self { name, species_id } = self;
        Breed {
            id,
            name,
            species_id,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        }
    }
}

impl Materialize for animal::New {
    fn materialize(self, id: animal::Id, now: DateTime) -> Animal {
        let Self {
            name,
            species_id,
            breed_id,
            birth_date,
            arrival_date,
            sex,
            coat_color,
            registration_code,
            sale_price,
            health_notes,
            description,
            status,
        } = self;
        Animal {
            id,
            name,
            species_id,
            breed_id,
            birth_date,
            arrival_date,
            sex,
            coat_color,
            registration_code,
            sale_price,
            health_notes,
            description,
            status,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        }
    }
}

impl Materialize for client::New {
    fn materialize(self, id: client::Id, now: DateTime) -> Client {
        let Self {
            full_name,
            cpf,
            rg,
            phone,
            email,
            address,
        } = self;
        Client {
            id,
            full_name,
            cpf,
            rg,
            phone,
            email,
            address,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        }
    }
}

impl Materialize for transaction::New {
    fn materialize(self, id: transaction::Id, now: DateTime) -> Transaction {
        let Self {
            animal_id,
            client_id,
            kind,
            amount,
            notes,
        } = self;
        Transaction {
            id,
            animal_id,
            client_id,
            kind,
            date: now.coerce(),
            amount,
            notes,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        }
    }
}

impl Apply for species::Changes {
    fn apply(self, species: &mut Species, now: DateTime) {
        species.name = self.name;
        species.updated_at = now.coerce();
    }
}

impl Apply for breed::Changes {
    fn apply(self, breed: &mut Breed, now: DateTime) {
        breed.name = self.name;
        breed.species_id = self.species_id;
        breed.updated_at = now.coerce();
    }
}

impl Apply for animal::Patch {
    fn apply(self, animal: &mut Animal, now: DateTime) {
        self.apply_to(animal);
        animal.updated_at = now.coerce();
    }
}

impl Apply for client::Patch {
    fn apply(self, client: &mut Client, now: DateTime) {
        self.apply_to(client);
        client.updated_at = now.coerce();
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Delete, Insert, Select, Update};

    use crate::{
        domain::{species, Species},
        infra::{database, Database as _},
    };

    use super::{Error, Fault, Memory, Method};

    fn dog() -> species::New {
        species::New {
            name: species::Name::new("Dog").unwrap(),
        }
    }

    #[tokio::test]
    async fn assigns_sequential_ids() {
        let db = Memory::new();

        let dog = db.execute(Insert(dog())).await.unwrap();
        let cat = db
            .execute(Insert(species::New {
                name: species::Name::new("Cat").unwrap(),
            }))
            .await
            .unwrap();

        assert_eq!(i32::from(dog.id), 1);
        assert_eq!(i32::from(cat.id), 2);
        assert_eq!(dog.created_at, dog.updated_at.coerce());

        let all = db
            .execute(Select(By::<Vec<Species>, _>::new(())))
            .await
            .unwrap();
        assert_eq!(
            all.iter().map(|s| s.name.as_ref()).collect::<Vec<_>>(),
            ["Dog", "Cat"],
        );
    }

    #[tokio::test]
    async fn missing_is_absent_on_read_and_error_on_write() {
        let db = Memory::new();

        let found = db
            .execute(Select(By::<Option<Species>, _>::new(species::Id::from(
                7,
            ))))
            .await
            .unwrap();
        assert!(found.is_none());

        let err = db
            .execute(Update(species::Changes {
                id: species::Id::from(7),
                name: species::Name::new("Bird").unwrap(),
            }))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            database::Error::Memory(Error::NotFound { id: 7, .. }),
        ));

        let err = db
            .execute(Delete(By::<Species, _>::new(species::Id::from(7))))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            database::Error::Memory(Error::NotFound { id: 7, .. }),
        ));
    }

    #[tokio::test]
    async fn injected_fault_fails_only_its_method() {
        let db = Memory::new();
        let fault = Fault::new::<Species>(Method::Post);

        db.inject(fault).await;
        let err = db.execute(Insert(dog())).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            database::Error::Memory(Error::Injected(f)) if *f == fault,
        ));
        assert!(db
            .execute(Select(By::<Vec<Species>, _>::new(())))
            .await
            .unwrap()
            .is_empty());

        db.heal(fault).await;
        assert!(db.execute(Insert(dog())).await.is_ok());
    }
}
