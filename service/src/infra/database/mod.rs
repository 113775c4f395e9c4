//! [`Database`]-related implementations.

pub mod memory;
#[cfg(feature = "rest")]
pub mod rest;

use std::fmt;

use derive_more::{Display, Error as StdError, From};

use crate::domain::{
    animal, breed, client, species, transaction, Animal, Breed, Client,
    Species, Transaction,
};

#[cfg(feature = "rest")]
pub use self::rest::Rest;
pub use self::memory::Memory;

/// Database operation.
pub use common::Handler as Database;

/// [`Database`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Memory`] error.
    Memory(memory::Error),

    #[cfg(feature = "rest")]
    /// [`Rest`] error.
    Rest(rest::Error),
}

/// Entity stored as a standalone resource of a [`Database`].
pub trait Resource: Clone {
    /// Type of the store-assigned ID of this [`Resource`].
    type Id: Copy + Eq + fmt::Debug + fmt::Display + From<i32> + Into<i32>;

    /// Human-readable name of this [`Resource`] kind.
    const NAME: &'static str;

    /// Returns the ID of this [`Resource`].
    fn id(&self) -> Self::Id;
}

/// Data of a [`Resource`] not created yet.
pub trait Draft {
    /// [`Resource`] created from this [`Draft`].
    type Resource: Resource;
}

/// Changes to an existing [`Resource`].
pub trait Changes {
    /// [`Resource`] being changed.
    type Resource: Resource;

    /// Returns the ID of the [`Resource`] being changed.
    fn id(&self) -> <Self::Resource as Resource>::Id;
}

/// [`Resource`] allowed to be deleted.
pub trait Removable: Resource {}

/// Implements [`Resource`], [`Draft`] and [`Changes`] for the provided
/// domain types.
macro_rules! impl_resource {
    (
        $resource:ty, $module:ident, $name:literal,
        new = $new:ty, changes = $changes:ty $(,)?
    ) => {
        impl Resource for $resource {
            type Id = $module::Id;

            const NAME: &'static str = $name;

            fn id(&self) -> Self::Id {
                self.id
            }
        }

        impl Draft for $new {
            type Resource = $resource;
        }

        impl Changes for $changes {
            type Resource = $resource;

            fn id(&self) -> $module::Id {
                self.id
            }
        }
    };
}

impl_resource!(
    Species, species, "species",
    new = species::New, changes = species::Changes,
);
impl_resource!(
    Breed, breed, "breed",
    new = breed::New, changes = breed::Changes,
);
impl_resource!(
    Animal, animal, "animal",
    new = animal::New, changes = animal::Patch,
);
impl_resource!(
    Client, client, "client",
    new = client::New, changes = client::Patch,
);

impl Resource for Transaction {
    type Id = transaction::Id;

    const NAME: &'static str = "transaction";

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Draft for transaction::New {
    type Resource = Transaction;
}

// `Transaction`s are immutable, so implement neither `Changes` nor
// `Removable` for them.
impl Removable for Species {}
impl Removable for Breed {}
impl Removable for Animal {}
impl Removable for Client {}
