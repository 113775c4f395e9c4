//! [`Command`]s managing [`Animal`]s.
//!
//! See [`CreateAnimal`] for creating a new [`Animal`].

use common::operations::{By, Delete, Update};

#[cfg(doc)]
use super::{Command, CreateAnimal};
use super::DatabaseCommand;
use crate::domain::{animal, Animal};

/// [`Command`] for changing an existing [`Animal`].
pub type Change = DatabaseCommand<Update<animal::Patch>>;

/// [`Command`] for deleting an existing [`Animal`].
pub type Remove = DatabaseCommand<Delete<By<Animal, animal::Id>>>;
