//! [`Command`]s managing [`Breed`]s.

use common::operations::{By, Delete, Insert, Update};

#[cfg(doc)]
use super::Command;
use super::DatabaseCommand;
use crate::domain::{breed, Breed};

/// [`Command`] for creating a new [`Breed`].
pub type Create = DatabaseCommand<Insert<breed::New>>;

/// [`Command`] for changing an existing [`Breed`].
pub type Change = DatabaseCommand<Update<breed::Changes>>;

/// [`Command`] for deleting an existing [`Breed`].
pub type Remove = DatabaseCommand<Delete<By<Breed, breed::Id>>>;
