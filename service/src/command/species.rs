//! [`Command`]s managing [`Species`].

use common::operations::{By, Delete, Insert, Update};

#[cfg(doc)]
use super::Command;
use super::DatabaseCommand;
use crate::domain::{species, Species};

/// [`Command`] for creating a new [`Species`].
pub type Create = DatabaseCommand<Insert<species::New>>;

/// [`Command`] for changing an existing [`Species`].
pub type Change = DatabaseCommand<Update<species::Changes>>;

/// [`Command`] for deleting an existing [`Species`].
pub type Remove = DatabaseCommand<Delete<By<Species, species::Id>>>;
