//! [`Command`]s managing [`Client`]s.

use common::operations::{By, Delete, Insert, Update};

#[cfg(doc)]
use super::Command;
use super::DatabaseCommand;
use crate::domain::{client, Client};

/// [`Command`] for creating a new [`Client`].
pub type Create = DatabaseCommand<Insert<client::New>>;

/// [`Command`] for changing an existing [`Client`].
pub type Change = DatabaseCommand<Update<client::Patch>>;

/// [`Command`] for deleting an existing [`Client`].
pub type Remove = DatabaseCommand<Delete<By<Client, client::Id>>>;
