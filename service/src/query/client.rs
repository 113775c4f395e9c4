//! [`Query`] collection related to [`Client`]s.

use common::operations::By;

use crate::domain::{client, Client};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Client`]s.
pub type List = DatabaseQuery<By<Vec<Client>, ()>>;

/// Queries a [`Client`] by its [`client::Id`].
pub type ById = DatabaseQuery<By<Option<Client>, client::Id>>;

/// Queries [`Client`]s matching a [`client::Search`].
pub type Search = DatabaseQuery<By<Vec<Client>, client::Search>>;
