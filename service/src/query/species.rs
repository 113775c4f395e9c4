//! [`Query`] collection related to [`Species`].

use common::operations::By;

use crate::domain::{species, Species};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Species`].
pub type List = DatabaseQuery<By<Vec<Species>, ()>>;

/// Queries a [`Species`] by its [`species::Id`].
pub type ById = DatabaseQuery<By<Option<Species>, species::Id>>;
