//! [`Species`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};

use super::{define_id, define_text};
#[cfg(doc)]
use crate::domain::Breed;

/// Top level of the animal taxonomy (dog, cat, bird, …).
#[derive(Clone, Debug)]
pub struct Species {
    /// ID of this [`Species`].
    pub id: Id,

    /// [`Name`] of this [`Species`].
    ///
    /// Uniqueness is left to the store.
    pub name: Name,

    /// [`DateTime`] when this [`Species`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Species`] was last modified.
    pub updated_at: ModificationDateTime,
}

define_id! {
    #[doc = "ID of a [`Species`]."]
    Id
}

define_text! {
    #[doc = "Display name of a [`Species`]."]
    Name(max = 100)
}

/// Data of a new [`Species`] to be created.
#[derive(Clone, Debug)]
pub struct New {
    /// [`Name`] of the new [`Species`].
    pub name: Name,
}

/// Changes to be applied to an existing [`Species`].
#[derive(Clone, Debug)]
pub struct Changes {
    /// ID of the [`Species`] to change.
    pub id: Id,

    /// New [`Name`] of the [`Species`].
    ///
    /// Renaming doesn't touch the [`Breed`]s referencing this [`Species`].
    pub name: Name,
}

/// [`DateTime`] when a [`Species`] was created.
pub type CreationDateTime = DateTimeOf<(Species, unit::Creation)>;

/// [`DateTime`] when a [`Species`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Species, unit::Modification)>;
