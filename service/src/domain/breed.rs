//! [`Breed`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};

use super::{define_id, define_text};
use crate::domain::species;
#[cfg(doc)]
use crate::domain::Species;

/// Second level of the animal taxonomy, belonging to exactly one [`Species`].
#[derive(Clone, Debug)]
pub struct Breed {
    /// ID of this [`Breed`].
    pub id: Id,

    /// [`Name`] of this [`Breed`].
    pub name: Name,

    /// ID of the [`Species`] this [`Breed`] belongs to.
    ///
    /// May dangle if the [`Species`] was deleted after this [`Breed`] was
    /// created.
    pub species_id: species::Id,

    /// [`DateTime`] when this [`Breed`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Breed`] was last modified.
    pub updated_at: ModificationDateTime,
}

impl Breed {
    /// Indicates whether this [`Breed`] belongs to the provided [`Species`].
    #[must_use]
    pub fn belongs_to(&self, species_id: species::Id) -> bool {
        self.species_id == species_id
    }
}

define_id! {
    #[doc = "ID of a [`Breed`]."]
    Id
}

define_text! {
    #[doc = "Display name of a [`Breed`]."]
    Name(max = 100)
}

/// Data of a new [`Breed`] to be created.
#[derive(Clone, Debug)]
pub struct New {
    /// [`Name`] of the new [`Breed`].
    pub name: Name,

    /// ID of the [`Species`] the new [`Breed`] belongs to.
    pub species_id: species::Id,
}

/// Changes to be applied to an existing [`Breed`].
#[derive(Clone, Debug)]
pub struct Changes {
    /// ID of the [`Breed`] to change.
    pub id: Id,

    /// New [`Name`] of the [`Breed`].
    pub name: Name,

    /// ID of the [`Species`] the [`Breed`] belongs to from now on.
    pub species_id: species::Id,
}

/// [`DateTime`] when a [`Breed`] was created.
pub type CreationDateTime = DateTimeOf<(Breed, unit::Creation)>;

/// [`DateTime`] when a [`Breed`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Breed, unit::Modification)>;
