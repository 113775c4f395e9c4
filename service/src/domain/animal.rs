//! [`Animal`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Date, DateTimeOf, Money};
use derive_more::{Display, FromStr};

use super::{define_id, define_text};
use crate::domain::{breed, species};
#[cfg(doc)]
use crate::domain::{Breed, Species, Transaction};

/// Animal kept by the shop, for sale or adoption.
#[derive(Clone, Debug)]
pub struct Animal {
    /// ID of this [`Animal`].
    pub id: Id,

    /// [`Name`] of this [`Animal`].
    pub name: Name,

    /// ID of the [`Species`] of this [`Animal`].
    pub species_id: species::Id,

    /// ID of the [`Breed`] of this [`Animal`].
    ///
    /// Expected to belong to the [`Species`] of this [`Animal`], but this is
    /// checked on input only.
    pub breed_id: breed::Id,

    /// [`Date`] when this [`Animal`] was born.
    pub birth_date: Date,

    /// [`Date`] when this [`Animal`] arrived to the shop.
    pub arrival_date: Date,

    /// [`Sex`] of this [`Animal`].
    pub sex: Sex,

    /// [`CoatColor`] of this [`Animal`].
    pub coat_color: CoatColor,

    /// [`RegistrationCode`] of this [`Animal`].
    pub registration_code: RegistrationCode,

    /// Price this [`Animal`] is offered for.
    pub sale_price: Money,

    /// [`HealthNotes`] of this [`Animal`], if any.
    pub health_notes: Option<HealthNotes>,

    /// [`Description`] of this [`Animal`], if any.
    pub description: Option<Description>,

    /// Lifecycle [`Status`] of this [`Animal`].
    pub status: Status,

    /// [`DateTime`] when this [`Animal`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Animal`] was last modified.
    pub updated_at: ModificationDateTime,
}

impl Animal {
    /// Indicates whether this [`Animal`] can be sold or donated.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == Status::Available
    }
}

define_id! {
    #[doc = "ID of an [`Animal`]."]
    Id
}

define_text! {
    #[doc = "Name of an [`Animal`]."]
    Name(max = 100)
}

define_text! {
    #[doc = "Coat color of an [`Animal`]."]
    CoatColor(max = 50)
}

define_text! {
    #[doc = "Shelter registration code of an [`Animal`]."]
    RegistrationCode(max = 50)
}

define_text! {
    #[doc = "Health notes of an [`Animal`]."]
    HealthNotes(max = 4096)
}

define_text! {
    #[doc = "Free-text description of an [`Animal`]."]
    Description(max = 4096)
}

define_kind! {
    #[doc = "Sex of an [`Animal`]."]
    enum Sex {
        #[doc = "Male."]
        Male = 1,

        #[doc = "Female."]
        Female = 2,
    }
}

define_kind! {
    #[doc = "Lifecycle status of an [`Animal`]."]
    enum Status {
        #[doc = "Can be sold or donated."]
        Available = 1,

        #[doc = "Donated to a client."]
        Adopted = 2,

        #[doc = "Under veterinary care."]
        InTreatment = 3,

        #[doc = "Sold to a client."]
        Sold = 4,
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Available
    }
}

/// Data of a new [`Animal`] to be created.
#[derive(Clone, Debug)]
pub struct New {
    /// [`Name`] of the new [`Animal`].
    pub name: Name,

    /// ID of the [`Species`] of the new [`Animal`].
    pub species_id: species::Id,

    /// ID of the [`Breed`] of the new [`Animal`].
    pub breed_id: breed::Id,

    /// [`Date`] when the new [`Animal`] was born.
    pub birth_date: Date,

    /// [`Date`] when the new [`Animal`] arrived to the shop.
    pub arrival_date: Date,

    /// [`Sex`] of the new [`Animal`].
    pub sex: Sex,

    /// [`CoatColor`] of the new [`Animal`].
    pub coat_color: CoatColor,

    /// [`RegistrationCode`] of the new [`Animal`].
    pub registration_code: RegistrationCode,

    /// Price the new [`Animal`] is offered for.
    pub sale_price: Money,

    /// [`HealthNotes`] of the new [`Animal`], if any.
    pub health_notes: Option<HealthNotes>,

    /// [`Description`] of the new [`Animal`], if any.
    pub description: Option<Description>,

    /// Initial [`Status`] of the new [`Animal`].
    pub status: Status,
}

/// Partial changes to be applied to an existing [`Animal`].
///
/// [`None`] leaves a field untouched, while `Some(None)` clears an optional
/// one.
#[derive(Clone, Debug)]
pub struct Patch {
    /// ID of the [`Animal`] to change.
    pub id: Id,

    /// New [`Name`].
    pub name: Option<Name>,

    /// New [`Species`].
    pub species_id: Option<species::Id>,

    /// New [`Breed`].
    pub breed_id: Option<breed::Id>,

    /// New birth [`Date`].
    pub birth_date: Option<Date>,

    /// New arrival [`Date`].
    pub arrival_date: Option<Date>,

    /// New [`Sex`].
    pub sex: Option<Sex>,

    /// New [`CoatColor`].
    pub coat_color: Option<CoatColor>,

    /// New [`RegistrationCode`].
    pub registration_code: Option<RegistrationCode>,

    /// New sale price.
    pub sale_price: Option<Money>,

    /// New [`HealthNotes`].
    pub health_notes: Option<Option<HealthNotes>>,

    /// New [`Description`].
    pub description: Option<Option<Description>>,

    /// New [`Status`].
    pub status: Option<Status>,
}

impl Patch {
    /// Creates a new empty [`Patch`] of the [`Animal`] with the provided ID.
    #[must_use]
    pub fn new(id: Id) -> Self {
        Self {
            id,
            name: None,
            species_id: None,
            breed_id: None,
            birth_date: None,
            arrival_date: None,
            sex: None,
            coat_color: None,
            registration_code: None,
            sale_price: None,
            health_notes: None,
            description: None,
            status: None,
        }
    }

    /// Creates a new [`Patch`] changing the [`Status`] only.
    #[must_use]
    pub fn status(id: Id, status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::new(id)
        }
    }

    /// Applies this [`Patch`] to the provided [`Animal`].
    pub fn apply_to(self, animal: &mut Animal) {
        let Self {
            id: _,
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

        if let Some(v) = name {
            animal.name = v;
        }
        if let Some(v) = species_id {
            animal.species_id = v;
        }
        if let Some(v) = breed_id {
            animal.breed_id = v;
        }
        if let Some(v) = birth_date {
            animal.birth_date = v;
        }
        if let Some(v) = arrival_date {
            animal.arrival_date = v;
        }
        if let Some(v) = sex {
            animal.sex = v;
        }
        if let Some(v) = coat_color {
            animal.coat_color = v;
        }
        if let Some(v) = registration_code {
            animal.registration_code = v;
        }
        if let Some(v) = sale_price {
            animal.sale_price = v;
        }
        if let Some(v) = health_notes {
            animal.health_notes = v;
        }
        if let Some(v) = description {
            animal.description = v;
        }
        if let Some(v) = status {
            animal.status = v;
        }
    }
}

/// Case-insensitive search term matching [`Animal`]s by their [`Name`] or
/// [`RegistrationCode`].
#[derive(Clone, Debug, Default, Display, Eq, FromStr, PartialEq)]
pub struct Search(String);

impl Search {
    /// Creates a new [`Search`] for the provided `term`.
    #[must_use]
    pub fn new(term: impl Into<String>) -> Self {
        Self(term.into())
    }

    /// Returns the raw term of this [`Search`].
    #[must_use]
    pub fn term(&self) -> &str {
        &self.0
    }

    /// Indicates whether the provided [`Animal`] matches this [`Search`].
    ///
    /// An empty [`Search`] matches every [`Animal`].
    #[must_use]
    pub fn matches(&self, animal: &Animal) -> bool {
        let term = self.0.to_lowercase();

        animal.name.as_ref().to_lowercase().contains(&term)
            || animal
                .registration_code
                .as_ref()
                .to_lowercase()
                .contains(&term)
    }
}

/// [`DateTime`] when an [`Animal`] was created.
pub type CreationDateTime = DateTimeOf<(Animal, unit::Creation)>;

/// [`DateTime`] when an [`Animal`] was last modified.
///
/// Also bumped by a [`Transaction`] changing the [`Status`].
pub type ModificationDateTime = DateTimeOf<(Animal, unit::Modification)>;

#[cfg(test)]
pub(crate) mod spec {
    use common::{DateTime, Money};
    use time::macros::date;

    use super::{
        Animal, CoatColor, Id, Name, Patch, RegistrationCode, Search, Sex,
        Status,
    };

    pub(crate) fn animal(id: i32, name: &str, code: &str) -> Animal {
        Animal {
            id: Id::from(id),
            name: Name::new(name).unwrap(),
            species_id: 1.into(),
            breed_id: 1.into(),
            birth_date: date!(2023 - 03 - 01),
            arrival_date: date!(2024 - 01 - 15),
            sex: Sex::Male,
            coat_color: CoatColor::new("Golden").unwrap(),
            registration_code: RegistrationCode::new(code).unwrap(),
            sale_price: "500".parse().unwrap(),
            health_notes: None,
            description: None,
            status: Status::Available,
            created_at: DateTime::UNIX_EPOCH.coerce(),
            updated_at: DateTime::UNIX_EPOCH.coerce(),
        }
    }

    #[test]
    fn search_folds_case_on_name_and_code() {
        let rex = animal(1, "Rex", "DOG-001");

        assert!(Search::new("").matches(&rex));
        assert!(Search::new("rEx").matches(&rex));
        assert!(Search::new("e").matches(&rex));
        assert!(Search::new("dog-0").matches(&rex));

        assert!(!Search::new("Bella").matches(&rex));
        assert!(!Search::new("rex ").matches(&rex));
    }

    #[test]
    fn patch_touches_provided_fields_only() {
        let mut rex = animal(1, "Rex", "DOG-001");
        rex.health_notes = Some("Vaccinated".parse().unwrap());

        let mut patch = Patch::status(rex.id, Status::Sold);
        patch.health_notes = Some(None);
        patch.apply_to(&mut rex);

        assert_eq!(rex.status, Status::Sold);
        assert_eq!(rex.health_notes, None);
        assert_eq!(rex.name.as_ref(), "Rex");
        assert_eq!(rex.sale_price, Money::new(500.into()).unwrap());
    }

    #[test]
    fn status_defaults_to_available() {
        assert_eq!(Status::default(), Status::Available);
        assert_eq!(Status::InTreatment.to_string(), "IN_TREATMENT");
    }
}
