//! [`Command`] for creating a new [`Animal`].

use common::{operations::Insert, Date, Money};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{Breed, Species};
use crate::{
    domain::{animal, breed, species, Animal},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Animal`].
#[derive(Clone, Debug)]
pub struct CreateAnimal {
    /// [`animal::Name`] of a new [`Animal`].
    pub name: animal::Name,

    /// ID of the [`Species`] of a new [`Animal`].
    pub species_id: species::Id,

    /// ID of the [`Breed`] of a new [`Animal`].
    ///
    /// Caller is responsible for it belonging to the [`Species`].
    pub breed_id: breed::Id,

    /// [`Date`] when a new [`Animal`] was born.
    pub birth_date: Date,

    /// [`Date`] when a new [`Animal`] arrived to the shop.
    pub arrival_date: Date,

    /// [`animal::Sex`] of a new [`Animal`].
    pub sex: animal::Sex,

    /// [`animal::CoatColor`] of a new [`Animal`].
    pub coat_color: animal::CoatColor,

    /// [`animal::RegistrationCode`] of a new [`Animal`].
    pub registration_code: animal::RegistrationCode,

    /// Price a new [`Animal`] is offered for.
    pub sale_price: Money,

    /// [`animal::HealthNotes`] of a new [`Animal`].
    pub health_notes: Option<animal::HealthNotes>,

    /// [`animal::Description`] of a new [`Animal`].
    pub description: Option<animal::Description>,

    /// Initial [`animal::Status`] of a new [`Animal`].
    ///
    /// [`animal::Status::Available`] if not specified.
    pub status: Option<animal::Status>,
}

impl<Db> Command<CreateAnimal> for Service<Db>
where
    Db: Database<
        Insert<animal::New>,
        Ok = Animal,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Animal;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateAnimal) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateAnimal {
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
        } = cmd;

        self.database()
            .execute(Insert(animal::New {
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
                status: status.unwrap_or_default(),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`CreateAnimal`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
pub(crate) mod spec {
    use common::Money;
    use time::macros::date;

    use crate::{
        domain::{animal, Animal},
        infra::Memory,
        Command as _, Service,
    };

    use super::CreateAnimal;

    pub(crate) fn create_rex() -> CreateAnimal {
        CreateAnimal {
            name: animal::Name::new("Rex").unwrap(),
            species_id: 1.into(),
            breed_id: 1.into(),
            birth_date: date!(2023 - 03 - 01),
            arrival_date: date!(2024 - 01 - 15),
            sex: animal::Sex::Male,
            coat_color: animal::CoatColor::new("Golden").unwrap(),
            registration_code: animal::RegistrationCode::new("DOG-001")
                .unwrap(),
            sale_price: "500".parse::<Money>().unwrap(),
            health_notes: None,
            description: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn defaults_to_available() {
        let service = Service::new(Default::default(), Memory::new());

        let rex: Animal = service.execute(create_rex()).await.unwrap();
        assert_eq!(rex.status, animal::Status::Available);

        let bella: Animal = service
            .execute(CreateAnimal {
                name: animal::Name::new("Bella").unwrap(),
                status: Some(animal::Status::InTreatment),
                ..create_rex()
            })
            .await
            .unwrap();
        assert_eq!(bella.status, animal::Status::InTreatment);
        assert_ne!(rex.id, bella.id);
    }
}
