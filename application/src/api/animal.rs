//! [`Animal`]-related definitions.

use common::{Date, DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{command, domain, query, Query as _};

use crate::{
    api::{self, scalar, transaction::TransactionError},
    define_error, AsError, Context, Error,
};

/// An animal of the shop.
#[derive(Clone, Debug, From)]
pub struct Animal(domain::Animal);

/// An animal of the shop.
#[graphql_object(context = Context)]
impl Animal {
    /// Unique identifier of this `Animal`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of this `Animal`.
    #[must_use]
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// ID of the `Species` of this `Animal`.
    #[must_use]
    pub fn species_id(&self) -> api::species::Id {
        self.0.species_id.into()
    }

    /// `Species` of this `Animal`.
    ///
    /// `null` if the `Species` doesn't exist anymore.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Animal.species",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn species(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Species>, Error> {
        Ok(api::species::find(ctx, self.0.species_id)
            .await?
            .map(Into::into))
    }

    /// ID of the `Breed` of this `Animal`.
    #[must_use]
    pub fn breed_id(&self) -> api::breed::Id {
        self.0.breed_id.into()
    }

    /// `Breed` of this `Animal`.
    ///
    /// `null` if the `Breed` doesn't exist anymore.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Animal.breed",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn breed(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Breed>, Error> {
        Ok(api::breed::find(ctx, self.0.breed_id).await?.map(Into::into))
    }

    /// `Date` when this `Animal` was born.
    #[must_use]
    pub fn birth_date(&self) -> Date {
        self.0.birth_date
    }

    /// `Date` when this `Animal` arrived to the shop.
    #[must_use]
    pub fn arrival_date(&self) -> Date {
        self.0.arrival_date
    }

    /// Sex of this `Animal`.
    #[must_use]
    pub fn sex(&self) -> Sex {
        self.0.sex.into()
    }

    /// Coat color of this `Animal`.
    #[must_use]
    pub fn coat_color(&self) -> CoatColor {
        self.0.coat_color.clone().into()
    }

    /// Registration code of this `Animal`.
    #[must_use]
    pub fn registration_code(&self) -> RegistrationCode {
        self.0.registration_code.clone().into()
    }

    /// Price this `Animal` is offered for.
    #[must_use]
    pub fn sale_price(&self) -> Money {
        self.0.sale_price
    }

    /// Health notes of this `Animal`, if any.
    #[must_use]
    pub fn health_notes(&self) -> Option<HealthNotes> {
        self.0.health_notes.clone().map(Into::into)
    }

    /// Description of this `Animal`, if any.
    #[must_use]
    pub fn description(&self) -> Option<Description> {
        self.0.description.clone().map(Into::into)
    }

    /// Current status of this `Animal`.
    #[must_use]
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// `DateTime` when this `Animal` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// `DateTime` when this `Animal` was last modified.
    #[must_use]
    pub fn updated_at(&self) -> DateTime {
        self.0.updated_at.coerce()
    }
}

/// Unique identifier of an `Animal`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::animal::Id)]
#[into(domain::animal::Id)]
#[graphql(name = "AnimalId", transparent)]
pub struct Id(i32);

/// Name of an `Animal`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "AnimalName", with = scalar::Via::<domain::animal::Name>)]
pub struct Name(domain::animal::Name);

/// Coat color of an `Animal`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "AnimalCoatColor",
    with = scalar::Via::<domain::animal::CoatColor>,
)]
pub struct CoatColor(domain::animal::CoatColor);

/// Registration code of an `Animal`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "AnimalRegistrationCode",
    with = scalar::Via::<domain::animal::RegistrationCode>,
)]
pub struct RegistrationCode(domain::animal::RegistrationCode);

/// Health notes of an `Animal`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "AnimalHealthNotes",
    with = scalar::Via::<domain::animal::HealthNotes>,
)]
pub struct HealthNotes(domain::animal::HealthNotes);

/// Description of an `Animal`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "AnimalDescription",
    with = scalar::Via::<domain::animal::Description>,
)]
pub struct Description(domain::animal::Description);

/// Sex of an `Animal`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "AnimalSex")]
pub enum Sex {
    /// A male.
    Male,

    /// A female.
    Female,
}

impl From<domain::animal::Sex> for Sex {
    fn from(sex: domain::animal::Sex) -> Self {
        use domain::animal::Sex as S;
        match sex {
            S::Male => Self::Male,
            S::Female => Self::Female,
        }
    }
}

impl From<Sex> for domain::animal::Sex {
    fn from(sex: Sex) -> Self {
        match sex {
            Sex::Male => Self::Male,
            Sex::Female => Self::Female,
        }
    }
}

/// Status of an `Animal`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "AnimalStatus")]
pub enum Status {
    /// Available for a sale or a donation.
    Available,

    /// Donated to a `Client`.
    Adopted,

    /// Under medical treatment.
    InTreatment,

    /// Sold to a `Client`.
    Sold,
}

impl From<domain::animal::Status> for Status {
    fn from(status: domain::animal::Status) -> Self {
        use domain::animal::Status as S;
        match status {
            S::Available => Self::Available,
            S::Adopted => Self::Adopted,
            S::InTreatment => Self::InTreatment,
            S::Sold => Self::Sold,
        }
    }
}

impl From<Status> for domain::animal::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Available => Self::Available,
            Status::Adopted => Self::Adopted,
            Status::InTreatment => Self::InTreatment,
            Status::Sold => Self::Sold,
        }
    }
}

/// Looks up the [`Animal`] with the provided ID, if any.
///
/// # Errors
///
/// If the [`Animal`] fails to be fetched.
pub(crate) async fn find(
    ctx: &Context,
    id: domain::animal::Id,
) -> Result<Option<domain::Animal>, Error> {
    ctx.service()
        .execute(query::animal::ById::by(id))
        .await
        .map_err(AsError::into_error)
        .map_err(ctx.error())
}

impl AsError for command::create_animal::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for query::animal::CandidateError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists(_) => Some(AnimalError::NotExists.into()),
            Self::NotAvailable(_) => {
                Some(TransactionError::AnimalNotAvailable.into())
            }
        }
    }
}

define_error! {
    enum AnimalError {
        #[code = "ANIMAL_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Animal` with the specified ID does not exist"]
        NotExists,
    }
}

#[cfg(test)]
mod spec {
    use service::{domain::animal, query::animal::CandidateError};

    use crate::AsError as _;

    use super::{Sex, Status};

    #[test]
    fn unavailable_candidate_is_conflict() {
        let gql = CandidateError::NotAvailable(animal::Status::Sold).as_error();

        assert_eq!(gql.code, "ANIMAL_NOT_AVAILABLE");
        assert_eq!(gql.status_code, http::StatusCode::CONFLICT);

        let gql = CandidateError::NotExists(7.into()).as_error();

        assert_eq!(gql.code, "ANIMAL_NOT_EXISTS");
    }

    #[test]
    fn status_converts_both_ways() {
        for status in [
            animal::Status::Available,
            animal::Status::Adopted,
            animal::Status::InTreatment,
            animal::Status::Sold,
        ] {
            assert_eq!(animal::Status::from(Status::from(status)), status);
        }
        for sex in [animal::Sex::Male, animal::Sex::Female] {
            assert_eq!(animal::Sex::from(Sex::from(sex)), sex);
        }
    }
}
