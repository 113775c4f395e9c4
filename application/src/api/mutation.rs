//! GraphQL [`Mutation`]s definitions.

use common::{Date, Money};
use juniper::{graphql_object, Nullable};
use service::{command, domain, query, Command as _};

use crate::{
    api::{
        self, animal::AnimalError, breed::TaxonomyError, client::ClientError,
    },
    AsError, Context, Error,
};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `Species` with the provided name.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createSpecies",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_species(
        name: api::species::Name,
        ctx: &Context,
    ) -> Result<api::Species, Error> {
        ctx.service()
            .execute(command::species::Create::insert(domain::species::New {
                name: name.into(),
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Renames the specified `Species`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `SPECIES_NOT_EXISTS` - `Species` with the specified ID doesn't exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateSpecies",
            id = %id,
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_species(
        id: api::species::Id,
        name: api::species::Name,
        ctx: &Context,
    ) -> Result<api::Species, Error> {
        let id = id.into();
        _ = api::species::find(ctx, id)
            .await?
            .ok_or_else(|| TaxonomyError::SpeciesNotExists.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::species::Change::update(
                domain::species::Changes {
                    id,
                    name: name.into(),
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the specified `Species`, returning its ID.
    ///
    /// Its `Breed`s and `Animal`s are left as they are, referencing nothing.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `SPECIES_NOT_EXISTS` - `Species` with the specified ID doesn't exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteSpecies",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_species(
        id: api::species::Id,
        ctx: &Context,
    ) -> Result<api::species::Id, Error> {
        let species = api::species::find(ctx, id.into())
            .await?
            .ok_or_else(|| TaxonomyError::SpeciesNotExists.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::species::Remove::delete(species.id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| species.id.into())
    }

    /// Creates a new `Breed` of the specified `Species`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `SPECIES_NOT_EXISTS` - `Species` with the specified ID doesn't exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createBreed",
            name = %name,
            otel.name = Self::SPAN_NAME,
            species_id = %species_id,
        ),
    )]
    pub async fn create_breed(
        name: api::breed::Name,
        species_id: api::species::Id,
        ctx: &Context,
    ) -> Result<api::Breed, Error> {
        let species_id = species_id.into();
        api::breed::check_taxonomy(ctx, species_id, None).await?;

        ctx.service()
            .execute(command::breed::Create::insert(domain::breed::New {
                name: name.into(),
                species_id,
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Renames the specified `Breed`, and moves it to the specified `Species`.
    ///
    /// `Animal`s of the `Breed` keep their own `Species`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BREED_NOT_EXISTS` - `Breed` with the specified ID doesn't exist;
    /// - `SPECIES_NOT_EXISTS` - `Species` with the specified ID doesn't exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateBreed",
            id = %id,
            name = %name,
            otel.name = Self::SPAN_NAME,
            species_id = %species_id,
        ),
    )]
    pub async fn update_breed(
        id: api::breed::Id,
        name: api::breed::Name,
        species_id: api::species::Id,
        ctx: &Context,
    ) -> Result<api::Breed, Error> {
        let id = id.into();
        _ = api::breed::find(ctx, id)
            .await?
            .ok_or_else(|| TaxonomyError::BreedNotExists.into())
            .map_err(ctx.error())?;
        let species_id = species_id.into();
        api::breed::check_taxonomy(ctx, species_id, None).await?;

        ctx.service()
            .execute(command::breed::Change::update(domain::breed::Changes {
                id,
                name: name.into(),
                species_id,
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the specified `Breed`, returning its ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BREED_NOT_EXISTS` - `Breed` with the specified ID doesn't exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteBreed",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_breed(
        id: api::breed::Id,
        ctx: &Context,
    ) -> Result<api::breed::Id, Error> {
        let breed = api::breed::find(ctx, id.into())
            .await?
            .ok_or_else(|| TaxonomyError::BreedNotExists.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::breed::Remove::delete(breed.id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| breed.id.into())
    }

    /// Registers a new `Animal` in the shop.
    ///
    /// `AVAILABLE` status is assumed, unless specified.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `SPECIES_NOT_EXISTS` - `Species` with the specified ID doesn't exist;
    /// - `BREED_NOT_EXISTS` - `Breed` with the specified ID doesn't exist;
    /// - `BREED_SPECIES_MISMATCH` - `Breed` doesn't belong to the `Species`.
    #[tracing::instrument(
        skip_all,
        fields(
            breed_id = %breed_id,
            gql.name = "createAnimal",
            name = %name,
            otel.name = Self::SPAN_NAME,
            registration_code = %registration_code,
            species_id = %species_id,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "GraphQL arguments")]
    pub async fn create_animal(
        name: api::animal::Name,
        species_id: api::species::Id,
        breed_id: api::breed::Id,
        birth_date: Date,
        arrival_date: Date,
        sex: api::animal::Sex,
        coat_color: api::animal::CoatColor,
        registration_code: api::animal::RegistrationCode,
        sale_price: Money,
        health_notes: Option<api::animal::HealthNotes>,
        description: Option<api::animal::Description>,
        status: Option<api::animal::Status>,
        ctx: &Context,
    ) -> Result<api::Animal, Error> {
        let (species_id, breed_id) = (species_id.into(), breed_id.into());
        api::breed::check_taxonomy(ctx, species_id, Some(breed_id)).await?;

        ctx.service()
            .execute(command::CreateAnimal {
                name: name.into(),
                species_id,
                breed_id,
                birth_date,
                arrival_date,
                sex: sex.into(),
                coat_color: coat_color.into(),
                registration_code: registration_code.into(),
                sale_price,
                health_notes: health_notes.map(Into::into),
                description: description.map(Into::into),
                status: status.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Changes the specified `Animal`.
    ///
    /// Omitted arguments leave the fields untouched, while an explicit `null`
    /// clears the optional ones.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ANIMAL_NOT_EXISTS` - `Animal` with the specified ID doesn't exist;
    /// - `SPECIES_NOT_EXISTS` - `Species` with the specified ID doesn't exist;
    /// - `BREED_NOT_EXISTS` - `Breed` with the specified ID doesn't exist;
    /// - `BREED_SPECIES_MISMATCH` - `Breed` doesn't belong to the `Species`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateAnimal",
            id = %id,
            otel.name = Self::SPAN_NAME,
            status = ?status,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "GraphQL arguments")]
    pub async fn update_animal(
        id: api::animal::Id,
        name: Option<api::animal::Name>,
        species_id: Option<api::species::Id>,
        breed_id: Option<api::breed::Id>,
        birth_date: Option<Date>,
        arrival_date: Option<Date>,
        sex: Option<api::animal::Sex>,
        coat_color: Option<api::animal::CoatColor>,
        registration_code: Option<api::animal::RegistrationCode>,
        sale_price: Option<Money>,
        health_notes: Nullable<api::animal::HealthNotes>,
        description: Nullable<api::animal::Description>,
        status: Option<api::animal::Status>,
        ctx: &Context,
    ) -> Result<api::Animal, Error> {
        let current = api::animal::find(ctx, id.into())
            .await?
            .ok_or_else(|| AnimalError::NotExists.into())
            .map_err(ctx.error())?;

        let species_id = species_id.map(domain::species::Id::from);
        let breed_id = breed_id.map(domain::breed::Id::from);
        if species_id.is_some() || breed_id.is_some() {
            api::breed::check_taxonomy(
                ctx,
                species_id.unwrap_or(current.species_id),
                Some(breed_id.unwrap_or(current.breed_id)),
            )
            .await?;
        }

        ctx.service()
            .execute(command::animal::Change::update(domain::animal::Patch {
                id: current.id,
                name: name.map(Into::into),
                species_id,
                breed_id,
                birth_date,
                arrival_date,
                sex: sex.map(Into::into),
                coat_color: coat_color.map(Into::into),
                registration_code: registration_code.map(Into::into),
                sale_price,
                health_notes: api::nullable_change(health_notes),
                description: api::nullable_change(description),
                status: status.map(Into::into),
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the specified `Animal`, returning its ID.
    ///
    /// Its `Transaction`s are left as they are, referencing nothing.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ANIMAL_NOT_EXISTS` - `Animal` with the specified ID doesn't exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteAnimal",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_animal(
        id: api::animal::Id,
        ctx: &Context,
    ) -> Result<api::animal::Id, Error> {
        let animal = api::animal::find(ctx, id.into())
            .await?
            .ok_or_else(|| AnimalError::NotExists.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::animal::Remove::delete(animal.id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| animal.id.into())
    }

    /// Registers a new `Client` of the shop.
    ///
    /// Blank `email` means no email.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_EMAIL` - non-blank `email` is not a valid address.
    #[tracing::instrument(
        skip_all,
        fields(
            cpf = %cpf,
            full_name = %full_name,
            gql.name = "createClient",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_client(
        full_name: api::client::FullName,
        cpf: api::client::Cpf,
        phone: api::client::Phone,
        rg: Option<api::client::Rg>,
        email: Option<String>,
        address: Option<api::client::Address>,
        ctx: &Context,
    ) -> Result<api::Client, Error> {
        let email = match email {
            Some(email) => api::client::parse_email(ctx, &email)?,
            None => None,
        };

        ctx.service()
            .execute(command::client::Create::insert(domain::client::New {
                full_name: full_name.into(),
                cpf: cpf.into(),
                rg: rg.map(Into::into),
                phone: phone.into(),
                email,
                address: address.map(Into::into),
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Changes the specified `Client`.
    ///
    /// Omitted arguments leave the fields untouched, while an explicit `null`
    /// (or a blank `email`) clears the optional ones.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CLIENT_NOT_EXISTS` - `Client` with the specified ID doesn't exist;
    /// - `INVALID_EMAIL` - non-blank `email` is not a valid address.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateClient",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "GraphQL arguments")]
    pub async fn update_client(
        id: api::client::Id,
        full_name: Option<api::client::FullName>,
        cpf: Option<api::client::Cpf>,
        phone: Option<api::client::Phone>,
        rg: Nullable<api::client::Rg>,
        email: Nullable<String>,
        address: Nullable<api::client::Address>,
        ctx: &Context,
    ) -> Result<api::Client, Error> {
        let email = match email {
            Nullable::ImplicitNull => None,
            Nullable::ExplicitNull => Some(None),
            Nullable::Some(email) => {
                Some(api::client::parse_email(ctx, &email)?)
            }
        };
        let current = api::client::find(ctx, id.into())
            .await?
            .ok_or_else(|| ClientError::NotExists.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::client::Change::update(domain::client::Patch {
                id: current.id,
                full_name: full_name.map(Into::into),
                cpf: cpf.map(Into::into),
                rg: api::nullable_change(rg),
                phone: phone.map(Into::into),
                email,
                address: api::nullable_change(address),
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the specified `Client`, returning its ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CLIENT_NOT_EXISTS` - `Client` with the specified ID doesn't exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteClient",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_client(
        id: api::client::Id,
        ctx: &Context,
    ) -> Result<api::client::Id, Error> {
        let client = api::client::find(ctx, id.into())
            .await?
            .ok_or_else(|| ClientError::NotExists.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::client::Remove::delete(client.id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| client.id.into())
    }

    /// Sells or donates the specified `AVAILABLE` `Animal` to the specified
    /// `Client`.
    ///
    /// `Animal` becomes `SOLD` after a `SALE`, or `ADOPTED` after a
    /// `DONATION`, which is always free.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ANIMAL_NOT_EXISTS` - `Animal` with the specified ID doesn't exist;
    /// - `ANIMAL_NOT_AVAILABLE` - `Animal` is not `AVAILABLE`;
    /// - `CLIENT_NOT_EXISTS` - `Client` with the specified ID doesn't exist;
    /// - `SALE_AMOUNT_REQUIRED` - `SALE` is missing its `amount`;
    /// - `TRANSACTION_PARTIALLY_COMPLETED` - `Transaction` is recorded, but
    ///   the `Animal` status is not updated, which is reconciled with the
    ///   `applyTransactionStatus` mutation.
    #[tracing::instrument(
        skip_all,
        fields(
            amount = ?amount,
            animal_id = %animal_id,
            client_id = %client_id,
            gql.name = "createTransaction",
            kind = ?kind,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_transaction(
        animal_id: api::animal::Id,
        client_id: api::client::Id,
        kind: api::transaction::Kind,
        amount: Option<Money>,
        notes: Option<api::transaction::Notes>,
        ctx: &Context,
    ) -> Result<api::Transaction, Error> {
        let animal = ctx
            .service()
            .execute(query::animal::Candidate(animal_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        let client = api::client::find(ctx, client_id.into())
            .await?
            .ok_or_else(|| ClientError::NotExists.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::CreateTransaction {
                animal_id: animal.id,
                client_id: client.id,
                kind: kind.into(),
                amount,
                notes: notes.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Applies the status resulting from the specified recorded `Transaction`
    /// to its `Animal`, returning the updated `Animal`.
    ///
    /// Reconciles a `TRANSACTION_PARTIALLY_COMPLETED` outcome. Repeating it is
    /// harmless.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `TRANSACTION_NOT_EXISTS` - `Transaction` with the specified ID
    ///   doesn't exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "applyTransactionStatus",
            otel.name = Self::SPAN_NAME,
            transaction_id = %transaction_id,
        ),
    )]
    pub async fn apply_transaction_status(
        transaction_id: api::transaction::Id,
        ctx: &Context,
    ) -> Result<api::Animal, Error> {
        ctx.service()
            .execute(command::ApplyTransactionStatus {
                transaction_id: transaction_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}
