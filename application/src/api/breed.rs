//! [`Breed`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};

use crate::{api, api::scalar, define_error, AsError, Context, Error};

/// Second level of the animal taxonomy.
#[derive(Clone, Debug, From)]
pub struct Breed(domain::Breed);

/// Second level of the animal taxonomy, belonging to exactly one `Species`.
#[graphql_object(context = Context)]
impl Breed {
    /// Unique identifier of this `Breed`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Display name of this `Breed`.
    #[must_use]
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// ID of the `Species` this `Breed` belongs to.
    #[must_use]
    pub fn species_id(&self) -> api::species::Id {
        self.0.species_id.into()
    }

    /// `Species` this `Breed` belongs to.
    ///
    /// `null` if the `Species` doesn't exist anymore.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Breed.species",
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

    /// `DateTime` when this `Breed` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// `DateTime` when this `Breed` was last modified.
    #[must_use]
    pub fn updated_at(&self) -> DateTime {
        self.0.updated_at.coerce()
    }
}

/// Unique identifier of a `Breed`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::breed::Id)]
#[into(domain::breed::Id)]
#[graphql(name = "BreedId", transparent)]
pub struct Id(i32);

/// Display name of a `Breed`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "BreedName", with = scalar::Via::<domain::breed::Name>)]
pub struct Name(domain::breed::Name);

/// Looks up the [`Breed`] with the provided ID, if any.
///
/// # Errors
///
/// If the [`Breed`] fails to be fetched.
pub(crate) async fn find(
    ctx: &Context,
    id: domain::breed::Id,
) -> Result<Option<domain::Breed>, Error> {
    ctx.service()
        .execute(query::breed::ById::by(id))
        .await
        .map_err(AsError::into_error)
        .map_err(ctx.error())
}

/// Ensures the referenced [`Species`] exists, and the referenced [`Breed`]
/// (if any) exists and belongs to it.
///
/// # Errors
///
/// With `SPECIES_NOT_EXISTS`, `BREED_NOT_EXISTS` or `BREED_SPECIES_MISMATCH`
/// codes, or if the entities fail to be fetched.
///
/// [`Species`]: domain::Species
pub(crate) async fn check_taxonomy(
    ctx: &Context,
    species_id: domain::species::Id,
    breed_id: Option<domain::breed::Id>,
) -> Result<(), Error> {
    ctx.service()
        .execute(query::breed::CheckTaxonomy {
            species_id,
            breed_id,
        })
        .await
        .map_err(AsError::into_error)
        .map_err(ctx.error())
}

impl AsError for query::breed::TaxonomyError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::SpeciesNotExists(_) => {
                Some(TaxonomyError::SpeciesNotExists.into())
            }
            Self::BreedNotExists(_) => {
                Some(TaxonomyError::BreedNotExists.into())
            }
            Self::BreedSpeciesMismatch { .. } => {
                Some(TaxonomyError::BreedSpeciesMismatch.into())
            }
        }
    }
}

define_error! {
    enum TaxonomyError {
        #[code = "SPECIES_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Species` with the specified ID does not exist"]
        SpeciesNotExists,

        #[code = "BREED_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Breed` with the specified ID does not exist"]
        BreedNotExists,

        #[code = "BREED_SPECIES_MISMATCH"]
        #[status = BAD_REQUEST]
        #[message = "`Breed` doesn't belong to the specified `Species`"]
        BreedSpeciesMismatch,
    }
}

#[cfg(test)]
mod spec {
    use service::query::breed::TaxonomyError;

    use crate::AsError as _;

    #[test]
    fn taxonomy_errors_have_own_codes() {
        for (err, code, status) in [
            (
                TaxonomyError::SpeciesNotExists(1.into()),
                "SPECIES_NOT_EXISTS",
                http::StatusCode::NOT_FOUND,
            ),
            (
                TaxonomyError::BreedNotExists(2.into()),
                "BREED_NOT_EXISTS",
                http::StatusCode::NOT_FOUND,
            ),
            (
                TaxonomyError::BreedSpeciesMismatch {
                    breed_id: 2.into(),
                    species_id: 1.into(),
                },
                "BREED_SPECIES_MISMATCH",
                http::StatusCode::BAD_REQUEST,
            ),
        ] {
            let gql = err.as_error();

            assert_eq!(gql.code, code);
            assert_eq!(gql.status_code, status);
        }
    }
}
