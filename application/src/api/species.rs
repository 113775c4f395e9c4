//! [`Species`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};

use crate::{api, api::scalar, AsError, Context, Error};

/// First level of the animal taxonomy.
#[derive(Clone, Debug, From)]
pub struct Species(domain::Species);

/// First level of the animal taxonomy, like "Dog" or "Cat".
#[graphql_object(context = Context)]
impl Species {
    /// Unique identifier of this `Species`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Display name of this `Species`.
    #[must_use]
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// `Breed`s belonging to this `Species`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Species.breeds",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn breeds(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Breed>, Error> {
        ctx.service()
            .execute(query::breed::BySpecies(self.0.id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|breeds| breeds.into_iter().map(Into::into).collect())
    }

    /// `DateTime` when this `Species` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// `DateTime` when this `Species` was last modified.
    #[must_use]
    pub fn updated_at(&self) -> DateTime {
        self.0.updated_at.coerce()
    }
}

/// Unique identifier of a `Species`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::species::Id)]
#[into(domain::species::Id)]
#[graphql(name = "SpeciesId", transparent)]
pub struct Id(i32);

/// Display name of a `Species`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "SpeciesName",
    with = scalar::Via::<domain::species::Name>,
)]
pub struct Name(domain::species::Name);

/// Looks up the [`Species`] with the provided ID, if any.
///
/// # Errors
///
/// If the [`Species`] fails to be fetched.
pub(crate) async fn find(
    ctx: &Context,
    id: domain::species::Id,
) -> Result<Option<domain::Species>, Error> {
    ctx.service()
        .execute(query::species::ById::by(id))
        .await
        .map_err(AsError::into_error)
        .map_err(ctx.error())
}
