//! GraphQL [`Query`]s definitions.

use common::{Date, DateTime};
use juniper::graphql_object;
use service::{domain, query, Query as _};

use crate::{api, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Lists all the `Species`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "species",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn species(ctx: &Context) -> Result<Vec<api::Species>, Error> {
        ctx.service()
            .execute(query::species::List::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|all| all.into_iter().map(Into::into).collect())
    }

    /// Lists all the `Breed`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "breeds",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn breeds(ctx: &Context) -> Result<Vec<api::Breed>, Error> {
        ctx.service()
            .execute(query::breed::List::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|all| all.into_iter().map(Into::into).collect())
    }

    /// Lists the `Breed`s belonging to the specified `Species`.
    ///
    /// Unknown `Species` have no `Breed`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "breedsBySpecies",
            otel.name = Self::SPAN_NAME,
            species_id = %species_id,
        ),
    )]
    pub async fn breeds_by_species(
        species_id: api::species::Id,
        ctx: &Context,
    ) -> Result<Vec<api::Breed>, Error> {
        ctx.service()
            .execute(query::breed::BySpecies(species_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|all| all.into_iter().map(Into::into).collect())
    }

    /// Lists the `Animal`s, optionally searching them by a part of their name
    /// or registration code (case-insensitive).
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "animals",
            otel.name = Self::SPAN_NAME,
            search = ?search,
        ),
    )]
    pub async fn animals(
        search: Option<String>,
        ctx: &Context,
    ) -> Result<Vec<api::Animal>, Error> {
        match search {
            Some(term) => {
                ctx.service()
                    .execute(query::animal::Search::by(
                        domain::animal::Search::new(term),
                    ))
                    .await
            }
            None => ctx.service().execute(query::animal::List::by(())).await,
        }
        .map_err(AsError::into_error)
        .map_err(ctx.error())
        .map(|all| all.into_iter().map(Into::into).collect())
    }

    /// Returns the `Animal` with the specified ID, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "animal",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn animal(
        id: api::animal::Id,
        ctx: &Context,
    ) -> Result<Option<api::Animal>, Error> {
        Ok(api::animal::find(ctx, id.into()).await?.map(Into::into))
    }

    /// Lists the `AVAILABLE` `Animal`s, which may take part in a new
    /// `Transaction`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "availableAnimals",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn available_animals(
        ctx: &Context,
    ) -> Result<Vec<api::Animal>, Error> {
        ctx.service()
            .execute(query::animal::Available)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|all| all.into_iter().map(Into::into).collect())
    }

    /// Lists the `Client`s, optionally searching them by a part of their name,
    /// email, CPF or phone.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "clients",
            otel.name = Self::SPAN_NAME,
            search = ?search,
        ),
    )]
    pub async fn clients(
        search: Option<String>,
        ctx: &Context,
    ) -> Result<Vec<api::Client>, Error> {
        match search {
            Some(term) => {
                ctx.service()
                    .execute(query::client::Search::by(
                        domain::client::Search::new(term),
                    ))
                    .await
            }
            None => ctx.service().execute(query::client::List::by(())).await,
        }
        .map_err(AsError::into_error)
        .map_err(ctx.error())
        .map(|all| all.into_iter().map(Into::into).collect())
    }

    /// Returns the `Client` with the specified ID, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "client",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn client(
        id: api::client::Id,
        ctx: &Context,
    ) -> Result<Option<api::Client>, Error> {
        Ok(api::client::find(ctx, id.into()).await?.map(Into::into))
    }

    /// Lists the `Transaction`s, optionally filtering them by their kind and
    /// an inclusive range of dates.
    ///
    /// A missing bound of the range leaves it open on that side.
    #[tracing::instrument(
        skip_all,
        fields(
            end_date = ?end_date,
            gql.name = "transactions",
            kind = ?kind,
            otel.name = Self::SPAN_NAME,
            start_date = ?start_date,
        ),
    )]
    pub async fn transactions(
        kind: Option<api::transaction::Kind>,
        start_date: Option<Date>,
        end_date: Option<Date>,
        ctx: &Context,
    ) -> Result<Vec<api::Transaction>, Error> {
        let kind = kind.map(domain::transaction::Kind::from);
        let mut transactions = if start_date.is_some() || end_date.is_some() {
            ctx.service()
                .execute(query::transaction::ByDateRange::by(
                    domain::transaction::DateRange {
                        start: start_date.unwrap_or(Date::MIN),
                        end: end_date.unwrap_or(Date::MAX),
                    },
                ))
                .await
        } else if let Some(kind) = kind {
            ctx.service()
                .execute(query::transaction::ByKind(kind))
                .await
        } else {
            ctx.service()
                .execute(query::transaction::List::by(()))
                .await
        }
        .map_err(AsError::into_error)
        .map_err(ctx.error())?;

        if let Some(kind) = kind {
            transactions.retain(|t| t.kind == kind);
        }
        Ok(transactions.into_iter().map(Into::into).collect())
    }

    /// Returns the `Transaction` with the specified ID, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "transaction",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn transaction(
        id: api::transaction::Id,
        ctx: &Context,
    ) -> Result<Option<api::Transaction>, Error> {
        ctx.service()
            .execute(query::transaction::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|t| t.map(Into::into))
    }

    /// Aggregates the `Dashboard` of the shop as of now.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "dashboard",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn dashboard(
        ctx: &Context,
    ) -> Result<api::report::Dashboard, Error> {
        ctx.service()
            .execute(query::report::Dashboard {
                now: DateTime::now(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Sums up all the recorded `Transaction`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "transactionTotals",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn transaction_totals(
        ctx: &Context,
    ) -> Result<api::report::TransactionTotals, Error> {
        ctx.service()
            .execute(query::report::TransactionTotals)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}
