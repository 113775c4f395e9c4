//! [`Transaction`]-related definitions.

use common::{DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{command, domain};

use crate::{api, api::scalar, define_error, AsError, Context, Error};

/// A sale or a donation of an `Animal` to a `Client`.
#[derive(Clone, Debug, From)]
pub struct Transaction(domain::Transaction);

/// A sale or a donation of an `Animal` to a `Client`.
///
/// Cannot be changed once recorded.
#[graphql_object(context = Context)]
impl Transaction {
    /// Unique identifier of this `Transaction`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// ID of the `Animal` this `Transaction` is about.
    #[must_use]
    pub fn animal_id(&self) -> api::animal::Id {
        self.0.animal_id.into()
    }

    /// `Animal` this `Transaction` is about.
    ///
    /// `null` if the `Animal` doesn't exist anymore.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Transaction.animal",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn animal(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Animal>, Error> {
        Ok(api::animal::find(ctx, self.0.animal_id)
            .await?
            .map(Into::into))
    }

    /// ID of the `Client` this `Transaction` is made with.
    #[must_use]
    pub fn client_id(&self) -> api::client::Id {
        self.0.client_id.into()
    }

    /// `Client` this `Transaction` is made with.
    ///
    /// `null` if the `Client` doesn't exist anymore.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Transaction.client",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn client(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Client>, Error> {
        Ok(api::client::find(ctx, self.0.client_id)
            .await?
            .map(Into::into))
    }

    /// Kind of this `Transaction`.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.0.kind.into()
    }

    /// `DateTime` when this `Transaction` took place.
    #[must_use]
    pub fn date(&self) -> DateTime {
        self.0.date.coerce()
    }

    /// Final amount paid by the `Client`.
    ///
    /// Always zero for a `DONATION`.
    #[must_use]
    pub fn amount(&self) -> Money {
        self.0.amount
    }

    /// Notes of this `Transaction`, if any.
    #[must_use]
    pub fn notes(&self) -> Option<Notes> {
        self.0.notes.clone().map(Into::into)
    }

    /// `DateTime` when this `Transaction` was recorded.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Transaction`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::transaction::Id)]
#[into(domain::transaction::Id)]
#[graphql(name = "TransactionId", transparent)]
pub struct Id(i32);

/// Notes of a `Transaction`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "TransactionNotes",
    with = scalar::Via::<domain::transaction::Notes>,
)]
pub struct Notes(domain::transaction::Notes);

/// Kind of a `Transaction`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "TransactionKind")]
pub enum Kind {
    /// `Animal` is sold for money, becoming `SOLD`.
    Sale,

    /// `Animal` is given away for free, becoming `ADOPTED`.
    Donation,
}

impl From<domain::transaction::Kind> for Kind {
    fn from(kind: domain::transaction::Kind) -> Self {
        use domain::transaction::Kind as K;
        match kind {
            K::Sale => Self::Sale,
            K::Donation => Self::Donation,
        }
    }
}

impl From<Kind> for domain::transaction::Kind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Sale => Self::Sale,
            Kind::Donation => Self::Donation,
        }
    }
}

impl AsError for command::create_transaction::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::NotRecorded(e) => e.try_as_error(),
            Self::AmountRequired => {
                Some(TransactionError::SaleAmountRequired.into())
            }
            Self::StatusNotUpdated { transaction, .. } => {
                let mut err =
                    Error::from(TransactionError::PartiallyCompleted);
                err.message = format!(
                    "{} (`Transaction(id: {})`, `Animal(id: {})`)",
                    err.message, transaction.id, transaction.animal_id,
                );
                Some(err)
            }
        }
    }
}

impl AsError for command::apply_transaction_status::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::TransactionNotExists(_) => {
                Some(TransactionError::NotExists.into())
            }
        }
    }
}

define_error! {
    enum TransactionError {
        #[code = "SALE_AMOUNT_REQUIRED"]
        #[status = BAD_REQUEST]
        #[message = "`SALE` requires an amount"]
        SaleAmountRequired,

        #[code = "TRANSACTION_PARTIALLY_COMPLETED"]
        #[status = INTERNAL_SERVER_ERROR]
        #[message = "`Transaction` is recorded, but `Animal` status is not \
                     updated"]
        PartiallyCompleted,

        #[code = "ANIMAL_NOT_AVAILABLE"]
        #[status = CONFLICT]
        #[message = "`Animal` is not available for a `Transaction`"]
        AnimalNotAvailable,

        #[code = "TRANSACTION_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Transaction` with the specified ID does not exist"]
        NotExists,
    }
}

#[cfg(test)]
mod spec {
    use common::{DateTime, Money};
    use service::{
        command::create_transaction::ExecutionError,
        domain::{transaction, Transaction},
        infra::{database, memory},
    };

    use crate::AsError as _;

    #[test]
    fn partial_completion_has_its_own_code() {
        let at = DateTime::now();
        let err = ExecutionError::StatusNotUpdated {
            transaction: Transaction {
                id: 5.into(),
                animal_id: 1.into(),
                client_id: 2.into(),
                kind: transaction::Kind::Sale,
                date: at.coerce(),
                amount: "450".parse::<Money>().unwrap(),
                notes: None,
                created_at: at.coerce(),
                updated_at: at.coerce(),
            },
            source: database::Error::from(memory::Error::NotFound {
                resource: "Animal",
                id: 1,
            }),
        };

        let gql = err.as_error();

        assert_eq!(gql.code, "TRANSACTION_PARTIALLY_COMPLETED");
        assert!(gql.message.contains("`Transaction(id: 5)`"), "{gql}");
    }

    #[test]
    fn missing_amount_is_bad_request() {
        let gql = ExecutionError::AmountRequired.as_error();

        assert_eq!(gql.code, "SALE_AMOUNT_REQUIRED");
        assert_eq!(gql.status_code, http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn failed_recording_is_internal() {
        let gql = ExecutionError::NotRecorded(database::Error::from(
            memory::Error::NotFound {
                resource: "Transaction",
                id: 1,
            },
        ))
        .as_error();

        assert_eq!(gql.code, "INTERNAL_SERVER_ERROR");
    }
}
