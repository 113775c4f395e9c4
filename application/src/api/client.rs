//! [`Client`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};

use crate::{api::scalar, define_error, AsError, Context, Error};

/// A person buying or adopting animals.
#[derive(Clone, Debug, From)]
pub struct Client(domain::Client);

/// A person buying or adopting animals.
#[graphql_object(context = Context)]
impl Client {
    /// Unique identifier of this `Client`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Full name of this `Client`.
    #[must_use]
    pub fn full_name(&self) -> FullName {
        self.0.full_name.clone().into()
    }

    /// CPF (national identity number) of this `Client`.
    #[must_use]
    pub fn cpf(&self) -> Cpf {
        self.0.cpf.clone().into()
    }

    /// RG (secondary identity document) of this `Client`, if any.
    #[must_use]
    pub fn rg(&self) -> Option<Rg> {
        self.0.rg.clone().map(Into::into)
    }

    /// Phone number of this `Client`.
    #[must_use]
    pub fn phone(&self) -> Phone {
        self.0.phone.clone().into()
    }

    /// Email of this `Client`, if any.
    #[must_use]
    pub fn email(&self) -> Option<Email> {
        self.0.email.clone().map(Into::into)
    }

    /// Address of this `Client`, if any.
    #[must_use]
    pub fn address(&self) -> Option<Address> {
        self.0.address.clone().map(Into::into)
    }

    /// `DateTime` when this `Client` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// `DateTime` when this `Client` was last modified.
    #[must_use]
    pub fn updated_at(&self) -> DateTime {
        self.0.updated_at.coerce()
    }
}

/// Unique identifier of a `Client`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::client::Id)]
#[into(domain::client::Id)]
#[graphql(name = "ClientId", transparent)]
pub struct Id(i32);

/// Full name of a `Client`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ClientFullName",
    with = scalar::Via::<domain::client::FullName>,
)]
pub struct FullName(domain::client::FullName);

/// CPF of a `Client`: exactly 11 digits.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ClientCpf", with = scalar::Via::<domain::client::Cpf>)]
pub struct Cpf(domain::client::Cpf);

/// RG of a `Client`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ClientRg", with = scalar::Via::<domain::client::Rg>)]
pub struct Rg(domain::client::Rg);

/// Phone number of a `Client`: 10 or 11 digits, area code included.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ClientPhone", with = scalar::Via::<domain::client::Phone>)]
pub struct Phone(domain::client::Phone);

/// Email of a `Client`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "ClientEmail", with = scalar::Via::<domain::client::Email>)]
pub struct Email(domain::client::Email);

/// Address of a `Client`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ClientAddress",
    with = scalar::Via::<domain::client::Address>,
)]
pub struct Address(domain::client::Address);

/// Parses an optional `Client` email, where a blank string means no email.
///
/// # Errors
///
/// With `INVALID_EMAIL` code if a non-blank `email` is malformed.
pub(crate) fn parse_email(
    ctx: &Context,
    email: &str,
) -> Result<Option<domain::client::Email>, Error> {
    domain::client::Email::new_optional(email)
        .map_err(|_| ClientError::InvalidEmail.into())
        .map_err(ctx.error())
}

/// Looks up the [`Client`] with the provided ID, if any.
///
/// # Errors
///
/// If the [`Client`] fails to be fetched.
pub(crate) async fn find(
    ctx: &Context,
    id: domain::client::Id,
) -> Result<Option<domain::Client>, Error> {
    ctx.service()
        .execute(query::client::ById::by(id))
        .await
        .map_err(AsError::into_error)
        .map_err(ctx.error())
}

define_error! {
    enum ClientError {
        #[code = "INVALID_EMAIL"]
        #[status = BAD_REQUEST]
        #[message = "Email must be either empty or a valid address"]
        InvalidEmail,

        #[code = "CLIENT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Client` with the specified ID does not exist"]
        NotExists,
    }
}
