//! GraphQL API definitions.

pub mod animal;
pub mod breed;
pub mod client;
mod mutation;
mod query;
pub mod report;
pub mod scalar;
pub mod species;
pub mod transaction;

use juniper::{EmptySubscription, Nullable};

use crate::{AsError, Context, Error};

pub use self::{
    animal::Animal, breed::Breed, client::Client, mutation::Mutation,
    query::Query, species::Species, transaction::Transaction,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

/// Converts a [`Nullable`] argument into a change of an optional field.
///
/// Omitted argument leaves the field untouched, while an explicit `null`
/// clears it.
pub(crate) fn nullable_change<T, U>(arg: Nullable<T>) -> Option<Option<U>>
where
    T: Into<U>,
{
    match arg {
        Nullable::ImplicitNull => None,
        Nullable::ExplicitNull => Some(None),
        Nullable::Some(v) => Some(Some(v.into())),
    }
}

/// Converts a number of items into a GraphQL `Int`.
pub(crate) fn count(ctx: &Context, n: usize) -> Result<i32, Error> {
    i32::try_from(n)
        .map_err(AsError::into_error)
        .map_err(ctx.error())
}

#[cfg(test)]
mod spec {
    use juniper::Nullable;

    use super::nullable_change;

    #[test]
    fn omitted_argument_keeps_field() {
        assert_eq!(
            nullable_change::<i32, i64>(Nullable::ImplicitNull),
            None,
        );
        assert_eq!(
            nullable_change::<i32, i64>(Nullable::ExplicitNull),
            Some(None),
        );
        assert_eq!(
            nullable_change::<i32, i64>(Nullable::Some(3)),
            Some(Some(3)),
        );
    }
}
