//! GraphQL scalar definitions.

use std::{fmt, marker::PhantomData, str::FromStr};

use juniper::{
    GraphQLType, InputValue, ParseScalarResult, ParseScalarValue, ScalarToken,
    ScalarValue, Value,
};

/// Helper type to use in `#[graphql(with = ..)]` attribute of a domain text
/// newtype wrapper.
///
/// The wrapped `As` type is rendered with its [`Display`] impl, and is parsed
/// (and so validated) with its [`FromStr`] impl.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Renders the wrapped `As` value as a GraphQL string.
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: fmt::Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Parses a GraphQL string into the `T` wrapper of `As` value.
    ///
    /// # Errors
    ///
    /// If the input is not a string, or is rejected by the `As` type.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr,
        As::Err: fmt::Display,
        T: From<As> + GraphQLType<S, TypeInfo = ()>,
        S: ScalarValue,
    {
        let name = T::name(&()).unwrap_or("String");
        let s = input.as_string_value().ok_or_else(|| {
            format!("Expected `{name}` string, found: {input}")
        })?;
        s.parse::<As>()
            .map(T::from)
            .map_err(|e| format!("Invalid `{name}` \"{s}\": {e}"))
    }

    /// Parses the provided [`ScalarToken`] as a [`String`].
    ///
    /// # Errors
    ///
    /// If the token is not a string.
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, InputValue};
    use service::domain;

    use crate::api;

    use super::Via;

    type ViaName = Via<domain::animal::Name>;

    #[test]
    fn parses_trimmed_text() {
        let name = ViaName::from_input::<api::animal::Name, DefaultScalarValue>(
            &InputValue::scalar("  Rex "),
        )
        .unwrap();

        assert_eq!(name.to_string(), "Rex");
    }

    #[test]
    fn rejects_blank_or_non_string_input() {
        let err = ViaName::from_input::<api::animal::Name, DefaultScalarValue>(
            &InputValue::scalar("   "),
        )
        .unwrap_err();
        assert!(err.starts_with("Invalid `AnimalName`"), "{err}");

        let err = ViaName::from_input::<api::animal::Name, DefaultScalarValue>(
            &InputValue::scalar(3),
        )
        .unwrap_err();
        assert!(err.starts_with("Expected `AnimalName`"), "{err}");
    }
}
