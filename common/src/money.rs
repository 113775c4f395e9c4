//! [`Money`]-related definitions.

use std::{fmt, iter, ops, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

/// Non-negative amount of money in the shop currency, not exceeding
/// [`Money::MAX`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Money(Decimal);

impl Money {
    /// Zero [`Money`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest single [`Money`] amount: one trillion.
    ///
    /// Keeps sums of any realistic number of amounts far from the [`Decimal`]
    /// overflow.
    pub const MAX: Self =
        Self(Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0));

    /// Creates a new [`Money`] if the given `amount` is non-negative and not
    /// greater than [`Money::MAX`].
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (Decimal::ZERO..=Self::MAX.0)
            .contains(&amount)
            .then_some(Self(amount))
    }

    /// Returns the amount of this [`Money`].
    #[must_use]
    pub fn amount(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.is_integer().then(|| self.0.to_i128()).flatten() {
            Some(int) => write!(f, "{int}"),
            None => write!(f, "{}", self.0.normalize()),
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim()).map_err(|_| "invalid amount")?;
        Self::new(amount).ok_or("amount out of range")
    }
}

impl ops::Add for Money {
    type Output = Self;

    /// Saturates at the [`Decimal`] bounds instead of panicking.
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, ops::Add::add)
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use rust_decimal::Decimal;
    use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

    use super::Money;

    impl Serialize for Money {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            Serialize::serialize(&self.0, s)
        }
    }

    impl<'de> Deserialize<'de> for Money {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let amount = <Decimal as Deserialize<'de>>::deserialize(d)?;
            Self::new(amount).ok_or_else(|| {
                D::Error::custom(format!(
                    "`Money` amount out of range: {amount}",
                ))
            })
        }
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Non-negative money amount in `{major}.{minor}` format, where `minor`
    /// is optional.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Money;

    fn money(s: &str) -> Money {
        Money::new(s.parse::<Decimal>().unwrap()).unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(Money::from_str("123.45").unwrap(), money("123.45"));
        assert_eq!(Money::from_str(" 450 ").unwrap(), money("450"));
        assert_eq!(Money::from_str("0").unwrap(), Money::ZERO);

        assert!(Money::from_str("-1").is_err());
        assert!(Money::from_str("1000000000000.01").is_err());
        assert!(Money::from_str("79228162514264337593543950335").is_err());
        assert_eq!(Money::from_str("1000000000000").unwrap(), Money::MAX);
        assert!(Money::from_str("12,5").is_err());
        assert!(Money::from_str("R$ 10").is_err());
        assert!(Money::from_str("").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(money("123.45").to_string(), "123.45");
        assert_eq!(money("123.40").to_string(), "123.4");
        assert_eq!(money("123.00").to_string(), "123");
        assert_eq!(money("123").to_string(), "123");
    }

    #[test]
    fn sums_exactly() {
        let total: Money =
            ["0.1", "0.2", "450"].into_iter().map(money).sum();

        assert_eq!(total, money("450.3"));
        assert_eq!(std::iter::empty::<Money>().sum::<Money>(), Money::ZERO);
    }

    #[test]
    fn sums_largest_amounts_without_panicking() {
        let total: Money = std::iter::repeat(Money::MAX).take(3).sum();

        assert_eq!(total.to_string(), "3000000000000");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_numbers_and_strings() {
        let from_str: Money = serde_json::from_str("\"450.00\"").unwrap();
        let from_num: Money = serde_json::from_str("450").unwrap();

        assert_eq!(from_str, money("450"));
        assert_eq!(from_num, money("450"));
        assert!(serde_json::from_str::<Money>("-3").is_err());
        assert!(serde_json::from_str::<Money>("\"1000000000001\"").is_err());
        assert_eq!(serde_json::to_string(&money("450.5")).unwrap(), "\"450.5\"");
    }
}
