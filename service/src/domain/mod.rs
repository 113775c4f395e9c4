//! Domain definitions.

pub mod animal;
pub mod breed;
pub mod client;
pub mod species;
pub mod transaction;

pub use self::{
    animal::Animal, breed::Breed, client::Client, species::Species,
    transaction::Transaction,
};

/// Defines a free-form text newtype, which must be non-empty and not longer
/// than the provided number of characters.
///
/// Surrounding whitespace is trimmed on creation. Deserialization trusts the
/// stored value and performs no checks.
macro_rules! define_text {
    (
        #[doc = $doc:literal]
        $name:ident(max = $max:literal)
    ) => {
        #[doc = $doc]
        #[derive(
            ::derive_more::AsRef,
            Clone,
            Debug,
            ::serde::Deserialize,
            ::derive_more::Display,
            Eq,
            Hash,
            PartialEq,
            ::serde::Serialize,
        )]
        #[as_ref(str)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Maximum length (in characters) of this text.
            pub const MAX_LEN: usize = $max;

            #[doc = concat!(
                "Creates a new [`", stringify!($name), "`] if the given ",
                "`text` is valid.",
            )]
            #[must_use]
            pub fn new(text: impl AsRef<str>) -> Option<Self> {
                let text = text.as_ref().trim();
                (!text.is_empty() && text.chars().count() <= Self::MAX_LEN)
                    .then(|| Self(text.to_owned()))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(concat!("invalid `", stringify!($name), "`"))
            }
        }
    };
}

/// Defines an integer ID newtype assigned by the store.
macro_rules! define_id {
    (
        #[doc = $doc:literal]
        $name:ident
    ) => {
        #[doc = $doc]
        #[derive(
            Clone,
            Copy,
            Debug,
            ::serde::Deserialize,
            ::derive_more::Display,
            Eq,
            ::derive_more::From,
            ::derive_more::FromStr,
            Hash,
            ::derive_more::Into,
            Ord,
            PartialEq,
            PartialOrd,
            ::serde::Serialize,
        )]
        #[serde(transparent)]
        pub struct $name(i32);
    };
}

pub(crate) use define_id;
pub(crate) use define_text;

#[cfg(test)]
mod spec {
    use super::species::Name;

    #[test]
    fn text_is_trimmed_and_non_empty() {
        assert_eq!(Name::new("  Dog ").unwrap().as_ref(), "Dog");

        assert!(Name::new("").is_none());
        assert!(Name::new("   ").is_none());
        assert!(Name::new("x".repeat(Name::MAX_LEN + 1)).is_none());
        assert!("Cat".parse::<Name>().is_ok());
    }
}
