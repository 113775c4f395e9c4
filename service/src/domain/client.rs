//! [`Client`] definitions.

use std::{str::FromStr, sync::LazyLock};

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{define_id, define_text};

/// Person buying or adopting animals.
///
/// Formats of [`Cpf`], [`Phone`] and [`Email`] are checked when the values
/// are created from input, while values read back from the store are trusted
/// as they are.
#[derive(Clone, Debug)]
pub struct Client {
    /// ID of this [`Client`].
    pub id: Id,

    /// [`FullName`] of this [`Client`].
    pub full_name: FullName,

    /// National identity number of this [`Client`].
    ///
    /// Not guaranteed to be unique.
    pub cpf: Cpf,

    /// Secondary identity document of this [`Client`], if any.
    pub rg: Option<Rg>,

    /// [`Phone`] number of this [`Client`].
    pub phone: Phone,

    /// [`Email`] of this [`Client`], if any.
    pub email: Option<Email>,

    /// [`Address`] of this [`Client`], if any.
    pub address: Option<Address>,

    /// [`DateTime`] when this [`Client`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Client`] was last modified.
    pub updated_at: ModificationDateTime,
}

define_id! {
    #[doc = "ID of a [`Client`]."]
    Id
}

define_text! {
    #[doc = "Full name of a [`Client`]."]
    FullName(max = 255)
}

define_text! {
    #[doc = "Secondary identity document (RG) of a [`Client`]."]
    Rg(max = 20)
}

define_text! {
    #[doc = "Postal address of a [`Client`]."]
    Address(max = 512)
}

/// National identity number (CPF) of a [`Client`]: exactly 11 digits.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str)]
#[serde(transparent)]
pub struct Cpf(String);

impl Cpf {
    /// Number of digits in a [`Cpf`].
    pub const LEN: usize = 11;

    /// Creates a new [`Cpf`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Cpf`].
    fn check(number: impl AsRef<str>) -> bool {
        let number = number.as_ref();
        number.len() == Self::LEN && number.bytes().all(|b| b.is_ascii_digit())
    }
}

impl FromStr for Cpf {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Cpf`")
    }
}

/// Phone number of a [`Client`]: 10 or 11 digits, area code included.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        let number = number.as_ref();
        (10..=11).contains(&number.len())
            && number.bytes().all(|b| b.is_ascii_digit())
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// Email address of a [`Client`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Parses an optional [`Email`], where an empty (or blank) `address`
    /// means no [`Email`] at all.
    ///
    /// # Errors
    ///
    /// If the non-empty `address` is not a valid [`Email`].
    pub fn new_optional(
        address: impl AsRef<str>,
    ) -> Result<Option<Self>, &'static str> {
        match address.as_ref().trim() {
            "" => Ok(None),
            address => address.parse().map(Some),
        }
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format: a local part and a
        /// dotted domain without whitespace, separated by a single `@`.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
                .expect("valid regex")
        });

        REGEX.is_match(address.as_ref())
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Data of a new [`Client`] to be created.
#[derive(Clone, Debug)]
pub struct New {
    /// [`FullName`] of the new [`Client`].
    pub full_name: FullName,

    /// [`Cpf`] of the new [`Client`].
    pub cpf: Cpf,

    /// [`Rg`] of the new [`Client`], if any.
    pub rg: Option<Rg>,

    /// [`Phone`] of the new [`Client`].
    pub phone: Phone,

    /// [`Email`] of the new [`Client`], if any.
    pub email: Option<Email>,

    /// [`Address`] of the new [`Client`], if any.
    pub address: Option<Address>,
}

/// Partial changes to be applied to an existing [`Client`].
///
/// [`None`] leaves a field untouched, while `Some(None)` clears an optional
/// one.
#[derive(Clone, Debug)]
pub struct Patch {
    /// ID of the [`Client`] to change.
    pub id: Id,

    /// New [`FullName`].
    pub full_name: Option<FullName>,

    /// New [`Cpf`].
    pub cpf: Option<Cpf>,

    /// New [`Rg`].
    pub rg: Option<Option<Rg>>,

    /// New [`Phone`].
    pub phone: Option<Phone>,

    /// New [`Email`].
    pub email: Option<Option<Email>>,

    /// New [`Address`].
    pub address: Option<Option<Address>>,
}

impl Patch {
    /// Creates a new empty [`Patch`] of the [`Client`] with the provided ID.
    #[must_use]
    pub fn new(id: Id) -> Self {
        Self {
            id,
            full_name: None,
            cpf: None,
            rg: None,
            phone: None,
            email: None,
            address: None,
        }
    }

    /// Applies this [`Patch`] to the provided [`Client`].
    pub fn apply_to(self, client: &mut Client) {
        let Self {
            id: _,
            full_name,
            cpf,
            rg,
            phone,
            email,
            address,
        } = self;

        if let Some(full_name) = full_name {
            client.full_name = full_name;
        }
        if let Some(cpf) = cpf {
            client.cpf = cpf;
        }
        if let Some(rg) = rg {
            client.rg = rg;
        }
        if let Some(phone) = phone {
            client.phone = phone;
        }
        if let Some(email) = email {
            client.email = email;
        }
        if let Some(address) = address {
            client.address = address;
        }
    }
}

/// Search term matching [`Client`]s.
///
/// Name and email are matched case-insensitively, while identity and phone
/// numbers are matched verbatim.
#[derive(
    Clone, Debug, Default, Display, Eq, ::derive_more::FromStr, PartialEq,
)]
pub struct Search(String);

impl Search {
    /// Creates a new [`Search`] for the provided `term`.
    #[must_use]
    pub fn new(term: impl Into<String>) -> Self {
        Self(term.into())
    }

    /// Returns the raw term of this [`Search`].
    #[must_use]
    pub fn term(&self) -> &str {
        &self.0
    }

    /// Indicates whether the provided [`Client`] matches this [`Search`].
    #[must_use]
    pub fn matches(&self, client: &Client) -> bool {
        let term = self.0.as_str();
        let folded = term.to_lowercase();

        client.full_name.as_ref().to_lowercase().contains(&folded)
            || client.cpf.as_ref().contains(term)
            || client.phone.as_ref().contains(term)
            || client.email.as_ref().is_some_and(|e| {
                e.as_ref().to_lowercase().contains(&folded)
            })
    }
}

/// [`DateTime`] when a [`Client`] was created.
pub type CreationDateTime = DateTimeOf<(Client, unit::Creation)>;

/// [`DateTime`] when a [`Client`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Client, unit::Modification)>;

#[cfg(test)]
pub(crate) mod spec {
    use common::DateTime;

    use super::{Client, Cpf, Email, FullName, Id, Phone, Search};

    pub(crate) fn client(id: i32, name: &str) -> Client {
        Client {
            id: Id::from(id),
            full_name: FullName::new(name).unwrap(),
            cpf: Cpf::new("12345678901").unwrap(),
            rg: None,
            phone: Phone::new("11987654321").unwrap(),
            email: Some(Email::new("Maria.Silva@Example.com").unwrap()),
            address: None,
            created_at: DateTime::UNIX_EPOCH.coerce(),
            updated_at: DateTime::UNIX_EPOCH.coerce(),
        }
    }

    #[test]
    fn cpf_is_exactly_eleven_digits() {
        assert!(Cpf::new("12345678901").is_some());

        assert!(Cpf::new("1234567890").is_none());
        assert!(Cpf::new("123456789012").is_none());
        assert!(Cpf::new("123.456.789-0").is_none());
        assert!(Cpf::new("1234567890a").is_none());
        assert!(Cpf::new("").is_none());
    }

    #[test]
    fn phone_is_ten_or_eleven_digits() {
        assert!(Phone::new("1133334444").is_some());
        assert!(Phone::new("11987654321").is_some());

        assert!(Phone::new("113333444").is_none());
        assert!(Phone::new("119876543210").is_none());
        assert!(Phone::new("(11) 3333-4444").is_none());
    }

    #[test]
    fn email_is_valid_or_empty() {
        assert!(Email::new("ana@petshop.com.br").is_some());

        assert!(Email::new("ana@petshop").is_none());
        assert!(Email::new("ana petshop.com").is_none());
        assert!(Email::new("@petshop.com").is_none());
        assert!(Email::new("ana@@petshop.com").is_none());

        assert_eq!(Email::new_optional(""), Ok(None));
        assert_eq!(Email::new_optional("  "), Ok(None));
        assert!(Email::new_optional("ana@petshop.com").unwrap().is_some());
        assert!(Email::new_optional("not-an-email").is_err());
    }

    #[test]
    fn search_matches_like_the_clients_list() {
        let maria = client(1, "Maria Silva");

        assert!(Search::new("").matches(&maria));
        assert!(Search::new("mARia").matches(&maria));
        assert!(Search::new("456789").matches(&maria));
        assert!(Search::new("98765").matches(&maria));
        assert!(Search::new("example.COM").matches(&maria));

        assert!(!Search::new("João").matches(&maria));
        assert!(!Search::new("(11)").matches(&maria));
    }
}
