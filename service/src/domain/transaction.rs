//! [`Transaction`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Date, DateTimeOf, Money};
use time::UtcOffset;

use super::{define_id, define_text};
use crate::domain::{animal, client};
#[cfg(doc)]
use crate::domain::{Animal, Client};

/// Immutable record of an [`Animal`] being sold or donated to a [`Client`].
///
/// Doesn't own neither the [`Animal`] nor the [`Client`], so both references
/// may dangle.
#[derive(Clone, Debug)]
pub struct Transaction {
    /// ID of this [`Transaction`].
    pub id: Id,

    /// ID of the [`Animal`] this [`Transaction`] is about.
    pub animal_id: animal::Id,

    /// ID of the [`Client`] this [`Transaction`] is made with.
    pub client_id: client::Id,

    /// [`Kind`] of this [`Transaction`].
    pub kind: Kind,

    /// [`DateTime`] when this [`Transaction`] took place.
    ///
    /// Assigned by the store.
    pub date: OccurrenceDateTime,

    /// Final amount paid by the [`Client`].
    ///
    /// Always zero for a [`Kind::Donation`].
    pub amount: Money,

    /// [`Notes`] of this [`Transaction`], if any.
    pub notes: Option<Notes>,

    /// [`DateTime`] when this [`Transaction`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Transaction`] was last modified.
    pub updated_at: ModificationDateTime,
}

impl Transaction {
    /// Indicates whether this [`Transaction`] is a [`Kind::Sale`].
    #[must_use]
    pub fn is_sale(&self) -> bool {
        self.kind == Kind::Sale
    }
}

define_id! {
    #[doc = "ID of a [`Transaction`]."]
    Id
}

define_text! {
    #[doc = "Free-text notes of a [`Transaction`]."]
    Notes(max = 4096)
}

define_kind! {
    #[doc = "Kind of a [`Transaction`]."]
    enum Kind {
        #[doc = "[`Animal`] is sold for money."]
        Sale = 1,

        #[doc = "[`Animal`] is given away for adoption."]
        Donation = 2,
    }
}

impl Kind {
    /// Returns the [`animal::Status`] an [`Animal`] takes after a
    /// [`Transaction`] of this [`Kind`].
    #[must_use]
    pub const fn resulting_status(self) -> animal::Status {
        match self {
            Self::Sale => animal::Status::Sold,
            Self::Donation => animal::Status::Adopted,
        }
    }
}

/// Data of a new [`Transaction`] to be recorded.
#[derive(Clone, Debug)]
pub struct New {
    /// ID of the [`Animal`] being sold or donated.
    pub animal_id: animal::Id,

    /// ID of the [`Client`] receiving the [`Animal`].
    pub client_id: client::Id,

    /// [`Kind`] of the new [`Transaction`].
    pub kind: Kind,

    /// Final amount of the new [`Transaction`].
    pub amount: Money,

    /// [`Notes`] of the new [`Transaction`], if any.
    pub notes: Option<Notes>,
}

/// Inclusive range of calendar [`Date`]s, resolved in UTC.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DateRange {
    /// First [`Date`] of this [`DateRange`].
    pub start: Date,

    /// Last [`Date`] of this [`DateRange`].
    pub end: Date,
}

impl DateRange {
    /// Indicates whether the provided [`DateTime`] falls into this
    /// [`DateRange`].
    #[must_use]
    pub fn contains(&self, at: OccurrenceDateTime) -> bool {
        (self.start..=self.end).contains(&at.date_at(UtcOffset::UTC))
    }
}

/// [`DateTime`] when a [`Transaction`] took place.
pub type OccurrenceDateTime = DateTimeOf<(Transaction, unit::Occurrence)>;

/// [`DateTime`] when a [`Transaction`] was created.
pub type CreationDateTime = DateTimeOf<(Transaction, unit::Creation)>;

/// [`DateTime`] when a [`Transaction`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Transaction, unit::Modification)>;

#[cfg(test)]
pub(crate) mod spec {
    use common::{DateTime, Money};
    use time::macros::date;

    use super::{DateRange, Id, Kind, Transaction};
    use crate::domain::animal;

    pub(crate) fn transaction(
        id: i32,
        kind: Kind,
        amount: &str,
        date: &str,
    ) -> Transaction {
        let date = DateTime::from_rfc3339(date).unwrap();
        Transaction {
            id: Id::from(id),
            animal_id: 1.into(),
            client_id: 1.into(),
            kind,
            date: date.coerce(),
            amount: amount.parse::<Money>().unwrap(),
            notes: None,
            created_at: date.coerce(),
            updated_at: date.coerce(),
        }
    }

    #[test]
    fn kind_decides_animal_status() {
        assert_eq!(Kind::Sale.resulting_status(), animal::Status::Sold);
        assert_eq!(Kind::Donation.resulting_status(), animal::Status::Adopted);
    }

    #[test]
    fn date_range_is_inclusive() {
        let range = DateRange {
            start: date!(2024 - 05 - 01),
            end: date!(2024 - 05 - 31),
        };

        for (at, expected) in [
            ("2024-05-01T00:00:00Z", true),
            ("2024-05-31T23:59:59Z", true),
            ("2024-04-30T23:59:59Z", false),
            ("2024-06-01T00:00:00Z", false),
            ("2024-05-31T22:00:00-03:00", false),
        ] {
            let t = transaction(1, Kind::Sale, "10", at);
            assert_eq!(range.contains(t.date), expected, "at: {at}");
        }
    }
}
