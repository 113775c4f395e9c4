//! [`Transaction`] read model definitions.

use common::Money;

use crate::domain::{transaction, Transaction};

/// Totals over all the recorded [`Transaction`]s.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Totals {
    /// Number of [`transaction::Kind::Sale`]s.
    pub sales: usize,

    /// Sum of the [`transaction::Kind::Sale`] amounts.
    pub sales_revenue: Money,

    /// Number of [`transaction::Kind::Donation`]s.
    pub donations: usize,
}

impl Totals {
    /// Sums up the provided [`Transaction`]s.
    #[must_use]
    pub fn aggregate(transactions: &[Transaction]) -> Self {
        transactions.iter().fold(Self::default(), |mut totals, t| {
            match t.kind {
                transaction::Kind::Sale => {
                    totals.sales += 1;
                    totals.sales_revenue = totals.sales_revenue + t.amount;
                }
                transaction::Kind::Donation => totals.donations += 1,
            }
            totals
        })
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::transaction::{spec::transaction, Kind};

    use super::Totals;

    #[test]
    fn sums_sales_and_counts_donations() {
        let totals = Totals::aggregate(&[
            transaction(1, Kind::Sale, "450", "2024-05-02T10:00:00Z"),
            transaction(2, Kind::Donation, "0", "2024-05-03T10:00:00Z"),
            transaction(3, Kind::Sale, "99.90", "2023-01-01T10:00:00Z"),
        ]);

        assert_eq!(totals.sales, 2);
        assert_eq!(totals.sales_revenue, "549.90".parse().unwrap());
        assert_eq!(totals.donations, 1);
        assert_eq!(Totals::aggregate(&[]), Totals::default());
    }
}
