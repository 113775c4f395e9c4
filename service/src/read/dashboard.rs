//! [`Dashboard`] read model definition.

use common::{DateTime, Money};
use time::UtcOffset;

use crate::domain::{Animal, Client, Transaction};

/// Overview of the shop, aggregated from its [`Animal`]s, [`Client`]s and
/// [`Transaction`]s.
#[derive(Clone, Debug)]
pub struct Dashboard {
    /// Total number of [`Animal`]s.
    pub total_animals: usize,

    /// Number of [`Animal`]s available for a [`Transaction`].
    pub available_animals: usize,

    /// Total number of [`Client`]s.
    pub total_clients: usize,

    /// Number of [`Transaction`]s made in the current month.
    pub monthly_transactions: usize,

    /// Sum of the amounts of sales made in the current month.
    pub monthly_revenue: Money,

    /// Latest [`Transaction`]s, newest first.
    ///
    /// At most [`Dashboard::RECENT_LIMIT`] of them.
    pub recent_transactions: Vec<Transaction>,
}

impl Dashboard {
    /// Maximum number of [`Dashboard::recent_transactions`].
    pub const RECENT_LIMIT: usize = 5;

    /// Aggregates a [`Dashboard`] out of the provided collections.
    ///
    /// The current month is the one of `now`, as observed at the provided
    /// `offset`. [`Transaction`]s sharing a date keep their relative order.
    #[must_use]
    pub fn aggregate(
        animals: &[Animal],
        clients: &[Client],
        transactions: &[Transaction],
        now: DateTime,
        offset: UtcOffset,
    ) -> Self {
        let month = now.year_month_at(offset);
        let monthly = transactions
            .iter()
            .filter(|t| t.date.year_month_at(offset) == month)
            .collect::<Vec<_>>();

        let mut recent = transactions.iter().collect::<Vec<_>>();
        recent.sort_by(|a, b| b.date.cmp(&a.date));

        Self {
            total_animals: animals.len(),
            available_animals: animals
                .iter()
                .filter(|a| a.is_available())
                .count(),
            total_clients: clients.len(),
            monthly_transactions: monthly.len(),
            monthly_revenue: monthly
                .iter()
                .filter(|t| t.is_sale())
                .map(|t| t.amount)
                .sum(),
            recent_transactions: recent
                .into_iter()
                .take(Self::RECENT_LIMIT)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{DateTime, Money};
    use time::macros::offset;

    use crate::domain::{
        animal::{self, spec::animal},
        client::spec::client,
        transaction::{spec::transaction, Kind},
    };

    use super::Dashboard;

    fn now() -> DateTime {
        DateTime::from_rfc3339("2024-05-20T12:00:00Z").unwrap()
    }

    #[test]
    fn counts_animals_and_clients() {
        let mut sold = animal(2, "Bella", "CAT-001");
        sold.status = animal::Status::Sold;
        let animals = [animal(1, "Rex", "DOG-001"), sold];
        let clients = [client(1, "Ana Souza")];

        let dashboard =
            Dashboard::aggregate(&animals, &clients, &[], now(), offset!(UTC));

        assert_eq!(dashboard.total_animals, 2);
        assert_eq!(dashboard.available_animals, 1);
        assert_eq!(dashboard.total_clients, 1);
        assert_eq!(dashboard.monthly_transactions, 0);
        assert_eq!(dashboard.monthly_revenue, Money::ZERO);
        assert!(dashboard.recent_transactions.is_empty());
    }

    #[test]
    fn monthly_revenue_counts_sales_only() {
        let transactions = [
            transaction(1, Kind::Sale, "450", "2024-05-02T10:00:00Z"),
            transaction(2, Kind::Donation, "0", "2024-05-03T10:00:00Z"),
            transaction(3, Kind::Sale, "100.50", "2024-05-31T23:00:00Z"),
            transaction(4, Kind::Sale, "999", "2024-04-30T10:00:00Z"),
            transaction(5, Kind::Sale, "999", "2023-05-10T10:00:00Z"),
        ];

        let dashboard =
            Dashboard::aggregate(&[], &[], &transactions, now(), offset!(UTC));

        assert_eq!(dashboard.monthly_transactions, 3);
        assert_eq!(dashboard.monthly_revenue, "550.50".parse().unwrap());
    }

    #[test]
    fn largest_sales_add_up() {
        let transactions = [
            transaction(1, Kind::Sale, "1000000000000", "2024-05-02T10:00:00Z"),
            transaction(2, Kind::Sale, "1000000000000", "2024-05-03T10:00:00Z"),
        ];

        let dashboard =
            Dashboard::aggregate(&[], &[], &transactions, now(), offset!(UTC));

        assert_eq!(dashboard.monthly_revenue.to_string(), "2000000000000");
    }

    #[test]
    fn donations_only_month_has_no_revenue() {
        let transactions = [
            transaction(1, Kind::Donation, "0", "2024-05-02T10:00:00Z"),
            transaction(2, Kind::Donation, "0", "2024-05-09T10:00:00Z"),
        ];

        let dashboard =
            Dashboard::aggregate(&[], &[], &transactions, now(), offset!(UTC));

        assert_eq!(dashboard.monthly_transactions, 2);
        assert_eq!(dashboard.monthly_revenue, Money::ZERO);
    }

    #[test]
    fn month_is_resolved_at_offset() {
        let transactions = [
            transaction(1, Kind::Sale, "10", "2024-05-01T01:00:00Z"),
            transaction(2, Kind::Sale, "20", "2024-06-01T01:00:00Z"),
        ];

        let dashboard = Dashboard::aggregate(
            &[],
            &[],
            &transactions,
            DateTime::from_rfc3339("2024-06-01T02:00:00Z").unwrap(),
            offset!(-3),
        );

        assert_eq!(dashboard.monthly_transactions, 1);
        assert_eq!(dashboard.monthly_revenue, "20".parse().unwrap());
    }

    #[test]
    fn recent_transactions_are_newest_first_and_stable() {
        let transactions = [
            transaction(1, Kind::Sale, "1", "2024-05-01T10:00:00Z"),
            transaction(2, Kind::Sale, "1", "2024-05-05T10:00:00Z"),
            transaction(3, Kind::Sale, "1", "2024-05-03T10:00:00Z"),
            transaction(4, Kind::Sale, "1", "2024-05-05T10:00:00Z"),
            transaction(5, Kind::Sale, "1", "2024-05-02T10:00:00Z"),
            transaction(6, Kind::Sale, "1", "2024-05-04T10:00:00Z"),
            transaction(7, Kind::Sale, "1", "2024-04-04T10:00:00Z"),
        ];

        let dashboard =
            Dashboard::aggregate(&[], &[], &transactions, now(), offset!(UTC));

        let ids = dashboard
            .recent_transactions
            .iter()
            .map(|t| i32::from(t.id))
            .collect::<Vec<_>>();
        assert_eq!(ids, [2, 4, 6, 3, 5]);
    }
}
