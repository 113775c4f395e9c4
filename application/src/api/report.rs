//! Reports definitions.

use common::Money;
use derive_more::From;
use juniper::graphql_object;
use service::read;

use crate::{api, Context, Error};

/// Overview of the shop.
#[derive(Clone, Debug, From)]
pub struct Dashboard(read::Dashboard);

/// Overview of the shop as of the current month.
#[graphql_object(context = Context)]
impl Dashboard {
    /// Total number of `Animal`s.
    pub fn total_animals(&self, ctx: &Context) -> Result<i32, Error> {
        api::count(ctx, self.0.total_animals)
    }

    /// Number of `AVAILABLE` `Animal`s.
    pub fn available_animals(&self, ctx: &Context) -> Result<i32, Error> {
        api::count(ctx, self.0.available_animals)
    }

    /// Total number of `Client`s.
    pub fn total_clients(&self, ctx: &Context) -> Result<i32, Error> {
        api::count(ctx, self.0.total_clients)
    }

    /// Number of `Transaction`s made in the current month.
    pub fn monthly_transactions(&self, ctx: &Context) -> Result<i32, Error> {
        api::count(ctx, self.0.monthly_transactions)
    }

    /// Sum of the `SALE` amounts in the current month.
    #[must_use]
    pub fn monthly_revenue(&self) -> Money {
        self.0.monthly_revenue
    }

    /// Latest `Transaction`s, newest first.
    #[must_use]
    pub fn recent_transactions(&self) -> Vec<api::Transaction> {
        self.0
            .recent_transactions
            .iter()
            .cloned()
            .map(Into::into)
            .collect()
    }
}

/// Totals over all the recorded `Transaction`s.
#[derive(Clone, Copy, Debug, From)]
pub struct TransactionTotals(read::transaction::Totals);

/// Totals over all the recorded `Transaction`s.
#[graphql_object(context = Context)]
impl TransactionTotals {
    /// Number of `SALE`s.
    pub fn sales(&self, ctx: &Context) -> Result<i32, Error> {
        api::count(ctx, self.0.sales)
    }

    /// Sum of all the `SALE` amounts.
    #[must_use]
    pub fn sales_revenue(&self) -> Money {
        self.0.sales_revenue
    }

    /// Number of `DONATION`s.
    pub fn donations(&self, ctx: &Context) -> Result<i32, Error> {
        api::count(ctx, self.0.donations)
    }
}
