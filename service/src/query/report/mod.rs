//! Reporting [`Query`]s aggregating several collections.

pub mod dashboard;
pub mod totals;

#[cfg(doc)]
use crate::Query;

pub use self::{dashboard::Dashboard, totals::TransactionTotals};
