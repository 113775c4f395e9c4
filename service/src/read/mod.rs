//! Read entities definitions.

pub mod dashboard;
pub mod transaction;

pub use self::dashboard::Dashboard;
