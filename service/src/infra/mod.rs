//! Infrastructure layer.

pub mod database;

pub use self::database::{memory, Database, Memory};
#[cfg(feature = "rest")]
pub use self::database::{rest, Rest};
