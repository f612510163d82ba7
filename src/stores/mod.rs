//! Defines the store traits that the route handlers use to access the
//! application's data, and their SQLite implementations.

pub mod sqlite;
mod transaction;
mod user;

pub use transaction::{SortOrder, TransactionChanges, TransactionQuery, TransactionStore};
pub use user::UserStore;
