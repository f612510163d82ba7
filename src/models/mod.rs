//! The application's domain models.

mod password;
mod transaction;
mod user;

pub use password::PasswordHash;
pub use transaction::{
    EXPENSE_CATEGORIES, INCOME_CATEGORIES, Transaction, TransactionBuilder, TransactionKind,
};
pub use user::{User, UserID};

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;
