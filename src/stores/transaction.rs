//! Defines the transaction store trait.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};

use crate::{
    Error,
    models::{DatabaseID, Transaction, TransactionBuilder, TransactionKind, UserID},
};

/// Handles the creation and retrieval of transactions.
///
/// Every operation is scoped to a single user: an owner must never observe or
/// mutate another owner's records.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    ///
    /// The store assigns the ID and the creation timestamp.
    fn create(
        &mut self,
        kind: TransactionKind,
        builder: TransactionBuilder,
    ) -> Result<Transaction, Error>;

    /// Retrieve the transaction with `id` belonging to `user_id`.
    ///
    /// Returns [Error::NotFound] if no such transaction exists or it belongs
    /// to another user.
    fn get(
        &self,
        kind: TransactionKind,
        id: DatabaseID,
        user_id: UserID,
    ) -> Result<Transaction, Error>;

    /// Retrieve transactions from the store in the way defined by `query`.
    fn get_query(&self, query: TransactionQuery) -> Result<Vec<Transaction>, Error>;

    /// Overwrite the mutable fields of the transaction with `id` belonging to
    /// `user_id` and set its modification timestamp.
    ///
    /// Returns [Error::NotFound] if no such transaction exists or it belongs
    /// to another user.
    fn update(
        &mut self,
        kind: TransactionKind,
        id: DatabaseID,
        user_id: UserID,
        changes: TransactionChanges,
    ) -> Result<Transaction, Error>;

    /// Delete the transaction with `id` belonging to `user_id`.
    ///
    /// Returns [Error::NotFound] if no such transaction exists or it belongs
    /// to another user.
    fn delete(
        &mut self,
        kind: TransactionKind,
        id: DatabaseID,
        user_id: UserID,
    ) -> Result<(), Error>;
}

/// Defines how transactions should be fetched from [TransactionStore::get_query].
pub struct TransactionQuery {
    /// Which of the two transaction collections to query.
    pub kind: TransactionKind,
    /// Only include transactions owned by this user.
    pub user_id: UserID,
    /// Include transactions within `date_range` (inclusive on both ends).
    pub date_range: Option<RangeInclusive<DateTime<Utc>>>,
    /// Orders transactions by date in the order `sort_date`. None returns
    /// transactions in the order they are stored.
    pub sort_date: Option<SortOrder>,
    /// Selects up to the first N (`limit`) transactions.
    pub limit: Option<u64>,
}

impl TransactionQuery {
    /// A query for all of `user_id`'s transactions of `kind` in storage order.
    pub fn new(kind: TransactionKind, user_id: UserID) -> Self {
        Self {
            kind,
            user_id,
            date_range: None,
            sort_date: None,
            limit: None,
        }
    }
}

/// The order to sort transactions in a [TransactionQuery].
pub enum SortOrder {
    /// Sort in order of increasing value.
    Ascending,
    /// Sort in order of decreasing value.
    Descending,
}

/// The new values for the mutable fields of a transaction in
/// [TransactionStore::update].
///
/// The ID, owner and creation timestamp of a transaction are immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionChanges {
    /// The new amount.
    pub amount: f64,
    /// The new description.
    pub description: String,
    /// The new category.
    pub category: String,
    /// The new date, or `None` to use the current time.
    pub date: Option<DateTime<Utc>>,
}
