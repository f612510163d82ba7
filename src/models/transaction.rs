//! This file defines the type `Transaction`, the core type of the finance
//! tracking part of the application, and its supporting types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{DatabaseID, UserID};

/// The suggested categories for expense transactions.
///
/// These are suggestions only, clients may store any non-empty category string.
pub const EXPENSE_CATEGORIES: [&str; 8] = [
    "Food",
    "Transportation",
    "Bills",
    "Shopping",
    "Entertainment",
    "Healthcare",
    "Education",
    "Other",
];

/// The suggested categories for income transactions.
///
/// These are suggestions only, clients may store any non-empty category string.
pub const INCOME_CATEGORIES: [&str; 5] =
    ["Salary", "Freelance", "Investment", "Business", "Other"];

/// Whether a transaction records money spent or money earned.
///
/// Each kind is stored in its own table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money spent.
    Expense,
    /// Money earned.
    Income,
}

impl TransactionKind {
    /// The name of the database table that holds transactions of this kind.
    pub(crate) fn table(&self) -> &'static str {
        match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Income => "income",
        }
    }

    /// The suggested categories for transactions of this kind.
    pub fn suggested_categories(&self) -> &'static [&'static str] {
        match self {
            TransactionKind::Expense => &EXPENSE_CATEGORIES,
            TransactionKind::Income => &INCOME_CATEGORIES,
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build] and finalize the
/// builder with [TransactionStore::create](crate::stores::TransactionStore::create).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    id: DatabaseID,
    user_id: UserID,
    amount: f64,
    description: String,
    category: String,
    date: DateTime<Utc>,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
    kind: TransactionKind,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder::new] for discoverability.
    pub fn build(amount: f64, user_id: UserID) -> TransactionBuilder {
        TransactionBuilder::new(amount, user_id)
    }

    /// Create a transaction from parts that are known to be valid, e.g. a
    /// database row.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new_unchecked(
        id: DatabaseID,
        user_id: UserID,
        amount: f64,
        description: String,
        category: String,
        date: DateTime<Utc>,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id,
            user_id,
            amount,
            description,
            category,
            date,
            created_at,
            updated_at,
            kind,
        }
    }

    /// The ID of the transaction.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The ID of the user that created this transaction.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }

    /// The amount of money spent or earned in this transaction.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// A text description of what the transaction was for.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// A free-text category that describes the type of the transaction.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// When the transaction happened.
    pub fn date(&self) -> &DateTime<Utc> {
        &self.date
    }

    /// When the transaction was recorded.
    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    /// When the transaction was last modified, if ever.
    pub fn updated_at(&self) -> Option<&DateTime<Utc>> {
        self.updated_at.as_ref()
    }

    /// Whether this transaction is an expense or income.
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }
}

/// Builder for creating a new [Transaction].
///
/// The builder is finalized with
/// [TransactionStore::create](crate::stores::TransactionStore::create), which
/// assigns the ID and creation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    pub(crate) amount: f64,
    pub(crate) description: String,
    pub(crate) category: String,
    pub(crate) date: DateTime<Utc>,
    pub(crate) user_id: UserID,
}

impl TransactionBuilder {
    /// Create a new transaction builder.
    ///
    /// The date defaults to the current time.
    pub fn new(amount: f64, user_id: UserID) -> Self {
        Self {
            amount,
            description: String::new(),
            category: String::new(),
            date: Utc::now(),
            user_id,
        }
    }

    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Set the category for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    /// Set the date for the transaction.
    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }
}
