//! The route handlers for creating, listing, updating, and deleting expense
//! and income transactions.
//!
//! Expenses and income share one set of handlers parameterized by
//! [TransactionKind].

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    AppState, Error,
    models::{DatabaseID, Transaction, TransactionKind, UserID},
    stores::{SortOrder, TransactionChanges, TransactionQuery, TransactionStore},
};

/// The data a client sends to create or update a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionData {
    /// How much money was spent or earned.
    pub amount: f64,
    /// What the transaction was for.
    pub description: String,
    /// The category of the transaction.
    pub category: String,
    /// When the transaction happened. Defaults to the current time.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl TransactionData {
    /// Check that the transaction data is valid.
    ///
    /// # Errors
    /// Returns an error if the amount is negative or not a number, or the
    /// description or category is empty.
    fn validate(&self) -> Result<(), Error> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidAmount);
        }

        if self.description.trim().is_empty() {
            return Err(Error::EmptyDescription);
        }

        if self.category.trim().is_empty() {
            return Err(Error::EmptyCategory);
        }

        Ok(())
    }
}

fn create_transaction(
    kind: TransactionKind,
    mut state: AppState,
    user_id: UserID,
    data: TransactionData,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    data.validate()?;

    let mut builder = Transaction::build(data.amount, user_id)
        .description(&data.description)
        .category(&data.category);

    if let Some(date) = data.date {
        builder = builder.date(date);
    }

    let transaction = state.transaction_store.create(kind, builder)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

fn list_transactions(
    kind: TransactionKind,
    state: AppState,
    user_id: UserID,
) -> Result<Json<Vec<Transaction>>, Error> {
    let transactions = state.transaction_store.get_query(TransactionQuery {
        sort_date: Some(SortOrder::Descending),
        ..TransactionQuery::new(kind, user_id)
    })?;

    Ok(Json(transactions))
}

fn update_transaction(
    kind: TransactionKind,
    mut state: AppState,
    user_id: UserID,
    id: DatabaseID,
    data: TransactionData,
) -> Result<Json<Transaction>, Error> {
    data.validate()?;

    let transaction = state.transaction_store.update(
        kind,
        id,
        user_id,
        TransactionChanges {
            amount: data.amount,
            description: data.description,
            category: data.category,
            date: data.date,
        },
    )?;

    Ok(Json(transaction))
}

fn delete_transaction(
    kind: TransactionKind,
    mut state: AppState,
    user_id: UserID,
    id: DatabaseID,
) -> Result<StatusCode, Error> {
    state.transaction_store.delete(kind, id, user_id)?;

    Ok(StatusCode::NO_CONTENT)
}

/// A route handler for creating a new expense.
pub async fn create_expense(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserID>,
    Json(data): Json<TransactionData>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    create_transaction(TransactionKind::Expense, state, user_id, data)
}

/// A route handler for listing the user's expenses, most recent first.
pub async fn list_expenses(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Vec<Transaction>>, Error> {
    list_transactions(TransactionKind::Expense, state, user_id)
}

/// A route handler for updating an expense.
pub async fn update_expense(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<DatabaseID>,
    Json(data): Json<TransactionData>,
) -> Result<Json<Transaction>, Error> {
    update_transaction(TransactionKind::Expense, state, user_id, transaction_id, data)
}

/// A route handler for deleting an expense.
pub async fn delete_expense(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<DatabaseID>,
) -> Result<StatusCode, Error> {
    delete_transaction(TransactionKind::Expense, state, user_id, transaction_id)
}

/// A route handler for creating a new income entry.
pub async fn create_income(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserID>,
    Json(data): Json<TransactionData>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    create_transaction(TransactionKind::Income, state, user_id, data)
}

/// A route handler for listing the user's income entries, most recent first.
pub async fn list_income(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Vec<Transaction>>, Error> {
    list_transactions(TransactionKind::Income, state, user_id)
}

/// A route handler for updating an income entry.
pub async fn update_income(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<DatabaseID>,
    Json(data): Json<TransactionData>,
) -> Result<Json<Transaction>, Error> {
    update_transaction(TransactionKind::Income, state, user_id, transaction_id, data)
}

/// A route handler for deleting an income entry.
pub async fn delete_income(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<DatabaseID>,
) -> Result<StatusCode, Error> {
    delete_transaction(TransactionKind::Income, state, user_id, transaction_id)
}
