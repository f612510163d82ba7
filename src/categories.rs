//! The route handler for the suggested transaction categories.

use axum::Json;
use serde::Serialize;

use crate::models::TransactionKind;

/// The suggested categories for each transaction kind.
///
/// These are suggestions for clients to display, the server accepts any
/// non-empty category string.
#[derive(Debug, Serialize)]
pub struct CategorySuggestions {
    /// Suggested categories for expenses.
    pub expense: &'static [&'static str],
    /// Suggested categories for income.
    pub income: &'static [&'static str],
}

/// A route handler for getting the suggested transaction categories.
pub async fn get_categories() -> Json<CategorySuggestions> {
    Json(CategorySuggestions {
        expense: TransactionKind::Expense.suggested_categories(),
        income: TransactionKind::Income.suggested_categories(),
    })
}
