//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/expenses/{transaction_id}',
//! use [format_endpoint].

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/api/coffee";
/// The route for registering a new user.
pub const REGISTER: &str = "/api/auth/register";
/// The route for logging in a user.
pub const LOG_IN: &str = "/api/auth/login";
/// The route to list and create expense transactions.
pub const EXPENSES: &str = "/api/expenses";
/// The route to update or delete a single expense transaction.
pub const EXPENSE: &str = "/api/expenses/{transaction_id}";
/// The route to list and create income transactions.
pub const INCOME: &str = "/api/income";
/// The route to update or delete a single income transaction.
pub const INCOME_ENTRY: &str = "/api/income/{transaction_id}";
/// The route for the suggested transaction categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route for the user's aggregated financial statistics.
pub const STATS: &str = "/api/stats";

/// Replace the path parameter in `endpoint` with `id`.
pub fn format_endpoint(endpoint: &str, id: i64) -> String {
    match endpoint.find('{') {
        Some(start) => format!("{}{id}", &endpoint[..start]),
        None => endpoint.to_string(),
    }
}
