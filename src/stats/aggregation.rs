//! Transaction data aggregation and transformation for the statistics
//! summary.
//!
//! Provides functions to sum transaction amounts, group amounts by category,
//! merge recent-transaction listings, and compute calendar month boundaries
//! and labels.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::models::Transaction;

/// How many transactions the recent-transactions listing may hold.
pub(super) const RECENT_TRANSACTION_LIMIT: usize = 10;

/// Sums the amounts of `transactions`.
pub(super) fn sum_amounts(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .map(|transaction| transaction.amount())
        .sum()
}

/// Aggregates transaction amounts by category.
///
/// The mapping is keyed by whatever category string was stored, there is no
/// case-folding or trimming.
///
/// # Returns
/// HashMap mapping each category to the sum of its transaction amounts.
pub(super) fn totals_by_category(transactions: &[Transaction]) -> HashMap<String, f64> {
    let mut totals = HashMap::new();

    for transaction in transactions {
        *totals.entry(transaction.category().to_string()).or_insert(0.0) += transaction.amount();
    }

    totals
}

/// Merges the recent expenses and income into a single listing sorted by
/// date, most recent first, capped at [RECENT_TRANSACTION_LIMIT] entries.
///
/// Transactions with equal dates keep the order of the concatenated inputs
/// (expenses before income).
pub(super) fn merge_recent(
    recent_expenses: Vec<Transaction>,
    recent_income: Vec<Transaction>,
) -> Vec<Transaction> {
    let mut combined = recent_expenses;
    combined.extend(recent_income);

    combined.sort_by(|a, b| b.date().cmp(a.date()));
    combined.truncate(RECENT_TRANSACTION_LIMIT);

    combined
}

/// The first and last instant of the given calendar month.
///
/// The start is midnight on the first of the month. The end is 23:59:59 on
/// the last day of the month, found by stepping back one day from the first
/// of the following month.
pub(super) fn month_bounds(year: i32, month: u32) -> (DateTime<Utc>, DateTime<Utc>) {
    let first_day = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    let start = Utc.from_utc_datetime(&first_day.and_hms_opt(0, 0, 0).unwrap());

    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last_day = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .pred_opt()
        .unwrap();
    let end = Utc.from_utc_datetime(&last_day.and_hms_opt(23, 59, 59).unwrap());

    (start, end)
}

/// The calendar month `months` months before the given one.
pub(super) fn months_before(year: i32, month: u32, months: u32) -> (i32, u32) {
    let zero_based = year * 12 + month as i32 - 1 - months as i32;

    (zero_based.div_euclid(12), zero_based.rem_euclid(12) as u32 + 1)
}

/// A short human-readable label for a calendar month, e.g. "Aug 2025".
pub(super) fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap()
        .format("%b %Y")
        .to_string()
}
