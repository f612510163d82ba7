//! Aggregated financial statistics for a user.
//!
//! This module computes the summary returned by the statistics endpoint:
//! current-month totals and category breakdowns, the most recent
//! transactions, and a six-month trend. The summary is recomputed from the
//! stores on every request and is never persisted.

mod aggregation;
mod endpoint;

pub use endpoint::{
    CurrentMonthSummary, FinancialSummary, SummaryStats, TrendEntry, financial_summary, get_stats,
};
