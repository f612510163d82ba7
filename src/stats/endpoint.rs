//! The route handler for the statistics endpoint and the types it returns.

use std::collections::HashMap;

use axum::{Extension, Json, extract::State};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    models::{Transaction, TransactionKind, UserID},
    stores::{SortOrder, TransactionQuery, TransactionStore},
};

use super::aggregation::{
    merge_recent, month_bounds, month_label, months_before, sum_amounts, totals_by_category,
};

/// How many months the trend covers, ending at the current month.
const TREND_MONTHS: u32 = 6;

/// How many of the most recent transactions to fetch from each collection
/// before merging them into the recent-transactions listing.
const RECENT_PER_COLLECTION: u64 = 5;

/// The aggregated financial statistics for one user.
///
/// Recomputed from the stores on every request, never persisted.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    /// Totals and category breakdowns for the current calendar month.
    pub current_month: CurrentMonthSummary,
    /// The most recent transactions across both collections.
    pub recent_transactions: Vec<Transaction>,
    /// Month-by-month totals for the trailing six months, oldest first.
    pub monthly_trend: Vec<TrendEntry>,
    /// Headline figures derived from the other sections.
    pub summary: SummaryStats,
}

/// Totals and category breakdowns for the current calendar month.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentMonthSummary {
    /// The sum of this month's expenses.
    pub total_expenses: f64,
    /// The sum of this month's income.
    pub total_income: f64,
    /// Income minus expenses.
    pub net_income: f64,
    /// This month's expenses grouped by category.
    pub expenses_by_category: HashMap<String, f64>,
    /// This month's income grouped by category.
    pub income_by_category: HashMap<String, f64>,
}

/// The expense, income, and net totals for one calendar month.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendEntry {
    /// A short label for the month, e.g. "Aug 2025".
    pub month: String,
    /// The sum of the month's expenses.
    pub expenses: f64,
    /// The sum of the month's income.
    pub income: f64,
    /// Income minus expenses.
    pub net: f64,
}

/// Headline figures for the summary.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    /// The number of transactions in the recent-transactions listing.
    ///
    /// This counts the capped listing, not all of the user's transactions,
    /// which matches the behaviour clients already depend on.
    pub total_transactions: usize,
    /// The mean amount of this month's expense records.
    pub average_expense: f64,
    /// The mean amount of this month's income records.
    pub average_income: f64,
    /// Net income as a percentage of income.
    pub savings_rate: f64,
}

/// Compute the financial summary for `user_id` as of `now`.
///
/// Only `user_id`'s records are read, every query is scoped to the owner.
/// Each month of the trend is computed from fresh queries, including the
/// current month.
///
/// # Errors
/// Returns an error if any of the queries fails. No partial summary is ever
/// returned.
pub fn financial_summary<S: TransactionStore>(
    store: &S,
    user_id: UserID,
    now: DateTime<Utc>,
) -> Result<FinancialSummary, Error> {
    let (month_start, month_end) = month_bounds(now.year(), now.month());

    let monthly_expenses = store.get_query(TransactionQuery {
        date_range: Some(month_start..=month_end),
        ..TransactionQuery::new(TransactionKind::Expense, user_id)
    })?;
    let monthly_income = store.get_query(TransactionQuery {
        date_range: Some(month_start..=month_end),
        ..TransactionQuery::new(TransactionKind::Income, user_id)
    })?;

    let total_expenses = sum_amounts(&monthly_expenses);
    let total_income = sum_amounts(&monthly_income);
    let net_income = total_income - total_expenses;

    let recent_expenses = store.get_query(TransactionQuery {
        sort_date: Some(SortOrder::Descending),
        limit: Some(RECENT_PER_COLLECTION),
        ..TransactionQuery::new(TransactionKind::Expense, user_id)
    })?;
    let recent_income = store.get_query(TransactionQuery {
        sort_date: Some(SortOrder::Descending),
        limit: Some(RECENT_PER_COLLECTION),
        ..TransactionQuery::new(TransactionKind::Income, user_id)
    })?;
    let recent_transactions = merge_recent(recent_expenses, recent_income);

    let mut monthly_trend = Vec::with_capacity(TREND_MONTHS as usize);

    for months_ago in (0..TREND_MONTHS).rev() {
        let (year, month) = months_before(now.year(), now.month(), months_ago);
        let (start, end) = month_bounds(year, month);

        let month_expenses = store.get_query(TransactionQuery {
            date_range: Some(start..=end),
            ..TransactionQuery::new(TransactionKind::Expense, user_id)
        })?;
        let month_income = store.get_query(TransactionQuery {
            date_range: Some(start..=end),
            ..TransactionQuery::new(TransactionKind::Income, user_id)
        })?;

        let expenses = sum_amounts(&month_expenses);
        let income = sum_amounts(&month_income);

        monthly_trend.push(TrendEntry {
            month: month_label(year, month),
            expenses,
            income,
            net: income - expenses,
        });
    }

    let summary = SummaryStats {
        total_transactions: recent_transactions.len(),
        average_expense: if monthly_expenses.is_empty() {
            0.0
        } else {
            total_expenses / monthly_expenses.len() as f64
        },
        average_income: if monthly_income.is_empty() {
            0.0
        } else {
            total_income / monthly_income.len() as f64
        },
        savings_rate: if total_income > 0.0 {
            (net_income / total_income) * 100.0
        } else {
            0.0
        },
    };

    Ok(FinancialSummary {
        current_month: CurrentMonthSummary {
            total_expenses,
            total_income,
            net_income,
            expenses_by_category: totals_by_category(&monthly_expenses),
            income_by_category: totals_by_category(&monthly_income),
        },
        recent_transactions,
        monthly_trend,
        summary,
    })
}

/// A route handler for getting the user's financial statistics.
pub async fn get_stats(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<FinancialSummary>, Error> {
    let summary = financial_summary(&state.transaction_store, user_id, Utc::now())?;

    Ok(Json(summary))
}

#[cfg(test)]
mod financial_summary_tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::{
        models::{Transaction, TransactionKind, UserID},
        stores::{TransactionStore, UserStore, sqlite::SQLiteTransactionStore},
        test_utils::get_test_app_state,
    };

    use super::financial_summary;

    fn get_store_and_user_id() -> (SQLiteTransactionStore, UserID) {
        let state = get_test_app_state();
        let mut user_store = state.user_store.clone();

        let user = user_store
            .create(
                "test@test.com".parse().unwrap(),
                crate::models::PasswordHash::new_unchecked("hunter2"),
            )
            .unwrap();

        (state.transaction_store, user.id())
    }

    fn create(
        store: &mut SQLiteTransactionStore,
        kind: TransactionKind,
        user_id: UserID,
        amount: f64,
        date: DateTime<Utc>,
        category: &str,
    ) -> Transaction {
        store
            .create(
                kind,
                Transaction::build(amount, user_id)
                    .description("a test transaction")
                    .category(category)
                    .date(date),
            )
            .unwrap()
    }

    // A fixed point in time so the tests do not depend on the wall clock.
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_state_yields_zeroed_summary() {
        let (store, user_id) = get_store_and_user_id();

        let summary = financial_summary(&store, user_id, now()).unwrap();

        assert_eq!(summary.current_month.total_expenses, 0.0);
        assert_eq!(summary.current_month.total_income, 0.0);
        assert_eq!(summary.current_month.net_income, 0.0);
        assert!(summary.current_month.expenses_by_category.is_empty());
        assert!(summary.current_month.income_by_category.is_empty());
        assert!(summary.recent_transactions.is_empty());
        assert_eq!(summary.monthly_trend.len(), 6);
        for entry in &summary.monthly_trend {
            assert_eq!(entry.expenses, 0.0);
            assert_eq!(entry.income, 0.0);
            assert_eq!(entry.net, 0.0);
        }
        assert_eq!(summary.summary.total_transactions, 0);
        assert_eq!(summary.summary.average_expense, 0.0);
        assert_eq!(summary.summary.average_income, 0.0);
        assert_eq!(summary.summary.savings_rate, 0.0);
    }

    #[test]
    fn summary_never_includes_other_users_records() {
        let state = get_test_app_state();
        let mut user_store = state.user_store.clone();

        // Both users live in the same database.
        let user_a = user_store
            .create(
                "a@test.com".parse().unwrap(),
                crate::models::PasswordHash::new_unchecked("hunter2"),
            )
            .unwrap();
        let user_b = user_store
            .create(
                "b@test.com".parse().unwrap(),
                crate::models::PasswordHash::new_unchecked("hunter3"),
            )
            .unwrap();

        let mut store = state.transaction_store.clone();
        create(
            &mut store,
            TransactionKind::Expense,
            user_a.id(),
            100.0,
            now(),
            "Food",
        );
        create(
            &mut store,
            TransactionKind::Income,
            user_a.id(),
            50.0,
            now(),
            "Salary",
        );

        let summary = financial_summary(&store, user_b.id(), now()).unwrap();

        assert_eq!(summary.current_month.total_expenses, 0.0);
        assert_eq!(summary.current_month.total_income, 0.0);
        assert!(summary.current_month.expenses_by_category.is_empty());
        assert!(summary.recent_transactions.is_empty());
        for entry in &summary.monthly_trend {
            assert_eq!(entry.expenses, 0.0);
            assert_eq!(entry.income, 0.0);
        }
    }

    #[test]
    fn month_boundaries_are_inclusive() {
        let (mut store, user_id) = get_store_and_user_id();

        let month_start = Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap();
        let month_end = Utc.with_ymd_and_hms(2025, 8, 31, 23, 59, 59).unwrap();

        create(
            &mut store,
            TransactionKind::Expense,
            user_id,
            1.0,
            month_start,
            "Food",
        );
        create(
            &mut store,
            TransactionKind::Expense,
            user_id,
            2.0,
            month_end,
            "Food",
        );
        // One second outside either boundary must not count.
        create(
            &mut store,
            TransactionKind::Expense,
            user_id,
            4.0,
            month_start - Duration::seconds(1),
            "Food",
        );
        create(
            &mut store,
            TransactionKind::Expense,
            user_id,
            8.0,
            month_end + Duration::seconds(1),
            "Food",
        );

        let summary = financial_summary(&store, user_id, now()).unwrap();

        assert_eq!(summary.current_month.total_expenses, 3.0);
    }

    #[test]
    fn net_income_is_income_minus_expenses_for_every_period() {
        let (mut store, user_id) = get_store_and_user_id();

        for months_ago in 0..6 {
            let date = Utc
                .with_ymd_and_hms(2025, 8 - months_ago, 10, 12, 0, 0)
                .unwrap();
            create(
                &mut store,
                TransactionKind::Expense,
                user_id,
                100.0 * (months_ago + 1) as f64,
                date,
                "Bills",
            );
            create(
                &mut store,
                TransactionKind::Income,
                user_id,
                150.0 * (months_ago + 1) as f64,
                date,
                "Salary",
            );
        }

        let summary = financial_summary(&store, user_id, now()).unwrap();

        assert_eq!(
            summary.current_month.net_income,
            summary.current_month.total_income - summary.current_month.total_expenses
        );
        for entry in &summary.monthly_trend {
            assert_eq!(entry.net, entry.income - entry.expenses);
        }
    }

    #[test]
    fn savings_rate_is_net_income_percentage() {
        let (mut store, user_id) = get_store_and_user_id();

        create(
            &mut store,
            TransactionKind::Income,
            user_id,
            1000.0,
            now(),
            "Salary",
        );
        create(
            &mut store,
            TransactionKind::Expense,
            user_id,
            600.0,
            now(),
            "Bills",
        );

        let summary = financial_summary(&store, user_id, now()).unwrap();

        assert_eq!(summary.current_month.net_income, 400.0);
        assert_eq!(summary.summary.savings_rate, 40.0);
    }

    #[test]
    fn expenses_are_grouped_by_category() {
        let (mut store, user_id) = get_store_and_user_id();

        create(
            &mut store,
            TransactionKind::Expense,
            user_id,
            10.0,
            now(),
            "Food",
        );
        create(
            &mut store,
            TransactionKind::Expense,
            user_id,
            5.0,
            now(),
            "Food",
        );
        create(
            &mut store,
            TransactionKind::Expense,
            user_id,
            20.0,
            now(),
            "Transport",
        );

        let summary = financial_summary(&store, user_id, now()).unwrap();

        assert_eq!(summary.current_month.total_expenses, 35.0);
        assert_eq!(summary.current_month.expenses_by_category.len(), 2);
        assert_eq!(summary.current_month.expenses_by_category["Food"], 15.0);
        assert_eq!(
            summary.current_month.expenses_by_category["Transport"],
            20.0
        );
    }

    #[test]
    fn averages_use_current_month_record_counts() {
        let (mut store, user_id) = get_store_and_user_id();

        create(
            &mut store,
            TransactionKind::Expense,
            user_id,
            10.0,
            now(),
            "Food",
        );
        create(
            &mut store,
            TransactionKind::Expense,
            user_id,
            20.0,
            now(),
            "Food",
        );
        create(
            &mut store,
            TransactionKind::Income,
            user_id,
            900.0,
            now(),
            "Salary",
        );

        let summary = financial_summary(&store, user_id, now()).unwrap();

        assert_eq!(summary.summary.average_expense, 15.0);
        assert_eq!(summary.summary.average_income, 900.0);
    }

    #[test]
    fn recent_transactions_merge_the_top_five_of_each_collection() {
        let (mut store, user_id) = get_store_and_user_id();

        // All expenses are more recent than all income entries.
        for day in 10..=17 {
            create(
                &mut store,
                TransactionKind::Expense,
                user_id,
                day as f64,
                Utc.with_ymd_and_hms(2025, 8, day, 12, 0, 0).unwrap(),
                "Food",
            );
        }
        for day in 1..=8 {
            create(
                &mut store,
                TransactionKind::Income,
                user_id,
                day as f64,
                Utc.with_ymd_and_hms(2025, 8, day, 12, 0, 0).unwrap(),
                "Salary",
            );
        }

        let summary = financial_summary(&store, user_id, now()).unwrap();
        let recents = &summary.recent_transactions;

        assert_eq!(recents.len(), 10);
        assert_eq!(summary.summary.total_transactions, 10);
        for window in recents.windows(2) {
            assert!(
                window[0].date() >= window[1].date(),
                "recent transactions are not sorted by descending date"
            );
        }

        // Only the 5 most recent of each collection may appear: the expense
        // from Aug 12 must be absent even though it is newer than every
        // included income entry.
        let expense_days: Vec<u32> = recents
            .iter()
            .filter(|transaction| transaction.kind() == TransactionKind::Expense)
            .map(|transaction| transaction.amount() as u32)
            .collect();
        let income_days: Vec<u32> = recents
            .iter()
            .filter(|transaction| transaction.kind() == TransactionKind::Income)
            .map(|transaction| transaction.amount() as u32)
            .collect();

        assert_eq!(expense_days, vec![17, 16, 15, 14, 13]);
        assert_eq!(income_days, vec![8, 7, 6, 5, 4]);
    }

    #[test]
    fn trend_is_six_entries_oldest_first_ending_at_current_month() {
        let (mut store, user_id) = get_store_and_user_id();

        // One expense per month from March to August 2025, plus one in
        // January that is too old to appear.
        for month in 3..=8 {
            create(
                &mut store,
                TransactionKind::Expense,
                user_id,
                month as f64,
                Utc.with_ymd_and_hms(2025, month, 10, 12, 0, 0).unwrap(),
                "Bills",
            );
        }
        create(
            &mut store,
            TransactionKind::Expense,
            user_id,
            999.0,
            Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap(),
            "Bills",
        );

        let summary = financial_summary(&store, user_id, now()).unwrap();
        let trend = &summary.monthly_trend;

        assert_eq!(trend.len(), 6);
        let labels: Vec<&str> = trend.iter().map(|entry| entry.month.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Mar 2025", "Apr 2025", "May 2025", "Jun 2025", "Jul 2025", "Aug 2025"
            ]
        );
        let expenses: Vec<f64> = trend.iter().map(|entry| entry.expenses).collect();
        assert_eq!(expenses, vec![3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn trend_crosses_year_boundaries() {
        let (mut store, user_id) = get_store_and_user_id();

        let now = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();
        create(
            &mut store,
            TransactionKind::Income,
            user_id,
            500.0,
            Utc.with_ymd_and_hms(2024, 11, 20, 12, 0, 0).unwrap(),
            "Salary",
        );

        let summary = financial_summary(&store, user_id, now).unwrap();
        let labels: Vec<&str> = summary
            .monthly_trend
            .iter()
            .map(|entry| entry.month.as_str())
            .collect();

        assert_eq!(
            labels,
            vec![
                "Oct 2024", "Nov 2024", "Dec 2024", "Jan 2025", "Feb 2025", "Mar 2025"
            ]
        );
        assert_eq!(summary.monthly_trend[1].income, 500.0);
    }

    #[test]
    fn current_month_totals_match_last_trend_entry() {
        let (mut store, user_id) = get_store_and_user_id();

        create(
            &mut store,
            TransactionKind::Expense,
            user_id,
            123.0,
            now(),
            "Food",
        );
        create(
            &mut store,
            TransactionKind::Income,
            user_id,
            456.0,
            now(),
            "Salary",
        );

        let summary = financial_summary(&store, user_id, now()).unwrap();
        let last = summary.monthly_trend.last().unwrap();

        assert_eq!(last.expenses, summary.current_month.total_expenses);
        assert_eq!(last.income, summary.current_month.total_income);
        assert_eq!(last.net, summary.current_month.net_income);
    }
}
