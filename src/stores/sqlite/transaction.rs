//! Implements a SQLite backed transaction store.
//!
//! Expenses and income are stored in two separate tables with identical
//! schemas, selected by [TransactionKind].

use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{Connection, Row, ToSql, params_from_iter};

use crate::{
    Error,
    db::CreateTable,
    models::{DatabaseID, Transaction, TransactionBuilder, TransactionKind, UserID},
    stores::{
        TransactionStore,
        transaction::{SortOrder, TransactionChanges, TransactionQuery},
    },
};

const COLUMNS: &str = "id, user_id, amount, description, category, date, created_at, updated_at";

/// Stores transactions in a SQLite database.
///
/// Note that because a transaction depends on the [User](crate::models::User)
/// model, the user table must be set up in the database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn select_one(
        connection: &Connection,
        kind: TransactionKind,
        id: DatabaseID,
        user_id: UserID,
    ) -> Result<Transaction, Error> {
        let transaction = connection
            .prepare(&format!(
                "SELECT {COLUMNS} FROM {} WHERE id = :id AND user_id = :user_id",
                kind.table()
            ))?
            .query_row(&[(":id", &id), (":user_id", &user_id.as_i64())], |row| {
                map_row(row, kind)
            })?;

        Ok(transaction)
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// The ID and creation timestamp are assigned here.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error,
    /// e.g. `user_id` does not refer to a valid user.
    fn create(
        &mut self,
        kind: TransactionKind,
        builder: TransactionBuilder,
    ) -> Result<Transaction, Error> {
        let connection = self.connection.lock().unwrap();
        let created_at = Utc::now();

        connection.execute(
            &format!(
                "INSERT INTO {} (user_id, amount, description, category, date, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                kind.table()
            ),
            (
                builder.user_id.as_i64(),
                builder.amount,
                &builder.description,
                &builder.category,
                builder.date,
                created_at,
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Transaction::new_unchecked(
            id,
            builder.user_id,
            builder.amount,
            builder.description,
            builder.category,
            builder.date,
            created_at,
            None,
            kind,
        ))
    }

    /// Retrieve a transaction in the database by its `id` and owner.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a transaction owned by
    ///   `user_id`,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get(
        &self,
        kind: TransactionKind,
        id: DatabaseID,
        user_id: UserID,
    ) -> Result<Transaction, Error> {
        let connection = self.connection.lock().unwrap();

        Self::select_one(&connection, kind, id, user_id)
    }

    /// Query for transactions in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is a SQL error.
    fn get_query(&self, query: TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let user_id = query.user_id.as_i64();
        let mut query_string_parts = vec![format!(
            "SELECT {COLUMNS} FROM {} WHERE user_id = ?1",
            query.kind.table()
        )];
        let mut query_parameters: Vec<&dyn ToSql> = vec![&user_id];

        if let Some(date_range) = &query.date_range {
            query_string_parts.push(format!(
                "AND date BETWEEN ?{} AND ?{}",
                query_parameters.len() + 1,
                query_parameters.len() + 2,
            ));
            query_parameters.push(date_range.start());
            query_parameters.push(date_range.end());
        }

        match query.sort_date {
            Some(SortOrder::Ascending) => query_string_parts.push("ORDER BY date ASC".to_string()),
            Some(SortOrder::Descending) => {
                query_string_parts.push("ORDER BY date DESC".to_string())
            }
            None => {}
        }

        if let Some(limit) = query.limit {
            query_string_parts.push(format!("LIMIT {limit}"));
        }

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters);

        self.connection
            .lock()
            .unwrap()
            .prepare(&query_string)?
            .query_map(params, |row| map_row(row, query.kind))?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Overwrite the mutable fields of a transaction and set its modification
    /// timestamp.
    ///
    /// When `changes.date` is `None` the date is reset to the current time.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a transaction owned by
    ///   `user_id`,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(
        &mut self,
        kind: TransactionKind,
        id: DatabaseID,
        user_id: UserID,
        changes: TransactionChanges,
    ) -> Result<Transaction, Error> {
        let connection = self.connection.lock().unwrap();
        let date = changes.date.unwrap_or_else(Utc::now);
        let updated_at = Utc::now();

        let rows_changed = connection.execute(
            &format!(
                "UPDATE {} SET amount = ?1, description = ?2, category = ?3, date = ?4, updated_at = ?5
                 WHERE id = ?6 AND user_id = ?7",
                kind.table()
            ),
            (
                changes.amount,
                &changes.description,
                &changes.category,
                date,
                updated_at,
                id,
                user_id.as_i64(),
            ),
        )?;

        if rows_changed == 0 {
            return Err(Error::NotFound);
        }

        Self::select_one(&connection, kind, id, user_id)
    }

    /// Delete a transaction from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a transaction owned by
    ///   `user_id`,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(
        &mut self,
        kind: TransactionKind,
        id: DatabaseID,
        user_id: UserID,
    ) -> Result<(), Error> {
        let rows_changed = self.connection.lock().unwrap().execute(
            &format!(
                "DELETE FROM {} WHERE id = ?1 AND user_id = ?2",
                kind.table()
            ),
            (id, user_id.as_i64()),
        )?;

        if rows_changed == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        for kind in [TransactionKind::Expense, TransactionKind::Income] {
            connection.execute(
                &format!(
                    "CREATE TABLE IF NOT EXISTS {} (
                            id INTEGER PRIMARY KEY AUTOINCREMENT,
                            user_id INTEGER NOT NULL,
                            amount REAL NOT NULL,
                            description TEXT NOT NULL,
                            category TEXT NOT NULL,
                            date TEXT NOT NULL,
                            created_at TEXT NOT NULL,
                            updated_at TEXT,
                            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                            )",
                    kind.table()
                ),
                (),
            )?;
        }

        Ok(())
    }
}

// The kind is not a column, it is implied by the table, so the row mapping
// cannot go through the MapRow trait.
fn map_row(row: &Row, kind: TransactionKind) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction::new_unchecked(
        row.get(0)?,
        UserID::new(row.get(1)?),
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        kind,
    ))
}
