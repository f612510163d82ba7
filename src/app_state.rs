//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use jsonwebtoken::{DecodingKey, EncodingKey};
use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    stores::sqlite::{SQLiteTransactionStore, SQLiteUserStore},
};

#[derive(Clone)]
pub(crate) struct JwtKeys {
    pub(crate) encoding_key: EncodingKey,
    pub(crate) decoding_key: DecodingKey,
}

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The store for the application's users.
    pub user_store: SQLiteUserStore,

    /// The store for the application's expense and income records.
    pub transaction_store: SQLiteTransactionStore,

    jwt_keys: JwtKeys,
}

impl AppState {
    /// The key for signing auth tokens.
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.jwt_keys.encoding_key
    }

    /// The key for verifying auth tokens.
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.jwt_keys.decoding_key
    }
}

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will initialize the database by adding the tables for the
/// domain models. `jwt_secret` is the secret used to sign and verify auth
/// tokens.
///
/// # Errors
/// Returns an error if the database cannot be initialized.
pub fn create_app_state(db_connection: Connection, jwt_secret: &str) -> Result<AppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(AppState {
        user_store: SQLiteUserStore::new(connection.clone()),
        transaction_store: SQLiteTransactionStore::new(connection),
        jwt_keys: JwtKeys {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_ref()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_ref()),
        },
    })
}
