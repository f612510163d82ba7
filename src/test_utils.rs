//! Helper functions for setting up tests.

use axum_test::TestServer;
use rusqlite::Connection;

use crate::{
    AppState, build_router, create_app_state,
    auth::encode_jwt,
    models::{PasswordHash, UserID},
    stores::UserStore,
};

/// Create an [AppState] backed by an in-memory database.
pub(crate) fn get_test_app_state() -> AppState {
    let conn = Connection::open_in_memory().expect("Could not open database in memory.");

    create_app_state(conn, "wowwhatasecret").expect("Could not create app state.")
}

/// Create a test server running the full application router.
pub(crate) fn get_test_server() -> (TestServer, AppState) {
    let state = get_test_app_state();
    let server =
        TestServer::try_new(build_router(state.clone())).expect("Could not create test server.");

    (server, state)
}

/// Insert a user with `email` and return their ID along with a valid bearer
/// token for them.
pub(crate) fn create_user_with_token(state: &AppState, email: &str) -> (UserID, String) {
    let mut user_store = state.user_store.clone();

    let user = user_store
        .create(
            email.parse().unwrap(),
            PasswordHash::new_unchecked("notarealhash"),
        )
        .unwrap();

    let token = encode_jwt(user.id(), user.email(), state.encoding_key()).unwrap();

    (user.id(), token)
}
