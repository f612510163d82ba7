//! The route handler for registering a new user.

use axum::{Json, extract::State, http::StatusCode};
use email_address::EmailAddress;
use serde::Serialize;

use crate::{
    AppState, Error,
    auth::Credentials,
    models::{PasswordHash, UserID},
    stores::UserStore,
};

/// The response body for a successful registration.
///
/// The password hash is deliberately not part of the response.
#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    /// The new user's ID.
    pub id: UserID,
    /// The new user's email address.
    pub email: EmailAddress,
}

/// Handler for registration requests.
///
/// # Errors
///
/// This function will return an error if:
/// - the email is already in use ([Error::DuplicateEmail], 409),
/// - or an internal error occurred while hashing the password.
pub async fn register_user(
    State(mut state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<(StatusCode, Json<RegisteredUser>), Error> {
    let password_hash = PasswordHash::new(&credentials.password, PasswordHash::DEFAULT_COST)
        .map_err(|error| {
            tracing::error!("Error hashing password: {error}");
            error
        })?;

    let user = state.user_store.create(credentials.email, password_hash)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisteredUser {
            id: user.id(),
            email: user.email().to_owned(),
        }),
    ))
}

#[cfg(test)]
mod register_user_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{endpoints, test_utils::get_test_server};

    #[tokio::test]
    async fn register_user_succeeds() {
        let (server, _) = get_test_server();

        let response = server
            .post(endpoints::REGISTER)
            .content_type("application/json")
            .json(&json!({
                "email": "test@test.com",
                "password": "averysafeandsecurepassword",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["email"], "test@test.com");
        assert!(body["id"].as_i64().unwrap() > 0);
        assert!(
            body.get("password").is_none() && body.get("passwordHash").is_none(),
            "the response must not contain password data: {body}"
        );
    }

    #[tokio::test]
    async fn register_user_fails_on_duplicate_email() {
        let (server, _) = get_test_server();

        let credentials = json!({
            "email": "test@test.com",
            "password": "averysafeandsecurepassword",
        });

        server
            .post(endpoints::REGISTER)
            .content_type("application/json")
            .json(&credentials)
            .await
            .assert_status(StatusCode::CREATED);

        server
            .post(endpoints::REGISTER)
            .content_type("application/json")
            .json(&credentials)
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn registered_user_can_log_in() {
        let (server, _) = get_test_server();

        server
            .post(endpoints::REGISTER)
            .content_type("application/json")
            .json(&json!({
                "email": "test@test.com",
                "password": "hunter2hunter2",
            }))
            .await
            .assert_status(StatusCode::CREATED);

        server
            .post(endpoints::LOG_IN)
            .content_type("application/json")
            .json(&json!({
                "email": "test@test.com",
                "password": "hunter2hunter2",
            }))
            .await
            .assert_status_ok();
    }
}
