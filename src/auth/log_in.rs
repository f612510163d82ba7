//! The route handler for logging in a user.

use axum::{Json, extract::State};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, auth::token::encode_jwt, stores::UserStore};

/// The credentials a client sends to log in.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    /// Email entered during log-in.
    pub email: EmailAddress,
    /// Password entered during log-in.
    pub password: String,
}

/// The response body for a successful log-in.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// A signed bearer token for the logged in user.
    pub token: String,
}

/// Handler for log-in requests.
///
/// Whether the email is unknown or the password is wrong, the client receives
/// the same [Error::InvalidCredentials] response so that the API does not
/// reveal which part was incorrect.
///
/// # Errors
///
/// This function will return an error if:
/// - the email does not belong to a registered user,
/// - the password is not correct,
/// - or an internal error occurred while verifying the password or signing
///   the token.
pub async fn post_log_in(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<TokenResponse>, Error> {
    let user = state
        .user_store
        .get_by_email(&credentials.email)
        .map_err(|error| match error {
            Error::NotFound => Error::InvalidCredentials,
            error => error,
        })?;

    let password_is_correct =
        user.password_hash()
            .verify(&credentials.password)
            .map_err(|error| {
                tracing::error!("Error verifying password: {error}");
                Error::HashingError(error.to_string())
            })?;

    if !password_is_correct {
        return Err(Error::InvalidCredentials);
    }

    let token = encode_jwt(user.id(), user.email(), state.encoding_key())?;

    Ok(Json(TokenResponse { token }))
}
