//! Authentication middleware that validates bearer tokens for all protected
//! routes.
//!
//! Verifying the token in one place keeps the route handlers free of
//! credential handling: handlers receive the verified user ID from the
//! request extensions.

use axum::{
    RequestPartsExt,
    extract::{FromRef, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::DecodingKey;

use crate::{AppState, Error, auth::token::decode_jwt};

/// The state needed for the auth middleware.
#[derive(Clone)]
pub struct AuthState {
    /// The key for verifying auth tokens.
    pub decoding_key: DecodingKey,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            decoding_key: state.decoding_key().clone(),
        }
    }
}

/// Middleware function that checks for a valid bearer token in the
/// `Authorization` header.
///
/// The user ID is placed into the request and then the request executed
/// normally if the token is valid, otherwise a 401 response is returned
/// before any route handler runs.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(user_id): Extension<UserID>` to receive the user ID.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();

    let TypedHeader(Authorization(bearer)) = match parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
    {
        Ok(header) => header,
        Err(_) => return Error::InvalidToken.into_response(),
    };

    let claims = match decode_jwt(bearer.token(), &state.decoding_key) {
        Ok(token_data) => token_data.claims,
        Err(error) => return error.into_response(),
    };

    parts.extensions.insert(claims.user_id);

    next.run(Request::from_parts(parts, body)).await
}
