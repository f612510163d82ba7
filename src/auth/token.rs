//! Creation and verification of the JSON Web Tokens used for bearer auth.

use chrono::{Duration, Utc};
use email_address::EmailAddress;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{Error, models::UserID};

/// How long a token stays valid after it is issued.
const TOKEN_DURATION_DAYS: i64 = 1;

/// The contents of a JSON Web Token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The expiry time of the token.
    pub exp: usize,
    /// The time the token was issued.
    pub iat: usize,
    /// The ID of the user the token was issued to.
    pub user_id: UserID,
    /// Email associated with the token.
    pub email: String,
}

/// Create a signed token for the user.
///
/// # Errors
/// Returns [Error::TokenCreation] if the token could not be signed.
pub(crate) fn encode_jwt(
    user_id: UserID,
    email: &EmailAddress,
    encoding_key: &EncodingKey,
) -> Result<String, Error> {
    let now = Utc::now();
    let claims = Claims {
        exp: (now + Duration::days(TOKEN_DURATION_DAYS)).timestamp() as usize,
        iat: now.timestamp() as usize,
        user_id,
        email: email.to_string(),
    };

    encode(&Header::default(), &claims, encoding_key).map_err(|e| {
        tracing::error!("Error encoding JWT: {e}");
        Error::TokenCreation
    })
}

/// Verify a token's signature and expiry and return its contents.
///
/// # Errors
/// Returns [Error::InvalidToken] if the token is malformed, has an invalid
/// signature, or has expired.
pub(crate) fn decode_jwt(
    jwt_token: &str,
    decoding_key: &DecodingKey,
) -> Result<TokenData<Claims>, Error> {
    decode(jwt_token, decoding_key, &Validation::default()).map_err(|_| Error::InvalidToken)
}
