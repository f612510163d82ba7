//! Bearer-token authentication for the API.
//!
//! Clients obtain a signed token from the log-in endpoint and present it in
//! the `Authorization` header of every request to a protected route. The
//! [auth_guard] middleware verifies the token once for all protected routes
//! and injects the verified [UserID](crate::models::UserID) into the request.

mod log_in;
mod middleware;
mod token;

pub use log_in::{Credentials, TokenResponse, post_log_in};
pub use middleware::{AuthState, auth_guard};

#[cfg(test)]
pub(crate) use token::{decode_jwt, encode_jwt};
