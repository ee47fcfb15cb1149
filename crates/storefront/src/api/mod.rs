//! Clients for the external collaborators.
//!
//! Three services live behind plain JSON-over-HTTP calls: the remote catalog
//! (`GET <catalog-url>`), the chat endpoint (`POST /chat`), and the auth
//! endpoint (`POST /auth/login`). Each adapter normalizes the
//! inconsistencies observed across the drafts (`name` vs `title`, `reply`
//! vs `response`, flat vs nested rating) so the core model only ever sees
//! canonical fields.

pub mod auth;
pub mod catalog;
pub mod chat;

pub use auth::{AuthClient, AuthError};
pub use catalog::CatalogClient;
pub use chat::ChatClient;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Errors that can occur when calling a collaborator.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The collaborator returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, for logs only.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Build the shared HTTP client, attaching the bearer token to every request
/// if one is available.
///
/// # Errors
///
/// Returns [`ApiError::Parse`] if the stored token cannot be used as a
/// header value, or [`ApiError::Http`] if the client fails to build.
pub fn build_http_client(token: Option<&SecretString>) -> Result<reqwest::Client, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert("Content-Type", HeaderValue::from_static("application/json"));

    if let Some(token) = token {
        let value = format!("Bearer {}", token.expose_secret());
        let mut value = HeaderValue::from_str(&value)
            .map_err(|e| ApiError::Parse(format!("Invalid token format: {e}")))?;
        value.set_sensitive(true);
        headers.insert("Authorization", value);
    }

    Ok(reqwest::Client::builder().default_headers(headers).build()?)
}
