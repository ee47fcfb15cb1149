//! Auth collaborator client.
//!
//! `POST /auth/login` with `{ email, password }` yields `{ access_token }`,
//! which is persisted under the `"token"` slot and attached as a bearer
//! credential to subsequent collaborator requests. Any rejection collapses
//! to a generic invalid-credentials error; this side never learns whether
//! the password or the account was wrong.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use url::Url;

use shopsmart_core::Email;

use crate::storage::{KvStore, StorageError, TOKEN_KEY};

use super::ApiError;

/// Errors that can occur during authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The collaborator rejected the credentials.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The request never produced a usable response.
    #[error("auth request failed: {0}")]
    Api(#[from] ApiError),

    /// The token could not be persisted.
    #[error("token storage failed: {0}")]
    Storage(#[from] StorageError),
}

/// Client for the auth collaborator.
#[derive(Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    endpoint: Url,
}

/// Request body for `POST /auth/login`.
#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Success body for `POST /auth/login`.
#[derive(Deserialize)]
struct LoginResponse {
    access_token: String,
}

impl AuthClient {
    /// Create an auth client against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parse`] if the login endpoint cannot be joined
    /// onto the base.
    pub fn new(client: reqwest::Client, base_url: &Url) -> Result<Self, ApiError> {
        let endpoint = base_url
            .join("auth/login")
            .map_err(|e| ApiError::Parse(format!("Invalid login endpoint: {e}")))?;
        Ok(Self { client, endpoint })
    }

    /// Log in and return the access token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for any 4xx response - no
    /// finer distinction is surfaced - and [`AuthError::Api`] for transport
    /// or parse failures.
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<SecretString, AuthError> {
        let body = LoginRequest {
            email: email.as_str(),
            password: password.expose_secret(),
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if status.is_client_error() {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Api(ApiError::Api {
                status: status.as_u16(),
                message,
            }));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(SecretString::from(body.access_token))
    }

    /// Log in and persist the token under the `"token"` slot.
    ///
    /// # Errors
    ///
    /// Same as [`Self::login`]; a persist failure is also an error here,
    /// since a token the next request cannot read is useless.
    pub async fn login_and_store(
        &self,
        storage: &dyn KvStore,
        email: &Email,
        password: &SecretString,
    ) -> Result<(), AuthError> {
        let token = self.login(email, password).await?;
        storage.set(TOKEN_KEY, token.expose_secret())?;
        Ok(())
    }
}

/// Read the stored bearer token, if any. A storage failure reads as "not
/// logged in" rather than an error.
#[must_use]
pub fn stored_token(storage: &dyn KvStore) -> Option<SecretString> {
    match storage.get(TOKEN_KEY) {
        Ok(token) => token.map(SecretString::from),
        Err(e) => {
            warn!(error = %e, "Failed to read stored token");
            None
        }
    }
}
