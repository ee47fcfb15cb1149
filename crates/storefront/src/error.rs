//! Unified error handling for the storefront surface.
//!
//! Every fallible operation exposed to the CLI shell funnels into
//! [`AppError`]. Collaborator failures carry a `user_message` suitable for
//! display; nothing internal leaks past it.

use thiserror::Error;

use crate::api::{ApiError, AuthError};
use crate::cart_store::CartError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration failed to load.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Durable storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart operation rejected by policy.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Collaborator call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Authentication failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Requested entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// The static, user-visible rendering of this error.
    ///
    /// Transport and credential failures deliberately collapse to generic
    /// notices; no distinction between failure modes is surfaced.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(AuthError::InvalidCredentials) => "Invalid credentials".to_owned(),
            Self::Auth(_) => "Authentication error".to_owned(),
            Self::Api(_) => "External service error".to_owned(),
            Self::NotFound(what) => format!("Not found: {what}"),
            Self::Config(_) | Self::Storage(_) | Self::Cart(_) => self.to_string(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
