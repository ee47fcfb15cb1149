//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOPSMART_API_BASE_URL` - Base URL of the backend collaborator hosting
//!   `/chat` and `/auth/login` (default: `http://localhost:8000`)
//! - `SHOPSMART_CATALOG_URL` - Remote catalog source; when unset the built-in
//!   sample catalog is served
//! - `SHOPSMART_DATA_DIR` - Directory for the durable key-value store
//!   (default: `.shopsmart` in the working directory)
//! - `SHOPSMART_ENFORCE_STOCK_CHECK` - `true`/`1` to make the cart store
//!   reject out-of-stock products (default: off)

use std::env;
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default backend base URL, matching the local development collaborator.
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Default data directory for the key-value store.
const DEFAULT_DATA_DIR: &str = ".shopsmart";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A URL variable did not parse.
    #[error("invalid URL in {name}: {source}")]
    InvalidUrl {
        /// Variable name.
        name: &'static str,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },

    /// A boolean variable held something other than a boolean.
    #[error("invalid boolean in {name}: {value:?}")]
    InvalidBool {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct ShopsmartConfig {
    /// Base URL of the chat/auth collaborator.
    pub api_base_url: Url,
    /// Remote catalog source, if configured.
    pub catalog_url: Option<Url>,
    /// Directory holding the durable key-value store.
    pub data_dir: PathBuf,
    /// Whether the cart store rejects out-of-stock products.
    pub enforce_stock_check: bool,
}

impl ShopsmartConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a set variable fails to parse. Unset
    /// variables fall back to their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = match env::var("SHOPSMART_API_BASE_URL") {
            Ok(raw) => parse_url("SHOPSMART_API_BASE_URL", &raw)?,
            Err(_) => parse_url("SHOPSMART_API_BASE_URL", DEFAULT_API_BASE_URL)?,
        };

        let catalog_url = match env::var("SHOPSMART_CATALOG_URL") {
            Ok(raw) if !raw.is_empty() => Some(parse_url("SHOPSMART_CATALOG_URL", &raw)?),
            _ => None,
        };

        let data_dir = env::var("SHOPSMART_DATA_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let enforce_stock_check = match env::var("SHOPSMART_ENFORCE_STOCK_CHECK") {
            Ok(raw) => parse_bool("SHOPSMART_ENFORCE_STOCK_CHECK", &raw)?,
            Err(_) => false,
        };

        Ok(Self {
            api_base_url,
            catalog_url,
            data_dir,
            enforce_stock_check,
        })
    }
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { name, source })
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => Err(ConfigError::InvalidBool {
            name,
            value: other.to_owned(),
        }),
    }
}
