//! Application state shared across the CLI surface.

use std::sync::Arc;

use crate::api::{self, ApiError, AuthClient, CatalogClient, ChatClient};
use crate::cart_store::{CartPolicy, CartStore};
use crate::config::ShopsmartConfig;
use crate::storage::{JsonFileStore, KvStore};

/// Application state: configuration, storage, and collaborator clients.
///
/// Cheaply cloneable via `Arc`. The cart store is deliberately not held
/// here - it is the exclusive owner of the live cart state, so each command
/// opens it, mutates, and lets it persist, instead of sharing a mutable
/// store behind an ambient context.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ShopsmartConfig,
    storage: Arc<dyn KvStore>,
    catalog: CatalogClient,
    chat: ChatClient,
    auth: AuthClient,
}

impl AppState {
    /// Build the application state from configuration.
    ///
    /// The HTTP client picks up the stored bearer token, if any, so requests
    /// made after a login carry the credential.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the HTTP client cannot be built or an endpoint
    /// URL is invalid.
    pub fn new(config: ShopsmartConfig) -> Result<Self, ApiError> {
        let storage: Arc<dyn KvStore> =
            Arc::new(JsonFileStore::new(config.data_dir.join("store.json")));

        let token = api::auth::stored_token(storage.as_ref());
        let client = api::build_http_client(token.as_ref())?;

        let catalog = CatalogClient::new(client.clone(), config.catalog_url.clone());
        let chat = ChatClient::new(client.clone(), &config.api_base_url)?;
        let auth = AuthClient::new(client, &config.api_base_url)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                storage,
                catalog,
                chat,
                auth,
            }),
        })
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &ShopsmartConfig {
        &self.inner.config
    }

    /// Get a handle to the durable key-value store.
    #[must_use]
    pub fn storage(&self) -> Arc<dyn KvStore> {
        Arc::clone(&self.inner.storage)
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the chat client.
    #[must_use]
    pub fn chat(&self) -> &ChatClient {
        &self.inner.chat
    }

    /// Get a reference to the auth client.
    #[must_use]
    pub fn auth(&self) -> &AuthClient {
        &self.inner.auth
    }

    /// Open the persisted cart store with the configured policy.
    #[must_use]
    pub fn open_cart(&self) -> CartStore {
        let policy = CartPolicy {
            enforce_stock_check: self.inner.config.enforce_stock_check,
        };
        CartStore::open(self.storage(), policy)
    }
}
