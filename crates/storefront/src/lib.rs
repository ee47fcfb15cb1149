//! ShopSmart Storefront - services around the core state model.
//!
//! This crate owns everything the pure core deliberately excludes:
//!
//! - [`config`] - Environment-driven configuration
//! - [`storage`] - The durable key-value slot (localStorage analogue)
//! - [`cart_store`] - The persisting cart store and its stock policy
//! - [`api`] - Clients for the three external collaborators
//!   (remote catalog, chat, auth) with boundary normalization
//! - [`chat`] - The chat transcript with request sequencing
//! - [`state`] - Shared application state for the CLI shell
//!
//! Collaborators are fire-and-forget from the core's point of view: a failed
//! network call degrades to a visible notice and never disturbs cart state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart_store;
pub mod chat;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;

pub use cart_store::{CartError, CartPolicy, CartStore};
pub use chat::{ChatMessage, ChatSession, Sender};
pub use config::{ConfigError, ShopsmartConfig};
pub use error::AppError;
pub use state::AppState;
