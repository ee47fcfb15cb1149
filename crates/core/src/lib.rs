//! ShopSmart Core - Catalog and cart state model.
//!
//! This crate provides the extractable core of the ShopSmart storefront:
//! - [`types`] - Domain types: products, ids, emails
//! - [`cart`] - The cart state model: lines, mutations, derived totals
//! - [`catalog`] - Filtering and sorting of the catalog view
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no storage, no HTTP clients. Persistence and collaborator adapters live
//! in `shopsmart-storefront`; this keeps the invariant-bearing logic
//! testable in isolation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{CartLine, CartState};
pub use catalog::{CategoryFilter, FilterState, SortKey, compute_visible};
pub use types::*;
