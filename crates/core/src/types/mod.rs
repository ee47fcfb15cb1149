//! Core domain types for ShopSmart.

pub mod email;
pub mod id;
pub mod product;

pub use email::{Email, EmailError};
pub use id::ProductId;
pub use product::Product;
