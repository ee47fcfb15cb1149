//! Command implementations.

pub mod cart;
pub mod chat;
pub mod login;
pub mod products;
