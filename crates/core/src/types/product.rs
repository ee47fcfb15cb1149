//! Product domain type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

/// A catalog entry.
///
/// Products are created by the catalog data source (a static list or a remote
/// fetch) and never mutated by the core. Prices are currency-agnostic
/// decimals so cart totals accumulate without binary float drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product id, stable across a session.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Non-negative price in the catalog's currency.
    pub price: Decimal,
    /// Category label from an open string set.
    pub category: String,
    /// Average rating, when the source provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Number of reviews behind the rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u64>,
    /// Whether the product can currently be added to a cart.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Opaque image reference (URL or path), not interpreted by the core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Persisted carts from older drafts carry no stock flag; treat them as
/// addable rather than discarding the line.
const fn default_in_stock() -> bool {
    true
}
