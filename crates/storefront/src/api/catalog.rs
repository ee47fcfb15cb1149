//! Remote catalog client and boundary normalization.
//!
//! The catalog collaborator returns rows whose field names drifted across
//! drafts: the display field is `name` in one source and `title` in another,
//! and the rating is either a bare number or a nested `{rate, count}`
//! object. All of that is mapped to the canonical [`Product`] here; rows
//! that cannot be mapped are skipped with a warning rather than failing the
//! whole fetch.

use std::time::Duration;

use moka::future::Cache;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use shopsmart_core::{Product, ProductId};

use super::ApiError;

/// How long a fetched catalog stays fresh.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Client for the remote catalog collaborator.
///
/// Fetches are cached for five minutes; products are immutable once loaded,
/// so a stale list is only ever stale, never inconsistent.
#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    url: Option<Url>,
    cache: Cache<String, Vec<Product>>,
}

impl CatalogClient {
    /// Create a catalog client. With `url == None`, [`Self::fetch_products`]
    /// serves the built-in sample catalog.
    #[must_use]
    pub fn new(client: reqwest::Client, url: Option<Url>) -> Self {
        let cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(CACHE_TTL)
            .build();

        Self { client, url, cache }
    }

    /// Fetch the product list, from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the remote source is configured and the
    /// request or body parse fails. The built-in sample catalog never fails.
    pub async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        let Some(url) = &self.url else {
            return Ok(sample_products());
        };

        let key = url.to_string();
        if let Some(products) = self.cache.get(&key).await {
            debug!(count = products.len(), "Catalog served from cache");
            return Ok(products);
        }

        let products = self.fetch_remote(url).await?;
        self.cache.insert(key, products.clone()).await;
        Ok(products)
    }

    async fn fetch_remote(&self, url: &Url) -> Result<Vec<Product>, ApiError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let rows: Vec<ProductRow> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        let products: Vec<Product> = rows.into_iter().filter_map(convert_row).collect();
        debug!(count = products.len(), "Fetched catalog");
        Ok(products)
    }
}

// =============================================================================
// Wire Types
// =============================================================================

/// A catalog row as the collaborator sends it.
#[derive(Debug, Deserialize)]
struct ProductRow {
    id: i64,
    /// Display field in the static-list drafts.
    name: Option<String>,
    /// Display field in the remote-fetch drafts.
    title: Option<String>,
    price: f64,
    category: Option<String>,
    image: Option<String>,
    rating: Option<RatingRow>,
    #[serde(default)]
    review_count: Option<u64>,
    in_stock: Option<bool>,
}

/// Rating shapes observed across sources.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RatingRow {
    /// Bare average, e.g. `4.5`.
    Value(f64),
    /// Nested object, e.g. `{"rate": 4.5, "count": 120}`.
    Detailed { rate: f64, count: u64 },
}

/// Map a wire row to the canonical product, or skip it.
fn convert_row(row: ProductRow) -> Option<Product> {
    // Accept either display field; a row with neither is unusable.
    let name = match (row.name, row.title) {
        (Some(name), _) | (None, Some(name)) => name,
        (None, None) => {
            warn!(id = row.id, "Catalog row has neither name nor title, skipping");
            return None;
        }
    };

    let Some(price) = Decimal::from_f64(row.price).filter(|p| !p.is_sign_negative()) else {
        warn!(id = row.id, price = row.price, "Catalog row has an unusable price, skipping");
        return None;
    };

    let (rating, review_count) = match row.rating {
        Some(RatingRow::Value(value)) => (Some(value), row.review_count),
        Some(RatingRow::Detailed { rate, count }) => (Some(rate), Some(count)),
        None => (None, row.review_count),
    };

    Some(Product {
        id: ProductId::new(row.id),
        name,
        price,
        category: row.category.unwrap_or_else(|| "Uncategorized".to_owned()),
        rating,
        review_count,
        in_stock: row.in_stock.unwrap_or(true),
        image: row.image,
    })
}

// =============================================================================
// Sample Catalog
// =============================================================================

/// The static product list, used when no remote catalog is configured.
#[must_use]
pub fn sample_products() -> Vec<Product> {
    let rows = [
        (1, "Wireless Headphones", 1499, "Electronics", "/images/headphone.png"),
        (2, "Smart Watch", 1999, "Electronics", "/images/watch.png"),
        (3, "Running Shoes", 899, "Sports", "/images/shoes.png"),
        (4, "Backpack", 599, "Fashion", "/images/bag.png"),
        (5, "Men's Jacket", 1299, "Fashion", "/images/jacket.png"),
    ];

    rows.into_iter()
        .map(|(id, name, price, category, image)| Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Decimal::from(price),
            category: category.to_owned(),
            rating: None,
            review_count: None,
            in_stock: true,
            image: Some(image.to_owned()),
        })
        .collect()
}
