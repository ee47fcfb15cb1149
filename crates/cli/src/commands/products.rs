//! `products` command: the catalog view.

use rust_decimal::Decimal;

use shopsmart_core::{CategoryFilter, FilterState, SortKey, compute_visible};
use shopsmart_storefront::AppState;
use shopsmart_storefront::error::Result;

/// Fetch the catalog and print the filtered, sorted view.
pub async fn list(
    state: &AppState,
    search: Option<String>,
    category: Option<String>,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
    sort: SortKey,
) -> Result<()> {
    let products = state.catalog().fetch_products().await?;

    let filter = FilterState {
        search_text: search.unwrap_or_default(),
        category: category.map_or(CategoryFilter::All, CategoryFilter::Named),
        price_min: min_price.unwrap_or(Decimal::ZERO),
        price_max: max_price.unwrap_or(Decimal::MAX),
        sort_key: sort,
    };

    let visible = compute_visible(&products, &filter);
    if visible.is_empty() {
        println!("No products match your filters.");
        return Ok(());
    }

    for product in &visible {
        let stock = if product.in_stock { "" } else { "  [out of stock]" };
        let rating = product
            .rating
            .map(|r| format!("  {r:.1}*"))
            .unwrap_or_default();
        println!(
            "{:>4}  {:<24} {:>10}  {}{rating}{stock}",
            product.id, product.name, product.price, product.category
        );
    }

    Ok(())
}
