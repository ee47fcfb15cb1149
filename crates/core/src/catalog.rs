//! Catalog view: filtering and sorting of the product list.
//!
//! [`compute_visible`] is a pure function from `(products, filter)` to the
//! ordered subset to display. It has no side effects and is cheap enough to
//! recompute on every filter change; callers may memoize it freely.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Product;

/// Category predicate: everything, or one category matched exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Match every category.
    #[default]
    All,
    /// Match one category, case-sensitively.
    Named(String),
}

impl CategoryFilter {
    fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }
}

/// Sort order applied to the visible products.
///
/// All sorts are stable: ties keep the source order, so re-renders of the
/// same filter state are deterministic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Preserve the catalog's own order.
    #[default]
    Featured,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Best-rated first; products without a rating sort last.
    RatingDesc,
}

/// The user-chosen predicates and sort key for the catalog view.
///
/// Purely a view-side projection; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Case-insensitive substring matched against product names.
    pub search_text: String,
    /// Category predicate.
    pub category: CategoryFilter,
    /// Inclusive lower price bound.
    pub price_min: Decimal,
    /// Inclusive upper price bound.
    pub price_max: Decimal,
    /// Ordering of the visible set.
    pub sort_key: SortKey,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            category: CategoryFilter::All,
            price_min: Decimal::ZERO,
            price_max: Decimal::MAX,
            sort_key: SortKey::Featured,
        }
    }
}

impl FilterState {
    /// Whether `product` passes all three predicates.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product) && self.matches_category(product) && self.matches_price(product)
    }

    /// Case-insensitive name containment; empty search text always matches.
    #[must_use]
    pub fn matches_search(&self, product: &Product) -> bool {
        self.search_text.is_empty()
            || product
                .name
                .to_lowercase()
                .contains(&self.search_text.to_lowercase())
    }

    /// Category equality, or everything under [`CategoryFilter::All`].
    #[must_use]
    pub fn matches_category(&self, product: &Product) -> bool {
        self.category.matches(&product.category)
    }

    /// Inclusive price bounds.
    #[must_use]
    pub fn matches_price(&self, product: &Product) -> bool {
        self.price_min <= product.price && product.price <= self.price_max
    }
}

/// Compute the ordered subset of `products` to display for `filter`.
///
/// A product is included iff the search, category, and price predicates all
/// hold. Sorting is stable per [`SortKey`]; a missing rating sorts as the
/// lowest possible value.
#[must_use]
pub fn compute_visible(products: &[Product], filter: &FilterState) -> Vec<Product> {
    let mut visible: Vec<Product> = products
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect();

    match filter.sort_key {
        SortKey::Featured => {}
        SortKey::PriceAsc => visible.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => visible.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::RatingDesc => {
            visible.sort_by(|a, b| rating_key(b).partial_cmp(&rating_key(a)).unwrap_or(Ordering::Equal));
        }
    }

    visible
}

fn rating_key(product: &Product) -> f64 {
    product.rating.unwrap_or(f64::NEG_INFINITY)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn product(id: i64, name: &str, category: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Decimal::from(price),
            category: category.to_owned(),
            rating: None,
            review_count: None,
            in_stock: true,
            image: None,
        }
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_filter_composition() {
        let products = vec![
            product(1, "Shoes", "Sports", 50),
            product(2, "Shirt", "Fashion", 20),
        ];
        let filter = FilterState {
            search_text: "sh".to_owned(),
            category: CategoryFilter::All,
            price_min: Decimal::ZERO,
            price_max: Decimal::from(30),
            ..FilterState::default()
        };

        // Both names match "sh" case-insensitively, but 50 is over budget.
        assert_eq!(names(&compute_visible(&products, &filter)), vec!["Shirt"]);
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let products = vec![
            product(1, "Shoes", "Sports", 50),
            product(2, "Watch", "Electronics", 20),
        ];
        let filter = FilterState::default();
        assert_eq!(compute_visible(&products, &filter).len(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let products = vec![product(1, "Wireless Headphones", "Electronics", 99)];
        let filter = FilterState {
            search_text: "HEADph".to_owned(),
            ..FilterState::default()
        };
        assert_eq!(compute_visible(&products, &filter).len(), 1);
    }

    #[test]
    fn test_category_match_is_case_sensitive() {
        let products = vec![product(1, "Shoes", "Sports", 50)];
        let lower = FilterState {
            category: CategoryFilter::Named("sports".to_owned()),
            ..FilterState::default()
        };
        let exact = FilterState {
            category: CategoryFilter::Named("Sports".to_owned()),
            ..FilterState::default()
        };

        assert!(compute_visible(&products, &lower).is_empty());
        assert_eq!(compute_visible(&products, &exact).len(), 1);
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let products = vec![product(1, "Backpack", "Fashion", 30)];
        let filter = FilterState {
            price_min: Decimal::from(30),
            price_max: Decimal::from(30),
            ..FilterState::default()
        };
        assert_eq!(compute_visible(&products, &filter).len(), 1);
    }

    #[test]
    fn test_featured_preserves_source_order() {
        let products = vec![
            product(2, "B", "Sports", 20),
            product(1, "A", "Sports", 10),
            product(3, "C", "Sports", 30),
        ];
        let filter = FilterState::default();
        assert_eq!(names(&compute_visible(&products, &filter)), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_price_sort_is_stable_on_ties() {
        let products = vec![
            product(1, "A", "Sports", 10),
            product(2, "B", "Sports", 10),
            product(3, "C", "Sports", 5),
        ];
        let filter = FilterState {
            sort_key: SortKey::PriceAsc,
            ..FilterState::default()
        };

        // C sorts first; A and B tie at 10 and keep their original order.
        assert_eq!(names(&compute_visible(&products, &filter)), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_price_desc() {
        let products = vec![
            product(1, "A", "Sports", 10),
            product(2, "B", "Sports", 30),
            product(3, "C", "Sports", 20),
        ];
        let filter = FilterState {
            sort_key: SortKey::PriceDesc,
            ..FilterState::default()
        };
        assert_eq!(names(&compute_visible(&products, &filter)), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_missing_rating_sorts_last() {
        let mut rated = product(1, "Rated", "Sports", 10);
        rated.rating = Some(3.0);
        let unrated = product(2, "Unrated", "Sports", 10);
        let mut top = product(3, "Top", "Sports", 10);
        top.rating = Some(4.8);

        let products = vec![unrated, rated, top];
        let filter = FilterState {
            sort_key: SortKey::RatingDesc,
            ..FilterState::default()
        };

        assert_eq!(
            names(&compute_visible(&products, &filter)),
            vec!["Top", "Rated", "Unrated"]
        );
    }

    #[test]
    fn test_sort_key_serde_is_kebab_case() {
        assert_eq!(
            serde_json::to_string(&SortKey::PriceAsc).unwrap(),
            "\"price-asc\""
        );
        let parsed: SortKey = serde_json::from_str("\"rating-desc\"").unwrap();
        assert_eq!(parsed, SortKey::RatingDesc);
    }

    #[test]
    fn test_compute_visible_does_not_mutate_input() {
        let products = vec![
            product(1, "A", "Sports", 30),
            product(2, "B", "Sports", 10),
        ];
        let filter = FilterState {
            sort_key: SortKey::PriceAsc,
            ..FilterState::default()
        };
        let first = compute_visible(&products, &filter);
        let second = compute_visible(&products, &filter);

        assert_eq!(first, second);
        assert_eq!(products.first().unwrap().name, "A");
    }
}
