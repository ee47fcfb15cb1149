//! Cart state model: lines, mutations, and derived totals.
//!
//! `CartState` owns an ordered sequence of lines, keyed by product id.
//! Two invariants hold after every mutation:
//!
//! - at most one line exists per product id
//! - every line has `quantity >= 1` (a line whose quantity would reach zero
//!   is removed instead)
//!
//! All mutations are synchronous and total. Aggregates are recomputed on
//! every read rather than cached, so there is no invalidation to get wrong.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductId};

/// A product paired with a requested quantity.
///
/// The product fields are flattened in the serialized form, so a line
/// persists as `{ ...product fields, quantity }` - the same shape the
/// storefront drafts kept in browser storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Price of the whole line (`price * quantity`).
    #[must_use]
    pub fn line_price(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// The full ordered collection of cart lines.
///
/// Insertion order is preserved: the first-added product stays first unless
/// removed and re-added. The catalog view never mutates this directly; it
/// only triggers the operations below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line's quantity if a line with the same
    /// product id is already present, otherwise appends a new line with
    /// quantity 1.
    pub fn add(&mut self, product: Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                product,
                quantity: 1,
            });
        }
    }

    /// Remove the line with `id`, if present. No-op for an unknown id.
    pub fn remove(&mut self, id: ProductId) {
        self.lines.retain(|l| l.product.id != id);
    }

    /// Set the quantity of the line with `id` exactly (not incrementally).
    ///
    /// A quantity of zero removes the line; quantities below zero are
    /// unrepresentable. No-op for an unknown id.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(id);
        } else if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == id) {
            line.quantity = quantity;
        }
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The ordered cart lines.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == id)
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Total price across all lines, accumulated in decimal arithmetic.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_price).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i64, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price,
            category: "Electronics".to_owned(),
            rating: None,
            review_count: None,
            in_stock: true,
            image: None,
        }
    }

    /// The invariant every mutation must preserve.
    fn assert_invariant(cart: &CartState) {
        for (i, line) in cart.lines().iter().enumerate() {
            assert!(line.quantity >= 1, "zero-quantity line survived");
            assert!(
                cart.lines()
                    .iter()
                    .skip(i + 1)
                    .all(|other| other.product.id != line.product.id),
                "duplicate line for {}",
                line.product.id
            );
        }
    }

    #[test]
    fn test_add_twice_merges_into_one_line() {
        let mut cart = CartState::new();
        let p = product(1, Decimal::new(1000, 2));
        cart.add(p.clone());
        cart.add(p);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(ProductId::new(1)).unwrap().quantity, 2);
        assert_invariant(&cart);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = CartState::new();
        cart.add(product(1, Decimal::new(1000, 2)));
        cart.add(product(2, Decimal::new(2000, 2)));

        cart.remove(ProductId::new(1));
        let after_once = cart.clone();
        cart.remove(ProductId::new(1));

        assert_eq!(cart, after_once);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut cart = CartState::new();
        cart.add(product(1, Decimal::new(1000, 2)));
        cart.remove(ProductId::new(99));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_set_quantity_is_exact_not_incremental() {
        let mut cart = CartState::new();
        cart.add(product(1, Decimal::new(1000, 2)));
        cart.set_quantity(ProductId::new(1), 5);
        cart.set_quantity(ProductId::new(1), 3);
        assert_eq!(cart.line(ProductId::new(1)).unwrap().quantity, 3);
        assert_invariant(&cart);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = CartState::new();
        cart.add(product(1, Decimal::new(1000, 2)));
        cart.set_quantity(ProductId::new(1), 0);
        assert!(cart.is_empty());
        assert_invariant(&cart);
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut cart = CartState::new();
        cart.add(product(1, Decimal::new(1000, 2)));
        cart.set_quantity(ProductId::new(99), 4);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_clear_empties_unconditionally() {
        let mut cart = CartState::new();
        cart.add(product(1, Decimal::new(1000, 2)));
        cart.add(product(2, Decimal::new(2000, 2)));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = CartState::new();
        cart.add(product(3, Decimal::new(100, 2)));
        cart.add(product(1, Decimal::new(100, 2)));
        cart.add(product(2, Decimal::new(100, 2)));
        cart.add(product(1, Decimal::new(100, 2)));

        let ids: Vec<i64> = cart
            .lines()
            .iter()
            .map(|l| l.product.id.as_i64())
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_readd_after_remove_goes_to_the_back() {
        let mut cart = CartState::new();
        cart.add(product(1, Decimal::new(100, 2)));
        cart.add(product(2, Decimal::new(100, 2)));
        cart.remove(ProductId::new(1));
        cart.add(product(1, Decimal::new(100, 2)));

        let ids: Vec<i64> = cart
            .lines()
            .iter()
            .map(|l| l.product.id.as_i64())
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_totals_are_exact() {
        let mut cart = CartState::new();
        // [{price: 10, quantity: 2}, {price: 5.50, quantity: 3}]
        cart.add(product(1, Decimal::new(1000, 2)));
        cart.set_quantity(ProductId::new(1), 2);
        cart.add(product(2, Decimal::new(550, 2)));
        cart.set_quantity(ProductId::new(2), 3);

        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_price(), Decimal::new(3650, 2));
    }

    #[test]
    fn test_no_drift_across_a_thousand_increments() {
        // 0.10 summed 1000 times drifts under binary float arithmetic;
        // decimal accumulation must land on exactly 100.00.
        let mut cart = CartState::new();
        let p = product(1, Decimal::new(10, 2));
        for _ in 0..1000 {
            cart.add(p.clone());
        }

        assert_eq!(cart.total_items(), 1000);
        assert_eq!(cart.total_price(), Decimal::new(10000, 2));
        assert_invariant(&cart);
    }

    #[test]
    fn test_invariant_holds_across_mixed_sequences() {
        let mut cart = CartState::new();
        let ops: &[fn(&mut CartState)] = &[
            |c| c.add(product(1, Decimal::new(1000, 2))),
            |c| c.add(product(2, Decimal::new(550, 2))),
            |c| c.add(product(1, Decimal::new(1000, 2))),
            |c| c.set_quantity(ProductId::new(2), 7),
            |c| c.remove(ProductId::new(1)),
            |c| c.add(product(3, Decimal::new(25, 2))),
            |c| c.set_quantity(ProductId::new(3), 0),
            |c| c.add(product(1, Decimal::new(1000, 2))),
            |c| c.remove(ProductId::new(42)),
            |c| c.set_quantity(ProductId::new(1), 2),
        ];

        for op in ops {
            op(&mut cart);
            assert_invariant(&cart);
        }

        assert_eq!(cart.total_items(), 9);
    }

    #[test]
    fn test_serde_roundtrip_is_identity() {
        let mut cart = CartState::new();
        cart.add(product(1, Decimal::new(1499, 2)));
        cart.add(product(2, Decimal::new(550, 2)));
        cart.set_quantity(ProductId::new(2), 4);

        let json = serde_json::to_string(&cart).unwrap();
        let parsed: CartState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cart);
    }

    #[test]
    fn test_serialized_shape_flattens_product_fields() {
        let mut cart = CartState::new();
        cart.add(product(1, Decimal::new(1499, 2)));

        let json: serde_json::Value = serde_json::to_value(&cart).unwrap();
        let line = json.get(0).unwrap();
        assert!(line.get("id").is_some());
        assert!(line.get("name").is_some());
        assert!(line.get("price").is_some());
        assert_eq!(line.get("quantity").unwrap(), 1);
        assert!(line.get("product").is_none(), "lines must not be nested");
    }
}
