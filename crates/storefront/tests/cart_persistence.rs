//! End-to-end persistence tests over the file-backed store.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::Arc;

use rust_decimal::Decimal;

use shopsmart_core::{Product, ProductId};
use shopsmart_storefront::cart_store::{CartPolicy, CartStore};
use shopsmart_storefront::storage::{CART_KEY, JsonFileStore, KvStore};

fn scratch_path() -> PathBuf {
    std::env::temp_dir().join(format!("shopsmart-cart-{}.json", uuid::Uuid::new_v4()))
}

fn product(id: i64, cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        price: Decimal::new(cents, 2),
        category: "Electronics".to_owned(),
        rating: None,
        review_count: None,
        in_stock: true,
        image: None,
    }
}

#[test]
fn cart_survives_a_restart() {
    let path = scratch_path();

    {
        let storage = Arc::new(JsonFileStore::new(&path));
        let mut cart = CartStore::open(storage, CartPolicy::default());
        cart.add(product(1, 1000)).unwrap();
        cart.add(product(1, 1000)).unwrap();
        cart.add(product(2, 550)).unwrap();
        cart.set_quantity(ProductId::new(2), 3);
    }

    // A fresh store over the same file restores the exact state.
    let storage = Arc::new(JsonFileStore::new(&path));
    let cart = CartStore::open(storage, CartPolicy::default());

    assert_eq!(cart.state().total_items(), 5);
    assert_eq!(cart.state().total_price(), Decimal::new(3650, 2));
    let ids: Vec<i64> = cart
        .state()
        .lines()
        .iter()
        .map(|l| l.product.id.as_i64())
        .collect();
    assert_eq!(ids, vec![1, 2]);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn corrupt_file_starts_an_empty_cart() {
    let path = scratch_path();
    std::fs::write(&path, "<<<not json>>>").unwrap();

    let storage = Arc::new(JsonFileStore::new(&path));
    let cart = CartStore::open(storage, CartPolicy::default());
    assert!(cart.state().is_empty());

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn corrupt_cart_slot_starts_an_empty_cart_and_recovers_on_write() {
    let path = scratch_path();

    // Well-formed store file, garbage in the cart slot itself.
    let storage = Arc::new(JsonFileStore::new(&path));
    storage.set(CART_KEY, "{broken").unwrap();
    storage.set("token", "still-valid").unwrap();

    let mut cart = CartStore::open(storage.clone(), CartPolicy::default());
    assert!(cart.state().is_empty());

    // The next mutation rewrites the slot; unrelated slots are untouched.
    cart.add(product(7, 899)).unwrap();
    let reopened = CartStore::open(storage.clone(), CartPolicy::default());
    assert_eq!(reopened.state().total_items(), 1);
    assert_eq!(storage.get("token").unwrap().as_deref(), Some("still-valid"));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn persisted_lines_flatten_product_fields() {
    let path = scratch_path();
    let storage = Arc::new(JsonFileStore::new(&path));

    let mut cart = CartStore::open(storage.clone(), CartPolicy::default());
    cart.add(product(3, 899)).unwrap();

    let raw = storage.get(CART_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let line = value.get(0).unwrap();
    assert_eq!(line.get("id").unwrap(), 3);
    assert_eq!(line.get("name").unwrap(), "Product 3");
    assert_eq!(line.get("quantity").unwrap(), 1);

    std::fs::remove_file(&path).unwrap();
}
