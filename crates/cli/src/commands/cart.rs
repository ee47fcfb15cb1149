//! `cart` command: show or mutate the persisted cart.

use clap::Subcommand;

use shopsmart_core::{CartState, ProductId};
use shopsmart_storefront::AppState;
use shopsmart_storefront::error::{AppError, Result};

/// Cart subcommands.
#[derive(Subcommand)]
pub enum CartAction {
    /// Print the cart lines and totals
    Show,
    /// Add one unit of a product by id
    Add {
        /// Product id from the catalog
        id: i64,
    },
    /// Remove a line by product id
    Remove {
        /// Product id of the line
        id: i64,
    },
    /// Set a line's quantity exactly (0 removes it)
    Set {
        /// Product id of the line
        id: i64,
        /// New quantity
        quantity: u32,
    },
    /// Empty the cart
    Clear,
}

/// Run one cart action against the persisted store.
pub async fn run(state: &AppState, action: CartAction) -> Result<()> {
    let mut cart = state.open_cart();

    match action {
        CartAction::Show => {}
        CartAction::Add { id } => {
            let id = ProductId::new(id);
            let products = state.catalog().fetch_products().await?;
            let product = products
                .into_iter()
                .find(|p| p.id == id)
                .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
            cart.add(product)?;
        }
        CartAction::Remove { id } => cart.remove(ProductId::new(id)),
        CartAction::Set { id, quantity } => cart.set_quantity(ProductId::new(id), quantity),
        CartAction::Clear => cart.clear(),
    }

    print_cart(cart.state());
    Ok(())
}

fn print_cart(cart: &CartState) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for line in cart.lines() {
        println!(
            "{:>4}  {:<24} {:>10} x {:<3} = {:>10}",
            line.product.id,
            line.product.name,
            line.product.price,
            line.quantity,
            line.line_price()
        );
    }
    println!(
        "Total: {} items, {}",
        cart.total_items(),
        cart.total_price()
    );
}
