//! # Product Commands
//!
//! ```text
//! getProducts    ──► read guard  ──► list_products()
//! addProduct     ──► write guard ──► create_product()   (never fails)
//! updateProduct  ──► write guard ──► update_product()   (null if missing)
//! deleteProduct  ──► write guard ──► delete_product()   (false if missing)
//! ```

use tracing::{debug, info};

use stockroom_core::{NewProduct, Product, ProductId};

use crate::state::StoreState;

pub async fn get_products(state: &StoreState) -> Vec<Product> {
    debug!("get_products command");
    state.read().await.list_products()
}

/// Creates a product. The store assigns the id.
pub async fn add_product(state: &StoreState, fields: NewProduct) -> Product {
    debug!(name = %fields.name, "add_product command");
    let product = state.write().await.create_product(fields);
    info!(id = product.id, name = %product.name, "Product added");
    product
}

/// Replaces a product by id.
///
/// ## Returns
/// The stored product, or `None` when the id is unknown. A missing product
/// is a normal outcome the UI renders, not an error.
pub async fn update_product(state: &StoreState, product: Product) -> Option<Product> {
    let id = product.id;
    debug!(id, "update_product command");
    let updated = state.write().await.update_product(product);
    match &updated {
        Some(p) => info!(id, name = %p.name, "Product updated"),
        None => debug!(id, "update_product: no such product"),
    }
    updated
}

pub async fn delete_product(state: &StoreState, id: ProductId) -> bool {
    debug!(id, "delete_product command");
    let removed = state.write().await.delete_product(id);
    if removed {
        info!(id, "Product deleted");
    }
    removed
}
