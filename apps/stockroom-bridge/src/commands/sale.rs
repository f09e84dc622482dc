//! # Sale Commands
//!
//! ## Add Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  invoke addSale { productId: 1, quantity: 3, total: 59.97, ... }       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  take write guard  (no other read or write in between)                 │
//! │       │                                                                 │
//! │       ├──► sale appended with the next id                              │
//! │       └──► product 1 stock -= 3   (if product 1 exists)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  release guard, reply with the Sale                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The total is the caller's number. It is not checked against
//! price × quantity.

use tracing::{debug, info};

use stockroom_core::{NewSale, Sale};

use crate::state::StoreState;

pub async fn get_sales(state: &StoreState) -> Vec<Sale> {
    debug!("get_sales command");
    state.read().await.list_sales()
}

pub async fn add_sale(state: &StoreState, fields: NewSale) -> Sale {
    debug!(
        product_id = fields.product_id,
        quantity = fields.quantity,
        "add_sale command"
    );
    let sale = state.write().await.create_sale(fields);
    info!(
        id = sale.id,
        product_id = sale.product_id,
        total = %sale.total(),
        "Sale recorded"
    );
    sale
}
