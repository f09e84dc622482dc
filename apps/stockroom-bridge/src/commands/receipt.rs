//! Receipt command.
//!
//! The caller supplies the sale, the product and the settings fields, so the
//! calculation runs without touching the store.

use tracing::debug;

use stockroom_core::{ReceiptInput, ReceiptView};

use crate::error::BridgeResult;

pub fn calculate_receipt(input: &ReceiptInput) -> BridgeResult<ReceiptView> {
    debug!(sale_id = input.sale.id, "calculate_receipt command");
    Ok(stockroom_core::calculate_receipt(input)?)
}
