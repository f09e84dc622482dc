//! # Bridge Protocol
//!
//! The fixed set of named operations the UI can invoke, and their results.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Bridge Operations                                  │
//! │                                                                         │
//! │  PRODUCTS                                                              │
//! │  ────────                                                              │
//! │  getProducts      ─                ───► Product[]                      │
//! │  addProduct       NewProduct       ───► Product                        │
//! │  updateProduct    Product          ───► Product | null                 │
//! │  deleteProduct    id               ───► bool                           │
//! │                                                                         │
//! │  SALES                                                                 │
//! │  ─────                                                                 │
//! │  getSales         ─                ───► Sale[]                         │
//! │  addSale          NewSale          ───► Sale     (stock -= quantity)   │
//! │                                                                         │
//! │  SETTINGS & BACKUP                                                     │
//! │  ─────────────────                                                     │
//! │  getSettings      ─                ───► Settings                       │
//! │  saveSettings     Settings         ───► Settings                       │
//! │  backupData       location         ───► { success, message }           │
//! │  restoreData      location         ───► { success, message }           │
//! │                                                                         │
//! │  VIEWS                                                                 │
//! │  ─────                                                                 │
//! │  calculateReceipt ReceiptInput     ───► ReceiptView                    │
//! │  getDashboard     ─                ───► DashboardSummary               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Adjacently tagged JSON:
//! ```json
//! { "op": "deleteProduct", "payload": 2 }
//! { "op": "getProducts" }
//! ```
//! A response carries the same `op` as its request.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use stockroom_core::{
    BackupOutcome, DashboardSummary, NewProduct, NewSale, Product, ProductId, ReceiptInput,
    ReceiptView, Sale, Settings,
};

/// A call into the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "op", content = "payload", rename_all = "camelCase")]
pub enum Request {
    GetProducts,
    AddProduct(NewProduct),
    UpdateProduct(Product),
    DeleteProduct(ProductId),
    GetSales,
    AddSale(NewSale),
    GetSettings,
    SaveSettings(Settings),
    BackupData(String),
    RestoreData(String),
    CalculateReceipt(ReceiptInput),
    GetDashboard,
}

impl Request {
    /// The operation name as it appears on the wire.
    pub fn op(&self) -> &'static str {
        match self {
            Request::GetProducts => "getProducts",
            Request::AddProduct(_) => "addProduct",
            Request::UpdateProduct(_) => "updateProduct",
            Request::DeleteProduct(_) => "deleteProduct",
            Request::GetSales => "getSales",
            Request::AddSale(_) => "addSale",
            Request::GetSettings => "getSettings",
            Request::SaveSettings(_) => "saveSettings",
            Request::BackupData(_) => "backupData",
            Request::RestoreData(_) => "restoreData",
            Request::CalculateReceipt(_) => "calculateReceipt",
            Request::GetDashboard => "getDashboard",
        }
    }

    /// Returns true for operations that take the store's write guard.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Request::AddProduct(_)
                | Request::UpdateProduct(_)
                | Request::DeleteProduct(_)
                | Request::AddSale(_)
                | Request::SaveSettings(_)
        )
    }
}

/// The result of a [`Request`], tagged with the same operation name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "op", content = "payload", rename_all = "camelCase")]
pub enum Response {
    GetProducts(Vec<Product>),
    AddProduct(Product),
    /// `None` when no product had the id.
    UpdateProduct(Option<Product>),
    /// `false` when no product had the id.
    DeleteProduct(bool),
    GetSales(Vec<Sale>),
    AddSale(Sale),
    GetSettings(Settings),
    SaveSettings(Settings),
    BackupData(BackupOutcome),
    RestoreData(BackupOutcome),
    CalculateReceipt(ReceiptView),
    GetDashboard(DashboardSummary),
}

impl Response {
    pub fn op(&self) -> &'static str {
        match self {
            Response::GetProducts(_) => "getProducts",
            Response::AddProduct(_) => "addProduct",
            Response::UpdateProduct(_) => "updateProduct",
            Response::DeleteProduct(_) => "deleteProduct",
            Response::GetSales(_) => "getSales",
            Response::AddSale(_) => "addSale",
            Response::GetSettings(_) => "getSettings",
            Response::SaveSettings(_) => "saveSettings",
            Response::BackupData(_) => "backupData",
            Response::RestoreData(_) => "restoreData",
            Response::CalculateReceipt(_) => "calculateReceipt",
            Response::GetDashboard(_) => "getDashboard",
        }
    }

    /// The result value alone, without the `op` tag.
    pub fn into_payload(self) -> serde_json::Result<Value> {
        let mut tagged = serde_json::to_value(self)?;
        Ok(tagged
            .get_mut("payload")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unit_request_without_payload() {
        let request: Request = serde_json::from_value(json!({ "op": "getProducts" })).unwrap();
        assert_eq!(request, Request::GetProducts);
        assert_eq!(request.op(), "getProducts");
        assert!(!request.is_mutation());
    }

    #[test]
    fn test_add_sale_request_shape() {
        let request: Request = serde_json::from_value(json!({
            "op": "addSale",
            "payload": {
                "productId": 1,
                "quantity": 3,
                "total": 59.97,
                "date": "2023-04-01",
                "customer": "John Doe"
            }
        }))
        .unwrap();

        match request {
            Request::AddSale(ref sale) => {
                assert_eq!(sale.product_id, 1);
                assert_eq!(sale.total_cents, 5997);
            }
            ref other => panic!("Expected addSale, got {}", other.op()),
        }
        assert!(request.is_mutation());
    }

    #[test]
    fn test_scalar_payloads() {
        let request: Request =
            serde_json::from_value(json!({ "op": "deleteProduct", "payload": 2 })).unwrap();
        assert_eq!(request, Request::DeleteProduct(2));

        let request: Request =
            serde_json::from_value(json!({ "op": "backupData", "payload": "/mnt/backups" })).unwrap();
        assert_eq!(request, Request::BackupData("/mnt/backups".into()));
    }

    #[test]
    fn test_unknown_op_rejected() {
        let result: Result<Request, _> = serde_json::from_value(json!({ "op": "dropTables" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_payload_shape_rejected() {
        let result: Result<Request, _> =
            serde_json::from_value(json!({ "op": "deleteProduct", "payload": "two" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_response_tag_matches_request() {
        let json = serde_json::to_value(Response::DeleteProduct(false)).unwrap();
        assert_eq!(json, json!({ "op": "deleteProduct", "payload": false }));
    }

    #[test]
    fn test_update_not_found_payload_is_null() {
        let payload = Response::UpdateProduct(None).into_payload().unwrap();
        assert_eq!(payload, Value::Null);
    }
}
