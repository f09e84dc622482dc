//! # Bridge Commands
//!
//! One function per bridge operation. The gateway routes each [`Request`]
//! here through [`dispatch`].
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (dispatch)
//! ├── product.rs    ◄─── getProducts, addProduct, updateProduct, deleteProduct
//! ├── sale.rs       ◄─── getSales, addSale
//! ├── settings.rs   ◄─── getSettings, saveSettings
//! ├── backup.rs     ◄─── backupData, restoreData
//! ├── receipt.rs    ◄─── calculateReceipt
//! └── dashboard.rs  ◄─── getDashboard
//! ```
//!
//! Commands add no business rules. They take the guard they need, call the
//! store, log, and hand the result back.

pub mod backup;
pub mod dashboard;
pub mod product;
pub mod receipt;
pub mod sale;
pub mod settings;

use stockroom_store::BackupAgent;

use crate::error::BridgeResult;
use crate::protocol::{Request, Response};
use crate::state::StoreState;

/// Runs one request to completion.
pub async fn dispatch(
    state: &StoreState,
    backup_agent: &dyn BackupAgent,
    request: Request,
) -> BridgeResult<Response> {
    let response = match request {
        Request::GetProducts => Response::GetProducts(product::get_products(state).await),
        Request::AddProduct(fields) => Response::AddProduct(product::add_product(state, fields).await),
        Request::UpdateProduct(p) => Response::UpdateProduct(product::update_product(state, p).await),
        Request::DeleteProduct(id) => Response::DeleteProduct(product::delete_product(state, id).await),
        Request::GetSales => Response::GetSales(sale::get_sales(state).await),
        Request::AddSale(fields) => Response::AddSale(sale::add_sale(state, fields).await),
        Request::GetSettings => Response::GetSettings(settings::get_settings(state).await),
        Request::SaveSettings(s) => Response::SaveSettings(settings::save_settings(state, s).await),
        Request::BackupData(location) => {
            Response::BackupData(backup::backup_data(backup_agent, &location))
        }
        Request::RestoreData(location) => {
            Response::RestoreData(backup::restore_data(backup_agent, &location))
        }
        Request::CalculateReceipt(input) => {
            Response::CalculateReceipt(receipt::calculate_receipt(&input)?)
        }
        Request::GetDashboard => Response::GetDashboard(dashboard::get_dashboard(state).await),
    };

    Ok(response)
}
