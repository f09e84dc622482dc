//! # stockroom-core: Pure Domain Logic for Stockroom
//!
//! This crate is the **heart** of Stockroom. It contains the domain types and
//! every calculation as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI Process (excluded)                        │   │
//! │  │    Products ──► Sales ──► Receipt ──► Settings ──► Dashboard    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON lines over stdio                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    stockroom-bridge (Gateway)                   │   │
//! │  │    getProducts, addSale, saveSettings, calculateReceipt, ...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockroom-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  receipt  │  │  metrics  │  │   │
//! │  │   │  Product  │  │   Money   │  │ ReceiptVw │  │ Dashboard │  │   │
//! │  │   │   Sale    │  │  TaxRate  │  │ calculate │  │ StockLevel│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORE ACCESS • NO NETWORK • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockroom-store (Record Store)                  │   │
//! │  │          Product table, Sale table, Settings singleton          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, Settings, Currency)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`receipt`] - Receipt view model calculation
//! - [`metrics`] - Dashboard and stock level metrics
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::money::Money;
//! use stockroom_core::types::TaxRate;
//!
//! let subtotal = Money::from_cents(5997); // $59.97
//! let rate = TaxRate::from_bps(1000);     // 10%
//!
//! assert_eq!(subtotal.calculate_tax(rate).cents(), 600);
//! assert_eq!(subtotal.with_tax(rate).cents(), 6597);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod metrics;
pub mod money;
pub mod receipt;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use metrics::{DashboardSummary, MonthlySales, StockLevel, StockLevelCounts};
pub use money::Money;
pub use receipt::{calculate_receipt, ReceiptInput, ReceiptLine, ReceiptView};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Products with stock strictly below this are listed as low stock on the
/// dashboard.
pub const LOW_STOCK_THRESHOLD: i64 = 20;
