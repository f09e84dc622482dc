//! # stockroom-store: Record Store for Stockroom
//!
//! This crate owns the in-memory records: products, sales, and the settings
//! singleton. It applies the CRUD rules and the stock side effect of a sale.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Data Flow                              │
//! │                                                                         │
//! │  Gateway command (add_sale)                                            │
//! │       │  holds the StoreState write guard                              │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  stockroom-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ ProductTable  │    │   SaleTable   │    │   Settings   │  │   │
//! │  │   │ rows + ids    │◄───│ rows + ids    │    │  singleton   │  │   │
//! │  │   │               │ stock -= qty      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐                       │   │
//! │  │   │  IdSequence   │    │  BackupAgent  │  (external seam)      │   │
//! │  │   └───────────────┘    └───────────────┘                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is a plain owned value with no interior locking: `&self` reads
//! and `&mut self` writes. The bridge decides how to share it.
//!
//! ## Usage
//!
//! ```rust
//! use stockroom_core::NewSale;
//! use stockroom_store::RecordStore;
//!
//! let mut store = RecordStore::with_sample_data();
//! let sale = store.create_sale(NewSale {
//!     product_id: 1,
//!     quantity: 3,
//!     total_cents: 5997,
//!     date: "2023-04-01".into(),
//!     customer: "John Doe".into(),
//! });
//!
//! assert_eq!(sale.id, 4);
//! assert_eq!(store.product(1).map(|p| p.stock), Some(97));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backup;
pub mod repository;
pub mod seed;
pub mod sequence;

// =============================================================================
// Re-exports
// =============================================================================

pub use backup::{BackupAction, BackupAgent, BackupIntent, IntentLog};
pub use repository::product::ProductTable;
pub use repository::sale::SaleTable;
pub use sequence::IdSequence;

use tracing::{debug, info, warn};

use stockroom_core::{NewProduct, NewSale, Product, ProductId, Sale, Settings};

// =============================================================================
// Record Store
// =============================================================================

/// The single owner of all records.
///
/// Constructed once per process and injected into the gateway. Nothing else
/// mutates the tables.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    products: ProductTable,
    sales: SaleTable,
    settings: Settings,
}

impl RecordStore {
    /// Creates an empty store with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the sample products and sales the UI ships
    /// with during development.
    pub fn with_sample_data() -> Self {
        let store = RecordStore {
            products: ProductTable::from_rows(seed::sample_products()),
            sales: SaleTable::from_rows(seed::sample_sales()),
            settings: Settings::default(),
        };
        info!(
            products = store.products.len(),
            sales = store.sales.len(),
            "Record store seeded with sample data"
        );
        store
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Returns every product in insertion order.
    pub fn list_products(&self) -> Vec<Product> {
        self.products.list()
    }

    /// Looks up a single product.
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    /// Creates a product with the next id. Never fails.
    pub fn create_product(&mut self, fields: NewProduct) -> Product {
        let product = self.products.insert(fields);
        debug!(id = product.id, name = %product.name, "Product created");
        product
    }

    /// Replaces the product with the same id.
    ///
    /// ## Returns
    /// * `Some(Product)` - the stored replacement
    /// * `None` - no product has that id; nothing changed
    pub fn update_product(&mut self, product: Product) -> Option<Product> {
        let id = product.id;
        let updated = self.products.update(product);
        if updated.is_none() {
            debug!(id, "Update skipped, product not found");
        }
        updated
    }

    /// Removes the product with the given id. Returns whether one was removed.
    pub fn delete_product(&mut self, id: ProductId) -> bool {
        let removed = self.products.delete(id);
        debug!(id, removed, "Product delete");
        removed
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Returns every sale in insertion order.
    pub fn list_sales(&self) -> Vec<Sale> {
        self.sales.list()
    }

    /// Records a sale and takes its quantity out of the product's stock.
    ///
    /// ## Stock Side Effect
    /// ```text
    /// create_sale(product_id: 1, quantity: 3)
    ///      │
    ///      ├──► SaleTable.insert ──► Sale { id: next, .. }   (always)
    ///      │
    ///      └──► product 1 exists?
    ///             YES: stock -= 3    (no floor: may go negative,
    ///                                 saturates at the i64 bounds)
    ///             NO:  nothing       (sale is still recorded)
    /// ```
    pub fn create_sale(&mut self, fields: NewSale) -> Sale {
        let sale = self.sales.insert(fields);

        match self.products.take_stock(sale.product_id, sale.quantity) {
            Some(stock) => debug!(
                sale_id = sale.id,
                product_id = sale.product_id,
                stock,
                "Sale recorded, stock adjusted"
            ),
            None => warn!(
                sale_id = sale.id,
                product_id = sale.product_id,
                "Sale recorded for unknown product, stock unchanged"
            ),
        }

        sale
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Returns the current settings (defaults if never saved).
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replaces the settings wholesale and returns the stored value.
    pub fn save_settings(&mut self, settings: Settings) -> Settings {
        self.settings = settings;
        debug!(currency = %self.settings.currency, "Settings replaced");
        self.settings.clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
