//! # Store State
//!
//! Wraps the `RecordStore` so concurrently running commands can share it.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn get_products(state: &StoreState) -> Vec<Product> {
//!     state.read().await.list_products()
//! }
//! ```

use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use stockroom_store::RecordStore;

/// Cloneable handle to the single record store.
///
/// A guard is held for the whole store operation, so a write such as
/// `create_sale` (insert + stock adjustment) is never observed half done.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    store: Arc<RwLock<RecordStore>>,
}

impl StoreState {
    pub fn new(store: RecordStore) -> Self {
        StoreState {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Shared access. Waits while a write is in progress.
    pub async fn read(&self) -> RwLockReadGuard<'_, RecordStore> {
        self.store.read().await
    }

    /// Exclusive access.
    pub async fn write(&self) -> RwLockWriteGuard<'_, RecordStore> {
        self.store.write().await
    }
}
