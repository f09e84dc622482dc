//! # State Module
//!
//! Shared state the gateway hands to every command.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  Gateway ── clone per call ──► StoreState                              │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                    Arc<tokio::sync::RwLock<RecordStore>>               │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • reads (getProducts, getSales, getSettings, getDashboard)            │
//! │    share the read guard and run concurrently                           │
//! │  • writes (add/update/delete, addSale, saveSettings) take the          │
//! │    write guard: one at a time, never alongside a read                  │
//! │  • the backup agent and the receipt calculator need no store access    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod store;

pub use store::StoreState;
