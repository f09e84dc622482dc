//! # Repository Module
//!
//! In-memory tables behind the [`RecordStore`](crate::RecordStore).
//!
//! ## Table Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Each table owns its rows and its IdSequence:                          │
//! │                                                                         │
//! │  ProductTable                        SaleTable                         │
//! │  ├── list(&self)                     ├── list(&self)                   │
//! │  ├── get(&self, id)                  └── insert(&mut self, new)        │
//! │  ├── insert(&mut self, new)                                            │
//! │  ├── update(&mut self, product)      Sales are append-only: no         │
//! │  ├── delete(&mut self, id)           update or delete exists.          │
//! │  └── take_stock(&mut self, id, quantity)                               │
//! │                                                                         │
//! │  Lookups are linear scans; rows stay in insertion order.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod product;
pub mod sale;
