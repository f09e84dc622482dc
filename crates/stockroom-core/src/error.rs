//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Receipt and domain failures                    │
//! │  └── ValidationError  - Unknown currency or backup frequency           │
//! │                                                                         │
//! │  stockroom-bridge errors (app)                                         │
//! │  ├── BridgeError      - Transport rejection, bad requests              │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → BridgeError → ApiError → UI       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The record store itself never fails: a missing record is reported as
//! `None`/`false`, not as an error.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The sale date could not be split into a date and a time.
    ///
    /// ## When This Occurs
    /// - A receipt is requested for a sale whose `date` is not
    ///   `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` or RFC 3339
    #[error("Sale {sale_id} has an unreadable date: '{date}'")]
    InvalidSaleDate { sale_id: u32, date: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Value validation errors.
///
/// The store accepts any well-typed payload, so these only surface where a
/// string has to be interpreted (currency codes, backup frequencies).
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
