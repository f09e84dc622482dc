//! # Bridge Error Types
//!
//! `BridgeError` is what Rust callers of the gateway see. `ApiError` is what
//! the UI receives over the wire.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Bridge                             │
//! │                                                                         │
//! │  UI                          Bridge                                     │
//! │  ──                          ──────                                     │
//! │                                                                         │
//! │  {"id":7,"op":"calculateReceipt",...}                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Malformed JSON / unknown op? ── BridgeError::InvalidRequest ──┐ │  │
//! │  │         │                                                      │ │  │
//! │  │         ▼                                                      │ │  │
//! │  │  Gateway gone? ───────────────── BridgeError::TransportRejected┤ │  │
//! │  │         │                                                      │ │  │
//! │  │         ▼                                                      ▼ │  │
//! │  │  Unreadable sale date? ───────── BridgeError::Receipt ─── ApiError│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ─────────────────────────────────────────────────────► ok│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  {"id":7,"error":{"code":"VALIDATION_ERROR","message":"..."}}          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Missing records are not errors: `updateProduct` answers `null` and
//! `deleteProduct` answers `false`.

use serde::Serialize;
use stockroom_core::CoreError;
use thiserror::Error;

/// Result type alias for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Everything that can go wrong between a caller and the record store.
#[derive(Debug, Error)]
pub enum BridgeError {
    // =========================================================================
    // Transport
    // =========================================================================
    /// The gateway did not accept or did not answer the call. Carries a
    /// diagnostic naming the operation. Never retried.
    #[error("Call rejected by transport: {0}")]
    TransportRejected(String),

    /// The request did not match any operation or its payload shape.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The gateway answered with a response for a different operation.
    #[error("Unexpected response: expected {expected}, got {actual}")]
    UnexpectedResponse {
        expected: &'static str,
        actual: &'static str,
    },

    // =========================================================================
    // Domain
    // =========================================================================
    /// Receipt calculation failed.
    #[error(transparent)]
    Receipt(#[from] CoreError),

    // =========================================================================
    // Configuration
    // =========================================================================
    /// Config file is not valid TOML for `BridgeConfig`.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config values parsed but are not usable.
    #[error("Invalid bridge configuration: {0}")]
    ConfigInvalid(String),

    // =========================================================================
    // I/O
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BridgeError {
    /// Returns true for errors caused by the caller's input.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, BridgeError::InvalidRequest(_) | BridgeError::Receipt(_))
    }
}

// =============================================================================
// Wire Error
// =============================================================================

/// Error body sent to the UI.
///
/// ## Serialization
/// ```json
/// {
///   "code": "TRANSPORT_REJECTED",
///   "message": "addSale: gateway is not running"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request line or payload could not be read
    InvalidRequest,

    /// Input was well-formed but its content is unusable
    ValidationError,

    /// The gateway is not accepting calls
    TransportRejected,

    /// Configuration could not be loaded
    ConfigError,

    /// Anything else
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<BridgeError> for ApiError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::TransportRejected(diagnostic) => {
                ApiError::new(ErrorCode::TransportRejected, diagnostic)
            }
            BridgeError::InvalidRequest(reason) => ApiError::invalid_request(reason),
            BridgeError::Receipt(e) => ApiError::new(ErrorCode::ValidationError, e.to_string()),
            e @ (BridgeError::ConfigParse(_) | BridgeError::ConfigInvalid(_)) => {
                ApiError::new(ErrorCode::ConfigError, e.to_string())
            }
            e @ BridgeError::UnexpectedResponse { .. } => {
                tracing::error!(error = %e, "Gateway answered the wrong operation");
                ApiError::internal(e.to_string())
            }
            BridgeError::Io(e) => {
                tracing::error!("Bridge I/O failed: {}", e);
                ApiError::internal("Bridge I/O failed")
            }
            BridgeError::Serialization(e) => {
                tracing::error!("Reply serialization failed: {}", e);
                ApiError::internal("Reply serialization failed")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_json_shape() {
        let api: ApiError = BridgeError::TransportRejected("addSale: gateway is not running".into()).into();
        let json = serde_json::to_value(&api).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": "TRANSPORT_REJECTED",
                "message": "addSale: gateway is not running"
            })
        );
    }

    #[test]
    fn test_receipt_error_is_validation() {
        let err = BridgeError::from(CoreError::InvalidSaleDate {
            sale_id: 4,
            date: "soon".into(),
        });
        assert!(err.is_caller_error());

        let api = ApiError::from(err);
        assert_eq!(api.code, ErrorCode::ValidationError);
        assert!(api.message.contains("soon"));
    }

    #[test]
    fn test_config_errors_map_to_config_code() {
        let api = ApiError::from(BridgeError::ConfigInvalid("channel_capacity must be greater than 0".into()));
        assert_eq!(api.code, ErrorCode::ConfigError);
        assert_eq!(api.to_string(), "[ConfigError] Invalid bridge configuration: channel_capacity must be greater than 0");
    }
}
