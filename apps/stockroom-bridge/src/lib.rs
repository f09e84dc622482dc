//! # Stockroom Bridge Library
//!
//! The boundary between the UI process and the record store.
//!
//! ## Module Organization
//! ```text
//! stockroom_bridge/
//! ├── lib.rs          ◄─── You are here (startup & logging)
//! ├── config.rs       ◄─── BridgeConfig (TOML + env overrides)
//! ├── protocol.rs     ◄─── Request / Response wire enums
//! ├── gateway.rs      ◄─── Gateway service + BridgeHandle
//! ├── host.rs         ◄─── JSON-lines stdio host
//! ├── state/
//! │   ├── mod.rs      ◄─── State exports
//! │   └── store.rs    ◄─── StoreState (Arc<RwLock<RecordStore>>)
//! ├── commands/
//! │   ├── mod.rs      ◄─── dispatch
//! │   ├── product.rs  ◄─── Product CRUD
//! │   ├── sale.rs     ◄─── Sales + stock side effect
//! │   ├── settings.rs ◄─── Settings singleton
//! │   ├── backup.rs   ◄─── Backup / restore via BackupAgent
//! │   ├── receipt.rs  ◄─── Receipt view model
//! │   └── dashboard.rs◄─── Dashboard aggregates
//! └── error.rs        ◄─── BridgeError + ApiError
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;
pub mod host;
pub mod protocol;
pub mod state;

pub use config::BridgeConfig;
pub use error::{ApiError, BridgeError, BridgeResult, ErrorCode};
pub use gateway::{BridgeHandle, Gateway};
pub use protocol::{Request, Response};
pub use state::StoreState;

use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stockroom_store::IntentLog;

/// Runs the bridge on stdin/stdout until stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Bridge Startup                                    │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,stockroom=debug, override with RUST_LOG             │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • bridge.toml + STOCKROOM_* env vars, defaults on failure           │
/// │                                                                         │
/// │  3. Build Record Store ───────────────────────────────────────────────► │
/// │     • sample data unless disabled, initial settings applied             │
/// │                                                                         │
/// │  4. Spawn Gateway ────────────────────────────────────────────────────► │
/// │     • StoreState + IntentLog backup agent                               │
/// │                                                                         │
/// │  5. Serve JSON Lines ─────────────────────────────────────────────────► │
/// │     • until stdin closes, then drain and stop the gateway               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> BridgeResult<()> {
    init_tracing();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting Stockroom bridge");

    let config = BridgeConfig::load_or_default(None);
    info!(
        seed = config.seed_sample_data,
        capacity = config.channel_capacity,
        "Configuration loaded"
    );

    let state = StoreState::new(config.build_store());
    let handle = Gateway::spawn_with_capacity(state, Arc::new(IntentLog::new()), config.channel_capacity);

    host::serve(
        handle.clone(),
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await?;

    handle.shutdown().await?;
    info!("Stockroom bridge stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockroom=trace` - Show trace for stockroom crates only
/// - Default: `info,stockroom=debug`
///
/// Output goes to stderr; stdout carries protocol replies only.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stockroom=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
