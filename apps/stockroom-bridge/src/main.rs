//! # Stockroom Bridge Entry Point
//!
//! Runs the bridge as a child process of the UI shell.
//!
//! ```text
//! ┌──────────────────────────┐   stdin (JSON lines)   ┌─────────────────────┐
//! │        UI process        │ ─────────────────────► │  stockroom-bridge   │
//! │  products / sales /      │                        │  gateway + store    │
//! │  settings / receipt      │ ◄───────────────────── │                     │
//! └──────────────────────────┘   stdout (JSON lines)  └─────────────────────┘
//!                                                        stderr: logs
//! ```
//!
//! The actual setup is in lib.rs so it can be exercised from tests.

#[tokio::main]
async fn main() {
    if let Err(e) = stockroom_bridge::run().await {
        tracing::error!(error = %e, "Bridge exited with an error");
        std::process::exit(1);
    }
}
