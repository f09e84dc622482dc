//! Backup and restore commands.
//!
//! Both are forwarded to the injected [`BackupAgent`]. The record store is
//! not read or locked.

use tracing::{debug, warn};

use stockroom_core::BackupOutcome;
use stockroom_store::BackupAgent;

pub fn backup_data(agent: &dyn BackupAgent, location: &str) -> BackupOutcome {
    debug!(location, "backup_data command");
    let outcome = agent.backup(location);
    if !outcome.success {
        warn!(message = %outcome.message, "Backup failed");
    }
    outcome
}

pub fn restore_data(agent: &dyn BackupAgent, location: &str) -> BackupOutcome {
    debug!(location, "restore_data command");
    let outcome = agent.restore(location);
    if !outcome.success {
        warn!(message = %outcome.message, "Restore failed");
    }
    outcome
}
