//! # Backup Collaborator
//!
//! Backup and restore are delegated to an external agent. The store only
//! defines the seam; [`IntentLog`] is the placeholder agent that records what
//! was asked for without touching the filesystem.
//!
//! ```text
//! backupData("/mnt/backups")
//!      │
//!      ▼
//! BackupAgent::backup(location)
//!      │
//!      ├── IntentLog ──► push BackupIntent { Backup, location, now } ──► success
//!      │
//!      └── (real agent) ──► whatever the host platform provides
//! ```

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use stockroom_core::BackupOutcome;
use tracing::{info, warn};

pub const BACKUP_COMPLETED: &str = "Backup completed successfully";
pub const RESTORE_COMPLETED: &str = "Restore completed successfully";
pub const LOCATION_REQUIRED: &str = "Backup location is required";

/// External backup collaborator.
///
/// Implementations report failure through [`BackupOutcome`], never by
/// panicking.
pub trait BackupAgent: Send + Sync {
    fn backup(&self, location: &str) -> BackupOutcome;
    fn restore(&self, location: &str) -> BackupOutcome;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupAction {
    Backup,
    Restore,
}

impl BackupAction {
    fn completed_message(self) -> &'static str {
        match self {
            BackupAction::Backup => BACKUP_COMPLETED,
            BackupAction::Restore => RESTORE_COMPLETED,
        }
    }
}

/// One recorded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupIntent {
    pub action: BackupAction,
    pub location: String,
    pub requested_at: DateTime<Utc>,
}

/// Records requested backups and restores and reports success.
#[derive(Debug, Default)]
pub struct IntentLog {
    intents: Mutex<Vec<BackupIntent>>,
}

impl IntentLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded intents, oldest first.
    pub fn intents(&self) -> Vec<BackupIntent> {
        match self.intents.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, action: BackupAction, location: &str) -> BackupOutcome {
        let location = location.trim();
        if location.is_empty() {
            warn!(?action, "Backup request rejected, no location");
            return BackupOutcome::failed(LOCATION_REQUIRED);
        }

        let intent = BackupIntent {
            action,
            location: location.to_string(),
            requested_at: Utc::now(),
        };

        match self.intents.lock() {
            Ok(mut guard) => guard.push(intent),
            Err(poisoned) => poisoned.into_inner().push(intent),
        }

        info!(?action, location, "Backup intent recorded");
        BackupOutcome::succeeded(action.completed_message())
    }
}

impl BackupAgent for IntentLog {
    fn backup(&self, location: &str) -> BackupOutcome {
        self.record(BackupAction::Backup, location)
    }

    fn restore(&self, location: &str) -> BackupOutcome {
        self.record(BackupAction::Restore, location)
    }
}
