//! Versioned backup files: export the whole store, import with merge-by-id.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use reelscope_core::{Category, ReelError, SavedAnalysis};

use crate::history::HistoryStore;

pub const BACKUP_VERSION: u32 = 1;

/// The on-disk backup file format.
///
/// Both lists are required: a document without `categories` and `history`
/// arrays is not a backup file and is rejected before the store is touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backup {
    pub version: u32,
    /// Unix milliseconds at export time.
    pub timestamp: i64,
    pub categories: Vec<Category>,
    pub history: Vec<SavedAnalysis>,
}

impl HistoryStore {
    /// Snapshot the entire store into a backup document.
    pub fn export_backup(&self) -> Backup {
        Backup {
            version: BACKUP_VERSION,
            timestamp: Utc::now().timestamp_millis(),
            categories: self.categories(),
            history: self.history(),
        }
    }

    /// Pretty-printed backup JSON, ready to write to a file.
    pub fn export_backup_json(&self) -> Result<String, ReelError> {
        serde_json::to_string_pretty(&self.export_backup())
            .map_err(|e| ReelError::Storage(format!("serialize backup failed: {e}")))
    }

    /// Merge a backup into the store.
    ///
    /// Records are merged by id with imported ones winning; history is
    /// re-sorted by timestamp descending afterwards. Returns the number of
    /// history records the backup carried.
    pub fn import_backup(&self, backup: Backup) -> Result<usize, ReelError> {
        if backup.version != BACKUP_VERSION {
            warn!(version = backup.version, "importing backup with unexpected version");
        }

        let mut categories: BTreeMap<String, Category> = self
            .categories()
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();
        for category in backup.categories {
            categories.insert(category.id.clone(), category);
        }
        let categories: Vec<Category> = categories.into_values().collect();
        for category in &categories {
            self.save_category(category.clone())?;
        }

        let imported = backup.history.len();
        let mut merged: BTreeMap<String, SavedAnalysis> = self
            .history()
            .into_iter()
            .map(|h| (h.id.clone(), h))
            .collect();
        for item in backup.history {
            merged.insert(item.id.clone(), item);
        }
        let mut history: Vec<SavedAnalysis> = merged.into_values().collect();
        history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        self.replace_history(history)?;

        info!(imported, "backup import complete");
        Ok(imported)
    }

    /// Parse and import a backup JSON string.
    pub fn import_backup_json(&self, json: &str) -> Result<usize, ReelError> {
        let backup: Backup = serde_json::from_str(json)
            .map_err(|e| ReelError::Storage(format!("not a valid backup file: {e}")))?;
        self.import_backup(backup)
    }

    fn replace_history(&self, history: Vec<SavedAnalysis>) -> Result<(), ReelError> {
        // Rebuild from the bottom so the newest-first invariant holds.
        for item in history.into_iter().rev() {
            self.save(item)?;
        }
        Ok(())
    }
}
