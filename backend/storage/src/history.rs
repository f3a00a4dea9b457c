//! Analysis history and categories over a key-value backend.
//!
//! Two keys: the history list (newest first) and the category list.
//! Saving is an upsert by id — an existing record is replaced, not
//! duplicated. Unreadable stored documents are treated as empty rather
//! than failing every read path.

use std::sync::Arc;

use tracing::{info, warn};

use reelscope_core::{Category, ReelError, SavedAnalysis};

use crate::backend::{FileBackend, KvBackend};

pub const HISTORY_KEY: &str = "reelscope_history_v1";
pub const CATEGORY_KEY: &str = "reelscope_categories_v1";

/// The persistence store behind the dashboard.
pub struct HistoryStore {
    backend: Arc<dyn KvBackend>,
}

impl HistoryStore {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// Store under the platform data directory.
    pub fn open_default() -> Result<Self, ReelError> {
        Ok(Self::new(Arc::new(FileBackend::open_default()?)))
    }

    /// All saved analyses, newest first. Corrupt data reads as empty.
    pub fn history(&self) -> Vec<SavedAnalysis> {
        self.load_list(HISTORY_KEY)
    }

    /// All categories, in insertion order.
    pub fn categories(&self) -> Vec<Category> {
        self.load_list(CATEGORY_KEY)
    }

    /// Upsert by id: a record with a matching id is replaced and the saved
    /// item moves to the top of the list.
    pub fn save(&self, item: SavedAnalysis) -> Result<(), ReelError> {
        let mut history = self.history();
        history.retain(|existing| existing.id != item.id);
        history.insert(0, item);
        self.store_list(HISTORY_KEY, &history)
    }

    pub fn delete(&self, id: &str) -> Result<(), ReelError> {
        let mut history = self.history();
        let before = history.len();
        history.retain(|item| item.id != id);
        if history.len() == before {
            warn!(id, "delete: no history item with this id");
        }
        self.store_list(HISTORY_KEY, &history)
    }

    /// Upsert a category by id.
    pub fn save_category(&self, category: Category) -> Result<(), ReelError> {
        let mut categories = self.categories();
        match categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category,
            None => categories.push(category),
        }
        self.store_list(CATEGORY_KEY, &categories)
    }

    /// Delete a category and move its history items to uncategorized.
    pub fn delete_category(&self, id: &str) -> Result<(), ReelError> {
        let mut categories = self.categories();
        categories.retain(|c| c.id != id);
        self.store_list(CATEGORY_KEY, &categories)?;

        let mut history = self.history();
        let mut orphaned = 0usize;
        for item in &mut history {
            if item.category_id.as_deref() == Some(id) {
                item.category_id = None;
                orphaned += 1;
            }
        }
        if orphaned > 0 {
            info!(category = id, orphaned, "moved history items to uncategorized");
        }
        self.store_list(HISTORY_KEY, &history)
    }

    fn load_list<T: serde::de::DeserializeOwned>(&self, key: &str) -> Vec<T> {
        match self.backend.load(key) {
            Ok(Some(data)) => serde_json::from_str(&data).unwrap_or_else(|e| {
                warn!(key, error = %e, "stored document is unreadable, treating as empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key, error = %e, "load failed, treating as empty");
                Vec::new()
            }
        }
    }

    fn store_list<T: serde::Serialize>(&self, key: &str, list: &[T]) -> Result<(), ReelError> {
        let data = serde_json::to_string(list)
            .map_err(|e| ReelError::Storage(format!("serialize {key} failed: {e}")))?;
        self.backend.store(key, &data)
    }
}
