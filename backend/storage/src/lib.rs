pub mod backend;
pub mod backup;
pub mod history;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
pub use backup::{Backup, BACKUP_VERSION};
pub use history::{HistoryStore, CATEGORY_KEY, HISTORY_KEY};
