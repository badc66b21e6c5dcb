use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use crate::errors::AppError;
use crate::history::HistoryItem;

/// Persistence port for the history list.
pub trait HistoryStorage: Send + Sync {
    /// Returns `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Vec<HistoryItem>>, AppError>;

    fn save(&self, items: &[HistoryItem]) -> Result<(), AppError>;
}

/// Pretty-printed JSON array at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistoryStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<HistoryItem>>, AppError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };

        let items = serde_json::from_str(&raw).map_err(|e| {
            AppError::Storage(format!("Corrupt history file {}: {e}", self.path.display()))
        })?;
        Ok(Some(items))
    }

    /// Writes to a temp file in the same directory, then renames over the target.
    fn save(&self, items: &[HistoryItem]) -> Result<(), AppError> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let json = serde_json::to_vec_pretty(items)
            .map_err(|e| AppError::Storage(format!("Failed to serialize history: {e}")))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(&json)?;
        tmp.persist(&self.path).map_err(|e| {
            AppError::Storage(format!("Failed to write {}: {}", self.path.display(), e.error))
        })?;

        debug!("Saved {} history item(s) to {}", items.len(), self.path.display());
        Ok(())
    }
}

/// In-memory storage. Clones share the same backing list, so a test can keep a
/// handle and inspect what the store wrote.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: std::sync::Arc<std::sync::Mutex<MemoryState>>,
}

#[cfg(test)]
#[derive(Debug, Default)]
struct MemoryState {
    items: Option<Vec<HistoryItem>>,
    saves: usize,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn with_items(items: Vec<HistoryItem>) -> Self {
        Self {
            inner: std::sync::Arc::new(std::sync::Mutex::new(MemoryState {
                items: Some(items),
                saves: 0,
            })),
        }
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    pub fn snapshot(&self) -> Vec<HistoryItem> {
        self.lock().items.clone().unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // A poisoned lock only means another test thread panicked mid-write.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
impl HistoryStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<HistoryItem>>, AppError> {
        Ok(self.lock().items.clone())
    }

    fn save(&self, items: &[HistoryItem]) -> Result<(), AppError> {
        let mut state = self.lock();
        state.items = Some(items.to_vec());
        state.saves += 1;
        Ok(())
    }
}
