use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::history::{HistoryItem, HistoryStorage, NewHistoryItem, MAX_HISTORY_ITEMS};

/// Newest-first generation history.
pub struct HistoryStore {
    items: Vec<HistoryItem>,
    storage: Box<dyn HistoryStorage>,
}

impl HistoryStore {
    /// Loads the saved list once. An unreadable or corrupt file starts an empty
    /// history instead of failing the command.
    pub fn open(storage: Box<dyn HistoryStorage>) -> Self {
        let mut items = match storage.load() {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not load history, starting empty: {e}");
                Vec::new()
            }
        };
        items.truncate(MAX_HISTORY_ITEMS);
        debug!("Loaded {} history item(s)", items.len());

        Self { items, storage }
    }

    /// Stamps a new generation with the current time and saves it.
    pub fn add(&mut self, item: NewHistoryItem) -> Result<HistoryItem, AppError> {
        self.add_at(item, Utc::now())
    }

    pub fn add_at(
        &mut self,
        item: NewHistoryItem,
        now: DateTime<Utc>,
    ) -> Result<HistoryItem, AppError> {
        let item = item.stamp(now);
        self.insert(item.clone())?;
        Ok(item)
    }

    /// Prepends an already-stamped item, drops anything past the cap, and persists.
    pub fn insert(&mut self, item: HistoryItem) -> Result<(), AppError> {
        info!("Saving '{}' ({}) to history", item.product_name, item.content_type);
        self.items.insert(0, item);
        self.items.truncate(MAX_HISTORY_ITEMS);
        self.storage.save(&self.items)
    }

    /// Removes the item with `id`. Returns `false`, without writing, if there is none.
    pub fn delete(&mut self, id: &str) -> Result<bool, AppError> {
        let Some(pos) = self.items.iter().position(|item| item.id == id) else {
            return Ok(false);
        };
        self.items.remove(pos);
        self.storage.save(&self.items)?;
        Ok(true)
    }

    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
