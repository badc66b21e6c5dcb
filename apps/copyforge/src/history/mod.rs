// Local generation history: a newest-first list capped at MAX_HISTORY_ITEMS,
// persisted through a HistoryStorage port (JSON file on disk, memory in tests).

pub mod storage;
pub mod store;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::generation::content_type::{ContentType, PageType};

pub use storage::{HistoryStorage, JsonFileStorage};
#[cfg(test)]
pub use storage::MemoryStorage;
pub use store::HistoryStore;

/// Oldest items beyond this count are dropped on insert.
pub const MAX_HISTORY_ITEMS: usize = 20;

/// One saved generation. Field names match the persisted file layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub product_name: String,
    #[serde(deserialize_with = "lenient_content_type")]
    pub content_type: ContentType,
    pub content: String,
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub page_type: PageType,
}

/// A generation that has not been stamped with an id and timestamp yet.
#[derive(Debug, Clone)]
pub struct NewHistoryItem {
    pub product_name: String,
    pub content_type: ContentType,
    pub content: String,
}

impl NewHistoryItem {
    pub fn new(product_name: &str, content_type: ContentType, content: &str) -> Self {
        Self {
            product_name: product_name.to_string(),
            content_type,
            content: content.to_string(),
        }
    }

    /// Stamps the item. The id is the creation time in milliseconds as a string.
    pub fn stamp(self, now: DateTime<Utc>) -> HistoryItem {
        let timestamp = now.timestamp_millis();
        HistoryItem {
            id: timestamp.to_string(),
            product_name: self.product_name,
            page_type: self.content_type.page_type(),
            content_type: self.content_type,
            content: self.content,
            timestamp,
        }
    }
}

impl HistoryItem {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }
}

/// Unknown content-type keys in an old file resolve the same way the prompt
/// formatter does, instead of failing the whole history load.
fn lenient_content_type<'de, D>(deserializer: D) -> Result<ContentType, D::Error>
where
    D: Deserializer<'de>,
{
    let key = String::deserialize(deserializer)?;
    Ok(ContentType::from_key_or_default(&key))
}
