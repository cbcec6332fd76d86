use serde::{Deserialize, Serialize};

use super::inventory::InventoryRecord;

/// One imported batch, persisted as a named database document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub id: String,
    pub name: String,
    pub items: Vec<InventoryRecord>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl Database {
    /// Create a database with a fresh id and creation timestamp.
    pub fn new(name: impl Into<String>, items: Vec<InventoryRecord>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            items,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Lightweight listing view of a database, without its items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "itemCount")]
    pub item_count: usize,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl From<&Database> for DatabaseSummary {
    fn from(db: &Database) -> Self {
        Self {
            id: db.id.clone(),
            name: db.name.clone(),
            item_count: db.items.len(),
            created_at: db.created_at.clone(),
        }
    }
}
