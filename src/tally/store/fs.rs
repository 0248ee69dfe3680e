use super::ItemStore;
use crate::error::{Result, TallyError};
use crate::model::Item;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

pub const DEFAULT_COLLECTION: &str = "inventory";

/// On-disk shape of a record. The name is the map key, not a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredItem {
    quantity: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StoredItem {
    fn into_item(self, name: String) -> Item {
        Item {
            name,
            quantity: self.quantity,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

type Collection = BTreeMap<String, StoredItem>;

pub struct FileStore {
    root: PathBuf,
    collection: String,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    pub fn with_collection(mut self, collection: &str) -> Self {
        self.collection = collection.to_string();
        self
    }

    pub fn collection_path(&self) -> PathBuf {
        self.root.join(format!("{}.json", self.collection))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(write_err)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<Collection> {
        let path = self.collection_path();
        if !path.exists() {
            return Ok(Collection::new());
        }
        let content = fs::read_to_string(&path).map_err(read_err)?;
        serde_json::from_str(&content).map_err(|e| {
            TallyError::StoreRead(format!("{}: {}", path.display(), e))
        })
    }

    /// Writes a sibling temp file and renames it over the document, so a
    /// crash mid-write leaves the previous version intact.
    fn save(&self, items: &Collection) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(items).map_err(write_err)?;

        let mut file = NamedTempFile::new_in(&self.root).map_err(write_err)?;
        file.write_all(content.as_bytes()).map_err(write_err)?;
        file.as_file().sync_all().map_err(write_err)?;
        file.persist(self.collection_path())
            .map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

fn read_err(e: impl Into<TallyError>) -> TallyError {
    TallyError::StoreRead(e.into().to_string())
}

fn write_err(e: impl Into<TallyError>) -> TallyError {
    TallyError::StoreWrite(e.into().to_string())
}

impl ItemStore for FileStore {
    fn list_all(&self) -> Result<Vec<Item>> {
        Ok(self
            .load()?
            .into_iter()
            .map(|(name, stored)| stored.into_item(name))
            .collect())
    }

    fn get(&self, name: &str) -> Result<Option<Item>> {
        let mut items = self.load()?;
        Ok(items
            .remove(name)
            .map(|stored| stored.into_item(name.to_string())))
    }

    fn put(&mut self, name: &str, quantity: u32) -> Result<Item> {
        if quantity == 0 {
            return Err(TallyError::StoreWrite(format!(
                "refusing to store '{}' with quantity 0",
                name
            )));
        }

        // Read failures while preparing a write are still write failures.
        let mut items = self.load().map_err(|e| match e {
            TallyError::StoreRead(msg) => TallyError::StoreWrite(msg),
            other => other,
        })?;

        let now = Utc::now();
        let stored = match items.get(name) {
            Some(existing) => StoredItem {
                quantity,
                created_at: existing.created_at,
                updated_at: now,
            },
            None => StoredItem {
                quantity,
                created_at: now,
                updated_at: now,
            },
        };
        items.insert(name.to_string(), stored.clone());
        self.save(&items)?;

        Ok(stored.into_item(name.to_string()))
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        let mut items = self.load().map_err(|e| match e {
            TallyError::StoreRead(msg) => TallyError::StoreWrite(msg),
            other => other,
        })?;
        if items.remove(name).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }
}
