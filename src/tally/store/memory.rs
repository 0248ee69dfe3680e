use super::ItemStore;
use crate::error::{Result, TallyError};
use crate::model::Item;
use chrono::Utc;
use std::collections::BTreeMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    items: BTreeMap<String, Item>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemStore for InMemoryStore {
    fn list_all(&self) -> Result<Vec<Item>> {
        Ok(self.items.values().cloned().collect())
    }

    fn get(&self, name: &str) -> Result<Option<Item>> {
        Ok(self.items.get(name).cloned())
    }

    fn put(&mut self, name: &str, quantity: u32) -> Result<Item> {
        if quantity == 0 {
            return Err(TallyError::StoreWrite(format!(
                "refusing to store '{}' with quantity 0",
                name
            )));
        }
        let item = match self.items.get(name) {
            Some(existing) => Item {
                quantity,
                updated_at: Utc::now(),
                ..existing.clone()
            },
            None => Item::new(name, quantity),
        };
        self.items.insert(name.to_string(), item.clone());
        Ok(item)
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        self.items.remove(name);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_item(mut self, name: &str, quantity: u32) -> Self {
            self.store.put(name, quantity).unwrap();
            self
        }

        pub fn with_items(mut self, items: &[(&str, u32)]) -> Self {
            for (name, quantity) in items {
                self.store.put(name, *quantity).unwrap();
            }
            self
        }
    }

    /// Wraps an [`InMemoryStore`] and fails reads and/or writes on demand.
    /// `fail_list` only fails `list_all`, leaving `get` working.
    #[derive(Default)]
    pub struct FailingStore {
        pub inner: InMemoryStore,
        pub fail_reads: bool,
        pub fail_list: bool,
        pub fail_writes: bool,
    }

    impl FailingStore {
        pub fn new(inner: InMemoryStore) -> Self {
            Self {
                inner,
                fail_reads: false,
                fail_list: false,
                fail_writes: false,
            }
        }

        fn check_read(&self) -> Result<()> {
            if self.fail_reads {
                return Err(TallyError::StoreRead("injected read failure".into()));
            }
            Ok(())
        }

        fn check_write(&self) -> Result<()> {
            if self.fail_writes {
                return Err(TallyError::StoreWrite("injected write failure".into()));
            }
            Ok(())
        }
    }

    impl ItemStore for FailingStore {
        fn list_all(&self) -> Result<Vec<Item>> {
            self.check_read()?;
            if self.fail_list {
                return Err(TallyError::StoreRead("injected list failure".into()));
            }
            self.inner.list_all()
        }

        fn get(&self, name: &str) -> Result<Option<Item>> {
            self.check_read()?;
            self.inner.get(name)
        }

        fn put(&mut self, name: &str, quantity: u32) -> Result<Item> {
            self.check_write()?;
            self.inner.put(name, quantity)
        }

        fn delete(&mut self, name: &str) -> Result<()> {
            self.check_write()?;
            self.inner.delete(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_creates_then_updates() {
        let mut store = InMemoryStore::new();
        let created = store.put("apple", 1).unwrap();
        let updated = store.put("apple", 4).unwrap();

        assert_eq!(updated.quantity, 4);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(store.get("apple").unwrap().unwrap().quantity, 4);
    }

    #[test]
    fn rejects_zero_quantity() {
        let mut store = InMemoryStore::new();
        let err = store.put("apple", 0).unwrap_err();
        assert!(matches!(err, TallyError::StoreWrite(_)));
        assert!(store.get("apple").unwrap().is_none());
    }

    #[test]
    fn lists_in_name_order() {
        let mut store = InMemoryStore::new();
        store.put("pear", 1).unwrap();
        store.put("apple", 2).unwrap();
        store.put("fig", 3).unwrap();

        let names: Vec<_> = store
            .list_all()
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["apple", "fig", "pear"]);
    }

    #[test]
    fn delete_missing_is_noop() {
        let mut store = InMemoryStore::new();
        store.delete("ghost").unwrap();
        assert!(store.list_all().unwrap().is_empty());
    }
}
