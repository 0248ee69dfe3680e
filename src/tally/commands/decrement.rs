//! Decrement: read the record, delete it at 1, otherwise write `quantity - 1`.
//! Same lost-update caveat as increment.

use crate::commands::{CmdMessage, CmdResult, Mutation};
use crate::error::Result;
use crate::model::{display_name, normalize_name};
use crate::store::ItemStore;
use tracing::debug;

pub fn run<S: ItemStore>(store: &mut S, name: &str) -> Result<CmdResult> {
    let key = normalize_name(name);
    let mut result = CmdResult::default();

    let Some(existing) = store.get(&key)? else {
        debug!(item = %key, "decrement of missing item ignored");
        result.add_message(CmdMessage::info(format!(
            "{} is not in the inventory",
            display_name(&key)
        )));
        return Ok(result.with_mutation(Mutation::Missing));
    };

    if existing.quantity <= 1 {
        store.delete(&key)?;
        debug!(item = %key, "removed item");
        result.add_message(CmdMessage::success(format!(
            "Removed {}",
            display_name(&key)
        )));
        return Ok(result.with_mutation(Mutation::Removed));
    }

    let next = existing.quantity - 1;
    store.put(&key, next)?;
    debug!(item = %key, quantity = next, "decremented item");
    result.add_message(CmdMessage::success(format!(
        "{}: {}",
        display_name(&key),
        next
    )));
    Ok(result.with_mutation(Mutation::Decremented { quantity: next }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TallyError;
    use crate::store::memory::fixtures::{FailingStore, StoreFixture};

    #[test]
    fn deletes_item_at_one() {
        let mut store = StoreFixture::new().with_item("apple", 1).store;
        let result = run(&mut store, "apple").unwrap();

        assert_eq!(result.mutation, Some(Mutation::Removed));
        assert_eq!(result.messages[0].content, "Removed Apple");
        assert!(store.get("apple").unwrap().is_none());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn decrements_above_one() {
        let mut store = StoreFixture::new().with_item("apple", 3).store;
        let result = run(&mut store, "APPLE").unwrap();

        assert_eq!(result.mutation, Some(Mutation::Decremented { quantity: 2 }));
        assert_eq!(store.get("apple").unwrap().unwrap().quantity, 2);
    }

    #[test]
    fn missing_item_is_noop() {
        let mut store = StoreFixture::new().with_item("pear", 2).store;
        let result = run(&mut store, "apple").unwrap();

        assert_eq!(result.mutation, Some(Mutation::Missing));
        assert_eq!(result.messages[0].level, crate::commands::MessageLevel::Info);
        assert_eq!(result.messages[0].content, "Apple is not in the inventory");
        let items = store.list_all().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn delete_failure_keeps_record() {
        let inner = StoreFixture::new().with_item("apple", 1).store;
        let mut store = FailingStore::new(inner);
        store.fail_writes = true;

        let err = run(&mut store, "apple").unwrap_err();
        assert!(matches!(err, TallyError::StoreWrite(_)));
        assert_eq!(store.inner.get("apple").unwrap().unwrap().quantity, 1);
    }

    #[test]
    fn read_failure_propagates() {
        let inner = StoreFixture::new().with_item("apple", 2).store;
        let mut store = FailingStore::new(inner);
        store.fail_reads = true;

        assert!(matches!(
            run(&mut store, "apple").unwrap_err(),
            TallyError::StoreRead(_)
        ));
    }
}
