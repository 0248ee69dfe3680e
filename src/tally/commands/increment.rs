//! Increment (and add): read the record, then write `quantity + 1`, creating it at 1.
//!
//! The read and the write are separate store calls. Two writers incrementing
//! the same name at once can both read `n` and both write `n + 1`; the last
//! write wins and one update is lost.

use crate::commands::{CmdMessage, CmdResult, Mutation};
use crate::error::{Result, TallyError};
use crate::model::{display_name, normalize_name};
use crate::store::ItemStore;
use tracing::debug;

pub fn run<S: ItemStore>(store: &mut S, name: &str) -> Result<CmdResult> {
    let key = normalize_name(name);
    let current = store.get(&key)?;

    let (item, mutation) = match current {
        None => (store.put(&key, 1)?, Mutation::Created),
        Some(existing) => {
            let next = existing.quantity.checked_add(1).ok_or_else(|| {
                TallyError::StoreWrite(format!("quantity of '{}' would overflow", key))
            })?;
            let item = store.put(&key, next)?;
            (item, Mutation::Incremented { quantity: next })
        }
    };
    debug!(item = %key, quantity = item.quantity, "incremented item");

    let mut result = CmdResult::default().with_mutation(mutation);
    result.add_message(CmdMessage::success(match mutation {
        Mutation::Created => format!("Added {} (1)", display_name(&key)),
        _ => format!("{}: {}", display_name(&key), item.quantity),
    }));
    Ok(result)
}
