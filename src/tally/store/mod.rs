//! # Storage Layer
//!
//! The [`ItemStore`] trait is the gateway to the item collection. Everything
//! above it (commands, session, CLI) works against the trait only.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - The whole collection lives in one JSON document: `{collection}.json`
//!   - Records are keyed by normalized item name
//!   - Each write replaces the document atomically (temp file + rename)
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Test fixtures, including a store that fails on demand
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! ~/.local/share/tally/
//! ├── inventory.json      # All items: { "apple": { "quantity": 3, ... } }
//! └── config.json         # Configuration
//! ```
//!
//! ## Contract
//!
//! - Keys are already normalized by the caller; stores do not lowercase.
//! - `put` is an upsert. It keeps `created_at` of an existing record and
//!   refreshes `updated_at`.
//! - A record with quantity 0 is never stored: `put(name, 0)` fails.
//! - `list_all` enumerates in a deterministic order for a given snapshot
//!   (both backends enumerate by name).
//! - Failures surface as [`TallyError::StoreRead`] or [`TallyError::StoreWrite`].
//!
//! There is no compare-and-set primitive, so read-modify-write sequences
//! built on this trait can lose updates under concurrent writers.
//!
//! [`TallyError::StoreRead`]: crate::error::TallyError::StoreRead
//! [`TallyError::StoreWrite`]: crate::error::TallyError::StoreWrite

use crate::error::Result;
use crate::model::Item;

pub mod fs;
pub mod memory;

/// Abstract interface for the item collection.
pub trait ItemStore {
    /// Full snapshot read
    fn list_all(&self) -> Result<Vec<Item>>;

    /// Get one record, `None` if absent
    fn get(&self, name: &str) -> Result<Option<Item>>;

    /// Create or update a record's quantity
    fn put(&mut self, name: &str, quantity: u32) -> Result<Item>;

    /// Delete a record
    fn delete(&mut self, name: &str) -> Result<()>;
}
