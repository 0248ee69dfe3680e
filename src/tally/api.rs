//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for all
//! tally operations, whatever the UI.
//!
//! The API dispatches to the command functions and returns structured
//! [`CmdResult`]s. It holds no business logic, does no terminal I/O and does
//! not swallow errors: store failures come back as `Err` so each client can
//! decide how to surface them (the [`Session`](crate::session::Session)
//! logs and discards them).
//!
//! `TallyApi<S: ItemStore>` is generic over the backend:
//! - Production: `TallyApi<FileStore>`
//! - Testing: `TallyApi<InMemoryStore>`

use crate::commands;
use crate::error::Result;
use crate::model::Item;
use crate::store::ItemStore;
use crate::view::ViewState;

pub struct TallyApi<S: ItemStore> {
    store: S,
    paths: commands::TallyPaths,
}

impl<S: ItemStore> TallyApi<S> {
    pub fn new(store: S, paths: commands::TallyPaths) -> Self {
        Self { store, paths }
    }

    /// Adding an item is an increment of a possibly new name.
    pub fn add_item(&mut self, name: &str) -> Result<commands::CmdResult> {
        commands::increment::run(&mut self.store, name)
    }

    pub fn increment(&mut self, name: &str) -> Result<commands::CmdResult> {
        commands::increment::run(&mut self.store, name)
    }

    pub fn decrement(&mut self, name: &str) -> Result<commands::CmdResult> {
        commands::decrement::run(&mut self.store, name)
    }

    pub fn list_items(&self, view: &ViewState) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, view)
    }

    /// Raw snapshot, in store order.
    pub fn snapshot(&self) -> Result<Vec<Item>> {
        self.store.list_all()
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn init(&self) -> Result<commands::CmdResult> {
        commands::init::run(&self.paths)
    }

    #[cfg(any(test, feature = "test_utils"))]
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, Mutation, TallyPaths};
