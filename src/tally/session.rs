//! # Session
//!
//! The event-driven controller a UI talks to. It owns the API, the current
//! [`ViewState`], the last store snapshot and the derived visible items.
//!
//! ## Event handling
//!
//! - **Mutations** (`Add`, `Increment`, `Decrement`) run the quantity
//!   protocol, then re-fetch the whole collection and re-derive the view.
//! - **View events** (`SearchChanged`, `SortClicked`, `ClearFilters`)
//!   re-fetch, then commit the new view state and re-derive. If the fetch
//!   fails the old view state is kept.
//! - `Refresh` re-fetches and re-derives.
//!
//! ## Failures
//!
//! Store failures stop at this boundary. They are logged with
//! `tracing::error!`, the visible items stay exactly as they were, nothing
//! is retried, and the caller gets [`EventOutcome::Failed`] as a value.
//! The next successful refresh is the only recovery path.
//!
//! ## Observers
//!
//! Callbacks registered with [`Session::subscribe`] receive the new visible
//! items after every successful re-derivation, in registration order.

use crate::api::{CmdResult, TallyApi};
use crate::error::{Result, TallyError};
use crate::model::Item;
use crate::store::ItemStore;
use crate::view::{SortField, ViewState};
use tracing::{debug, error, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Add(String),
    Increment(String),
    Decrement(String),
    SearchChanged(String),
    SortClicked(SortField),
    ClearFilters,
    Refresh,
}

#[derive(Debug)]
pub enum EventOutcome {
    /// The event took effect. Mutation events carry the command result.
    Applied(Option<CmdResult>),
    /// The event was dropped before reaching the store (e.g. an empty name).
    Ignored,
    /// A store call failed; the view is unchanged.
    Failed(TallyError),
}

impl EventOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, EventOutcome::Failed(_))
    }
}

type Observer = Box<dyn FnMut(&[Item])>;

pub struct Session<S: ItemStore> {
    api: TallyApi<S>,
    state: ViewState,
    snapshot: Vec<Item>,
    visible: Vec<Item>,
    observers: Vec<Observer>,
}

impl<S: ItemStore> Session<S> {
    /// Creates a session with an empty view. Call [`Session::refresh`] (or
    /// dispatch [`Event::Refresh`]) to load the store.
    pub fn new(api: TallyApi<S>, state: ViewState) -> Self {
        Self {
            api,
            state,
            snapshot: Vec::new(),
            visible: Vec::new(),
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&[Item]) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn visible(&self) -> &[Item] {
        &self.visible
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn snapshot(&self) -> &[Item] {
        &self.snapshot
    }

    pub fn refresh(&mut self) -> EventOutcome {
        self.dispatch(Event::Refresh)
    }

    pub fn dispatch(&mut self, event: Event) -> EventOutcome {
        debug!(?event, "dispatching");
        match event {
            Event::Add(name) => self.mutate(&name, |api, n| api.add_item(n)),
            Event::Increment(name) => self.mutate(&name, |api, n| api.increment(n)),
            Event::Decrement(name) => self.mutate(&name, |api, n| api.decrement(n)),
            Event::SearchChanged(text) => {
                let mut next = self.state.clone();
                next.set_search(text);
                self.change_view(next)
            }
            Event::SortClicked(field) => {
                let mut next = self.state.clone();
                next.click_sort(field);
                self.change_view(next)
            }
            Event::ClearFilters => {
                let mut next = self.state.clone();
                next.clear();
                self.change_view(next)
            }
            Event::Refresh => self.change_view(self.state.clone()),
        }
    }

    fn change_view(&mut self, next: ViewState) -> EventOutcome {
        match self.api.snapshot() {
            Ok(records) => {
                self.state = next;
                self.snapshot = records;
                self.rederive();
                EventOutcome::Applied(None)
            }
            Err(e) => {
                error!(error = %e, "refreshing inventory failed");
                EventOutcome::Failed(e)
            }
        }
    }

    fn mutate<F>(&mut self, name: &str, op: F) -> EventOutcome
    where
        F: FnOnce(&mut TallyApi<S>, &str) -> Result<CmdResult>,
    {
        if name.trim().is_empty() {
            warn!("ignoring mutation with an empty item name");
            return EventOutcome::Ignored;
        }

        let result = match op(&mut self.api, name) {
            Ok(result) => result,
            Err(e) => {
                error!(item = name, error = %e, "updating item failed");
                return EventOutcome::Failed(e);
            }
        };
        debug!(item = name, mutation = ?result.mutation, "mutation applied");

        // The write landed; a failed re-fetch only leaves the view stale.
        if let Err(e) = self.fetch() {
            error!(error = %e, "refreshing inventory failed");
        }
        EventOutcome::Applied(Some(result))
    }

    fn fetch(&mut self) -> Result<()> {
        self.snapshot = self.api.snapshot()?;
        self.rederive();
        Ok(())
    }

    fn rederive(&mut self) {
        self.visible = self.state.derive(&self.snapshot);
        for observer in self.observers.iter_mut() {
            observer(&self.visible);
        }
    }
}
