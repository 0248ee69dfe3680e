//! # Tally Architecture
//!
//! Tally is a **UI-agnostic inventory library**: named items with counts,
//! kept in a document store, listed through a search box and sortable
//! columns. The `tally` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders tables, runs the shell loop    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (session.rs)                                       │
//! │  - UI events in, visible items out                          │
//! │  - Swallows and logs store failures, notifies observers     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs) + View (view.rs)             │
//! │  - Increment/decrement protocol, listing, config            │
//! │  - Pure view derivation: filter + sort                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract ItemStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `session.rs` inward, code takes regular Rust arguments, returns
//! regular Rust types, never writes to stdout/stderr and never exits the
//! process. Diagnostics go through `tracing`; installing a subscriber is the
//! client's job.
//!
//! ## Known Limitation
//!
//! Increment and decrement are a read followed by a separate write. With
//! several writers on one collection (two shells, two processes) updates can
//! be lost, last write wins. Fixing that needs an atomic counter or a
//! compare-and-set in the store.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`session`]: Event loop controller with observers
//! - [`commands`]: Business logic for each command
//! - [`view`]: Filter/sort derivation and view state
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: The `Item` record and name normalization
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and context wiring
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod session;
pub mod store;
pub mod view;
