//! # CLI Behavior
//!
//! This is **one possible UI client** for tally, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation of the `tally` library.
//!
//! ## One-shot commands
//!
//! - `tally add green tea` adds "green tea" or bumps its count.
//! - `tally rm apple` takes one away and drops the item at zero.
//! - `tally` (no arguments) and `tally ls` print the inventory. `--search`
//!   filters by name, `--sort` picks the order, otherwise the configured
//!   `default-sort` applies.
//!
//! ## Shell
//!
//! `tally shell` reads one event per line (`add`, `+`, `-`, `search`,
//! `sort`, `clear`) and reprints the inventory after each change. Sorting on
//! the same column twice flips its direction, like clicking a table header.
//! When stdout is not a terminal the prompt is suppressed, so the shell can
//! be driven from a pipe.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `render`: Output formatting (tables, colors, messages)
//! - `setup`: Argument parsing via clap, logging setup
//! - `shell`: The interactive event loop

mod commands;
mod render;
mod setup;
mod shell;

pub use commands::run;
