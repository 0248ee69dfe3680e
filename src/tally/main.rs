//! # Tally CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! Everything in the `tally` library is UI agnostic. The CLI layer owns the
//! user-facing concerns: argument parsing, context initialization, log
//! subscriber setup, dispatch, error reporting and rendering.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
