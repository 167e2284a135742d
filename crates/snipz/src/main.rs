//! # Snipz CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file only
//! invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/snipzapp/`: core library with the tree, store and API facade
//! - `crates/snipz/`: this CLI tool, a client of the `snipzapp` API
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/snipz/src/cli/)                          │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (handlers.rs)                  │
//! │  - Terminal rendering with console styles (render.rs)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/snipzapp/src/api.rs)                     │
//! │  - Returns Response values, never errors                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CLI is responsible for **all** user-facing concerns: argument parsing, log
//! subscriber setup, turning failed responses into a non-zero exit, and rendering.
//!
//! ## Testing Approach
//!
//! - Argument parsing and rendering are unit tested in `src/cli/`.
//! - `tests/` drives the real binary against a temporary data directory.

mod cli;
mod logging;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
