//! # Snipz Architecture
//!
//! Snipz is a **UI-agnostic snippet library**. Snippets (named text bodies) are kept in
//! a tree of folders, addressed by folder-name paths, and persisted as one versioned
//! JSON document. The bundled CLI is just one client; a browser extension's message
//! handler is another.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (snipz CLI, message handler)                        │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Turns every outcome into a Response value                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Tree mutations over &mut Folder                          │
//! │  - Validate first, then apply, then reindex                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/ + codec.rs)                          │
//! │  - RootStore owns the tree behind a RwLock                  │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Indexes
//!
//! Every node carries a positional index from a pre-order walk of the tree. Indexes
//! are recomputed after every mutation and never stored. See [`index`].
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types
//! - **Never** writes to stdout/stderr
//! - Emits `tracing` events and leaves subscriber setup to the client
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Create, edit, delete, folder creation and search
//! - [`store`]: Root store and storage backends
//! - [`codec`]: Persisted format, versions and upgrades
//! - [`model`]: Core data types (`Folder`, `Snippet`, `Node`)
//! - [`index`]: Pre-order indexing and flattened views
//! - [`settings`]: User preferences carried with the snippets
//! - [`config`]: Process configuration
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod settings;
pub mod store;
