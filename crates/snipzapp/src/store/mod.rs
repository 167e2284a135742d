//! # Storage Layer
//!
//! The snippet tree lives in memory, owned by a [`RootStore`]. Storage is a single
//! JSON document (see [`crate::codec`]) written through a [`StorageBackend`].
//!
//! ## Split of Responsibilities
//!
//! - [`StorageBackend`]: the "how". Reads and writes one opaque payload.
//! - [`RootStore`]: the "what". Holds the tree and settings, serializes mutations,
//!   encodes the document and decides when to write.
//!
//! ## Write Path
//!
//! ```text
//! mutate(op) ──write lock──► op(&mut root) ──Err──► return error, nothing written
//!                                 │
//!                                 Ok
//!                                 ▼
//!                    encode ──► backend.save ──fail──► retry up to persist_retries
//!                                 │                        │
//!                                 ▼                        ▼
//!                           dirty = false       dirty = true, persist_error
//! ```
//!
//! A failed write never undoes the in-memory change. The mutation result is returned
//! together with the persistence failure, and the store stays dirty until
//! [`RootStore::flush`] succeeds.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one file on disk, replaced atomically.
//! - [`mem_backend::MemBackend`]: for tests, with injectable write failures.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── snipz.toml       # Optional configuration
//! └── snippets.json    # The whole tree plus settings
//! ```

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod root_store;

pub use backend::StorageBackend;
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;
pub use root_store::{Committed, RootStore, StoreOptions};
