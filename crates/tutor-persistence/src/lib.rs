//! Persistence layer for the tutor engine.
//!
//! All per-student state (progress, score records, session snapshots)
//! goes through the repository traits in [`repository`]. Two backends
//! are provided: [`FileStore`] writes crash-safe JSON files (write to a
//! temp file, then rename), and [`MemoryStore`] keeps everything in an
//! in-process map for tests and embedded use.
//!
//! Cross-student isolation is purely a matter of key layout: every
//! stored value is namespaced by the student's id.
//!
//! # Example
//!
//! ```no_run
//! use tutor_persistence::{FileStore, ProgressRepository};
//! use tutor_models::{Progress, UserId};
//!
//! let store = FileStore::new("/home/user/.tutor");
//! let user = UserId::from_string("user-1");
//!
//! let progress = store.load_progress(&user).unwrap().unwrap_or_default();
//! store.store_progress(&user, &progress).unwrap();
//! ```

pub mod atomic;
pub mod error;
pub mod file_store;
pub mod memory_store;
pub mod repository;

pub use error::{PersistenceError, Result};
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use repository::{ProgressRepository, ScoreRepository, SnapshotRepository};
