//! Platform abstraction layer
//!
//! Handles browser/native differences for persistent storage. Timing and
//! input are fed in by the entry point.

pub mod storage;

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
pub use storage::{KeyValueStore, MemoryStore, StorageError};
