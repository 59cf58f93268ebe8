//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time
//! - Key-value storage (LocalStorage on web, in-memory natively)

pub mod storage;
pub mod time;

pub use storage::{KeyValueStorage, MemoryStorage, StorageError};
pub use time::now_ms;

#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStorage;
