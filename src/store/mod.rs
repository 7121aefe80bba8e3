//! Key-value persistence
//!
//! The host app owns durable storage; this crate only talks to it through
//! [`KeyValueStore`]. Keys and values are plain strings, structured data is
//! serialized by the caller before it gets here.

mod file;
mod lock;
mod memory;

pub use file::JsonFileStore;
pub use lock::KeyedLock;
pub use memory::MemoryStore;

use crate::error::StoreError;
use async_trait::async_trait;

/// Asynchronous string key-value store.
///
/// Every call may fail; implementations report failures as [`StoreError`]
/// and never panic on missing keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` means the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove several keys. Missing keys are ignored.
    async fn multi_remove(&self, keys: &[String]) -> Result<(), StoreError>;

    /// List every key currently stored
    async fn all_keys(&self) -> Result<Vec<String>, StoreError>;
}
