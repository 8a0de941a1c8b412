//! Key-value persistence seam
//!
//! The controller and favorites only need to read and write one JSON blob
//! per namespaced key. `JsonFileStore` backs the binary; `MemoryStore` backs
//! tests and ephemeral sessions.

mod file;
mod memory;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the blob stored under `key`, `None` when absent
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
