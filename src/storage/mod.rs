//! Device-local key-value storage
//!
//! Services never talk to a backend directly; they receive a
//! [`KeyValueStore`] at construction so tests can swap in memory or a mock.

pub mod file;
pub mod memory;
pub mod redis;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    config::{StorageBackend, StorageConfig},
    error::AppResult,
};

pub use file::FileStore;
pub use memory::MemoryStore;
pub use self::redis::RedisStore;

/// Async string store addressed by key
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value under `key`, or `None` when absent
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Removing an absent key is not an error
    async fn remove(&self, key: &str) -> AppResult<()>;
}

/// Open the backend selected in configuration
pub async fn open(config: &StorageConfig) -> AppResult<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::File => Arc::new(FileStore::open(&config.path).await?),
        StorageBackend::Redis => Arc::new(RedisStore::new(&config.redis_url).await?),
    };
    tracing::info!("Opened {:?} storage backend", config.backend);
    Ok(store)
}
