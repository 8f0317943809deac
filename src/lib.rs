//! PerpusTB library client core
//!
//! Member registration and login with a persisted session, the bundled book
//! catalog, a wishlist, and borrow/return bookkeeping with due dates. All
//! durable state goes through an injected key-value store.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod repository;
pub mod services;
pub mod storage;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared with the view layer
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Open the configured store and build every service on top of it
    pub async fn open(config: AppConfig) -> AppResult<Self> {
        let store = storage::open(&config.storage).await?;
        Self::with_store(config, store)
    }

    /// Build the state over an already-open store
    pub fn with_store(
        config: AppConfig,
        store: Arc<dyn storage::KeyValueStore>,
    ) -> AppResult<Self> {
        let repository = repository::Repository::new(store, &config.storage.key_prefix);
        let services = services::Services::new(repository, config.borrowing.clone())?;
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }
}
