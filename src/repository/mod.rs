//! Repository layer: typed JSON documents over the key-value store

pub mod users;

use std::sync::Arc;

use crate::storage::KeyValueStore;

/// Main repository struct; each sub-repository shares the injected store
#[derive(Clone)]
pub struct Repository {
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a repository whose keys all start with `key_prefix`
    pub fn new(store: Arc<dyn KeyValueStore>, key_prefix: &str) -> Self {
        Self {
            users: users::UsersRepository::new(store, key_prefix),
        }
    }
}
