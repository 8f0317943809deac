//! Integration tests driving the public API through `AppState`

mod borrowing;
mod session_flow;

use std::sync::Arc;

use perpustb::{storage::MemoryStore, AppConfig, AppState};

/// State over a fresh in-memory store
pub fn memory_state() -> (Arc<MemoryStore>, AppState) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::with_store(AppConfig::default(), store.clone())
        .expect("bundled catalog should load");
    (store, state)
}
