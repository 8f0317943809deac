//! Registration, login and session persistence

use perpustb::{
    config::{AppConfig, StorageBackend},
    storage::KeyValueStore,
    AppError, AppState,
};
use tokio_test::{assert_err, assert_ok};

use super::memory_state;

#[tokio::test]
async fn test_register_twice_keeps_directory_size() {
    let (store, state) = memory_state();
    let session = &state.services.session;

    assert_ok!(session.register("10001", "Andi", "andi@example.com", "rahasia").await);
    let before = store.get("@perpustb_users").await.unwrap().unwrap();

    let err = session
        .register("10001", "Andi Lain", "lain@example.com", "rahasia")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyRegistered(_)));

    let after = store.get("@perpustb_users").await.unwrap().unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_login_logout_restore() {
    let (store, state) = memory_state();
    let session = &state.services.session;

    assert_ok!(session.register("10002", "Sari", "sari@example.com", "rahasia").await);
    assert_ok!(session.logout().await);

    assert_err!(session.login("10002", "bukan").await);
    let user = assert_ok!(session.login("10002", "rahasia").await);
    assert_eq!(user.email, "sari@example.com");

    assert_ok!(session.logout().await);

    let restarted = AppState::with_store(AppConfig::default(), store.clone()).unwrap();
    assert!(restarted.services.session.restore_session().await.is_none());
}

#[tokio::test]
async fn test_session_survives_restart_on_file_storage() {
    let dir = std::env::temp_dir().join(format!("perpustb-it-{}", uuid::Uuid::new_v4()));
    let mut config = AppConfig::default();
    config.storage.backend = StorageBackend::File;
    config.storage.path = dir.clone();

    let state = AppState::open(config.clone()).await.unwrap();
    let user = state
        .services
        .session
        .register("10003", "Wayan", "wayan@example.com", "rahasia")
        .await
        .unwrap();
    drop(state);

    let state = AppState::open(config).await.unwrap();
    assert!(state.services.session.is_loading().await);
    assert_eq!(state.services.session.restore_session().await, Some(user));
    assert_ok!(state.services.session.login("10003", "rahasia").await);

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn test_user_facing_messages() {
    let (_, state) = memory_state();
    let err = state
        .services
        .session
        .login("10004", "rahasia")
        .await
        .unwrap_err();
    assert_eq!(
        err.user_message(),
        "NIPD atau password salah. Silakan coba lagi atau daftar akun baru."
    );
}
