//! User directory and session persistence

use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::user::{SessionUser, UserRecord},
    storage::KeyValueStore,
};

#[derive(Clone)]
pub struct UsersRepository {
    store: Arc<dyn KeyValueStore>,
    users_key: String,
    current_user_key: String,
}

impl UsersRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, key_prefix: &str) -> Self {
        Self {
            store,
            users_key: format!("{}users", key_prefix),
            current_user_key: format!("{}current_user", key_prefix),
        }
    }

    pub fn users_key(&self) -> &str {
        &self.users_key
    }

    pub fn current_user_key(&self) -> &str {
        &self.current_user_key
    }

    /// Load the whole user directory; an absent key is an empty directory
    pub async fn get_all(&self) -> AppResult<Vec<UserRecord>> {
        let Some(json) = self.store.get(&self.users_key).await? else {
            return Ok(Vec::new());
        };

        let users: Vec<UserRecord> = serde_json::from_str(&json)?;

        let mut seen = HashSet::new();
        for user in &users {
            user.check()?;
            if !seen.insert(user.nipd.as_str()) {
                return Err(AppError::Validation(format!(
                    "User directory holds NIPD {} twice",
                    user.nipd
                )));
            }
        }

        Ok(users)
    }

    /// Find a user by exact NIPD
    pub async fn get_by_nipd(&self, nipd: &str) -> AppResult<Option<UserRecord>> {
        Ok(self.get_all().await?.into_iter().find(|u| u.nipd == nipd))
    }

    /// Replace the whole user directory
    pub async fn save_all(&self, users: &[UserRecord]) -> AppResult<()> {
        let json = serde_json::to_string(users)?;
        self.store.set(&self.users_key, &json).await
    }

    /// Persisted session, if any
    pub async fn get_session(&self) -> AppResult<Option<SessionUser>> {
        match self.store.get(&self.current_user_key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub async fn save_session(&self, user: &SessionUser) -> AppResult<()> {
        let json = serde_json::to_string(user)?;
        self.store.set(&self.current_user_key, &json).await
    }

    pub async fn clear_session(&self) -> AppResult<()> {
        self.store.remove(&self.current_user_key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn record(id: &str, nipd: &str) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            nipd: nipd.to_string(),
            name: "Rina".to_string(),
            email: "rina@example.com".to_string(),
            password: "secret".to_string(),
        }
    }

    fn repository() -> (Arc<MemoryStore>, UsersRepository) {
        let store = Arc::new(MemoryStore::new());
        let repo = UsersRepository::new(store.clone(), "@perpustb_");
        (store, repo)
    }

    #[tokio::test]
    async fn test_keys() {
        let (_, repo) = repository();
        assert_eq!(repo.users_key(), "@perpustb_users");
        assert_eq!(repo.current_user_key(), "@perpustb_current_user");
    }

    #[tokio::test]
    async fn test_directory_roundtrip() {
        let (store, repo) = repository();
        assert!(repo.get_all().await.unwrap().is_empty());

        repo.save_all(&[record("1", "11111"), record("2", "22222")])
            .await
            .unwrap();

        let raw = store.get("@perpustb_users").await.unwrap().unwrap();
        assert!(raw.starts_with('['));
        assert_eq!(repo.get_all().await.unwrap().len(), 2);
        assert_eq!(
            repo.get_by_nipd("22222").await.unwrap().map(|u| u.id),
            Some("2".to_string())
        );
        assert!(repo.get_by_nipd("33333").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_nipd_in_directory_is_rejected() {
        let (store, repo) = repository();
        let json = serde_json::to_string(&[record("1", "11111"), record("2", "11111")]).unwrap();
        store.set("@perpustb_users", &json).await.unwrap();

        assert!(matches!(repo.get_all().await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_untyped_directory_is_rejected() {
        let (store, repo) = repository();
        store
            .set("@perpustb_users", r#"[{"nipd": "11111"}]"#)
            .await
            .unwrap();

        assert!(matches!(repo.get_all().await, Err(AppError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let (_, repo) = repository();
        assert!(repo.get_session().await.unwrap().is_none());

        let session = SessionUser::from(&record("1", "11111"));
        repo.save_session(&session).await.unwrap();
        assert_eq!(repo.get_session().await.unwrap(), Some(session));

        repo.clear_session().await.unwrap();
        assert!(repo.get_session().await.unwrap().is_none());
    }
}
