//! Authentication and session service

use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use snowflaked::sync::Generator;
use tokio::sync::{Mutex, RwLock};

use crate::{
    error::{AppError, AppResult},
    models::user::{LoginRequest, RegisterUser, SessionUser, UserRecord},
    repository::Repository,
};

static USER_IDS: Generator = Generator::new(0);

#[derive(Debug)]
struct SessionState {
    user: Option<SessionUser>,
    loading: bool,
}

#[derive(Clone)]
pub struct SessionService {
    repository: Repository,
    state: Arc<RwLock<SessionState>>,
    // Serializes every write to the directory and session keys
    write_lock: Arc<Mutex<()>>,
}

impl SessionService {
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            state: Arc::new(RwLock::new(SessionState {
                user: None,
                loading: true,
            })),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Currently authenticated user
    pub async fn current_user(&self) -> Option<SessionUser> {
        self.state.read().await.user.clone()
    }

    /// True until [`SessionService::restore_session`] has finished
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Register a new member and sign them in
    pub async fn register(
        &self,
        nipd: &str,
        name: &str,
        email: &str,
        password: &str,
    ) -> AppResult<SessionUser> {
        self.register_user(RegisterUser::new(nipd, name, email, password))
            .await
    }

    /// Register from a full form, including the optional password confirmation
    pub async fn register_user(&self, form: RegisterUser) -> AppResult<SessionUser> {
        form.check()?;

        let _guard = self.write_lock.lock().await;

        let mut users = self.repository.users.get_all().await?;
        if users.iter().any(|u| u.nipd == form.nipd) {
            tracing::warn!("Registration rejected: NIPD {} already registered", form.nipd);
            return Err(AppError::AlreadyRegistered(form.nipd));
        }

        let record = UserRecord {
            id: USER_IDS.generate::<u64>().to_string(),
            password: self.hash_password(&form.password)?,
            nipd: form.nipd,
            name: form.name,
            email: form.email,
        };
        let session = SessionUser::from(&record);

        users.push(record);
        self.repository.users.save_all(&users).await?;

        if let Err(e) = self.repository.users.save_session(&session).await {
            // Keep the directory as it was before this call
            users.pop();
            if let Err(rollback) = self.repository.users.save_all(&users).await {
                tracing::error!(
                    "Failed to roll back registration of {}: {}",
                    session.nipd,
                    rollback
                );
            }
            return Err(e);
        }

        self.state.write().await.user = Some(session.clone());
        tracing::info!("Registered member {} ({})", session.nipd, session.id);

        Ok(session)
    }

    /// Sign in with NIPD and password
    pub async fn login(&self, nipd: &str, password: &str) -> AppResult<SessionUser> {
        let request = LoginRequest::new(nipd, password);
        request.check()?;

        let _guard = self.write_lock.lock().await;

        let mut users = self.repository.users.get_all().await?;
        let Some(index) = users.iter().position(|u| u.nipd == request.nipd) else {
            tracing::warn!("Login rejected: unknown NIPD {}", request.nipd);
            return Err(AppError::InvalidCredentials);
        };

        if !self.verify_password(&users[index], &request.password)? {
            tracing::warn!("Login rejected: wrong password for {}", request.nipd);
            return Err(AppError::InvalidCredentials);
        }

        if !users[index].has_hashed_password() {
            self.upgrade_password(&mut users, index, &request.password)
                .await;
        }

        let session = SessionUser::from(&users[index]);
        self.repository.users.save_session(&session).await?;
        self.state.write().await.user = Some(session.clone());
        tracing::info!("Member {} logged in", session.nipd);

        Ok(session)
    }

    /// Forget the current session, on disk and in memory
    pub async fn logout(&self) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        let result = self.repository.users.clear_session().await;
        let previous = self.state.write().await.user.take();

        match &result {
            Ok(()) => {
                if let Some(user) = previous {
                    tracing::info!("Member {} logged out", user.nipd);
                }
            }
            Err(e) => tracing::error!("Failed to clear persisted session: {}", e),
        }

        result
    }

    /// Rehydrate the session persisted by a previous run
    pub async fn restore_session(&self) -> Option<SessionUser> {
        let _guard = self.write_lock.lock().await;

        let restored = match self.repository.users.get_session().await {
            Ok(user) => user,
            Err(AppError::Serialization(e)) => {
                tracing::warn!("Discarding unreadable persisted session: {}", e);
                if let Err(e) = self.repository.users.clear_session().await {
                    tracing::error!("Failed to clear persisted session: {}", e);
                }
                None
            }
            Err(e) => {
                tracing::error!("Error loading current user: {}", e);
                None
            }
        };

        let mut state = self.state.write().await;
        state.user = restored.clone();
        state.loading = false;

        if let Some(ref user) = restored {
            tracing::info!("Restored session for {}", user.nipd);
        }
        restored
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored record
    fn verify_password(&self, user: &UserRecord, password: &str) -> AppResult<bool> {
        if user.has_hashed_password() {
            let parsed_hash = PasswordHash::new(&user.password)
                .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
            return Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok());
        }

        // Directories written before hashing was introduced
        Ok(user.password == password)
    }

    /// Replace a cleartext password with its hash. Failure only costs the upgrade.
    async fn upgrade_password(&self, users: &mut [UserRecord], index: usize, password: &str) {
        let hash = match self.hash_password(password) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!("Password upgrade skipped: {}", e);
                return;
            }
        };

        let previous = std::mem::replace(&mut users[index].password, hash);
        match self.repository.users.save_all(users).await {
            Ok(()) => tracing::info!("Upgraded stored password of {}", users[index].nipd),
            Err(e) => {
                users[index].password = previous;
                tracing::warn!("Password upgrade for {} not saved: {}", users[index].nipd, e);
            }
        }
    }
}
