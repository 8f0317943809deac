//! User model and related types

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Member record as persisted in the user directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    /// Member identification number, unique across the directory
    pub nipd: String,
    pub name: String,
    pub email: String,
    /// Argon2 PHC string. Older directories may still hold cleartext here.
    pub password: String,
}

impl UserRecord {
    /// Field checks applied to records read back from storage
    pub fn check(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::Validation("User record without id".to_string()));
        }
        if self.nipd.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "User record {} without NIPD",
                self.id
            )));
        }
        Ok(())
    }

    /// Whether the password field holds a PHC hash rather than cleartext
    pub fn has_hashed_password(&self) -> bool {
        self.password.starts_with("$argon2")
    }
}

/// Authenticated user, i.e. a [`UserRecord`] without its password
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub nipd: String,
    pub name: String,
    pub email: String,
}

impl From<&UserRecord> for SessionUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id.clone(),
            nipd: record.nipd.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
        }
    }
}

/// Registration form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(length(min = 5, message = "NIPD minimal 5 karakter"))]
    pub nipd: String,
    #[validate(length(min = 3, message = "Nama minimal 3 karakter"))]
    pub name: String,
    #[validate(email(message = "Format email tidak valid"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password minimal 6 karakter"))]
    pub password: String,
    /// Repeated password, checked when the form provides one
    pub password_confirmation: Option<String>,
}

impl RegisterUser {
    pub fn new(nipd: &str, name: &str, email: &str, password: &str) -> Self {
        Self {
            nipd: nipd.to_string(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
            password_confirmation: None,
        }
    }

    pub fn with_confirmation(mut self, confirmation: &str) -> Self {
        self.password_confirmation = Some(confirmation.to_string());
        self
    }

    /// Run every registration rule, in the order the form reports them
    pub fn check(&self) -> AppResult<()> {
        if self.nipd.trim().is_empty()
            || self.name.is_empty()
            || self.email.is_empty()
            || self.password.is_empty()
        {
            return Err(AppError::Validation("Silakan isi semua field".to_string()));
        }

        self.validate()?;

        if let Some(ref confirmation) = self.password_confirmation {
            if confirmation != &self.password {
                return Err(AppError::Validation("Password tidak cocok".to_string()));
            }
        }

        Ok(())
    }
}

/// Login form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Silakan isi NIPD dan password"))]
    pub nipd: String,
    #[validate(length(min = 1, message = "Silakan isi NIPD dan password"))]
    pub password: String,
}

impl LoginRequest {
    pub fn new(nipd: &str, password: &str) -> Self {
        Self {
            nipd: nipd.to_string(),
            password: password.to_string(),
        }
    }

    /// Both fields must be non-blank; the NIPD itself is matched untrimmed
    pub fn check(&self) -> AppResult<()> {
        if self.nipd.trim().is_empty() {
            return Err(AppError::Validation(
                "Silakan isi NIPD dan password".to_string(),
            ));
        }
        self.validate()?;
        Ok(())
    }
}
