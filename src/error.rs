//! Error types for the PerpusTB client core

use thiserror::Error;

/// Stable error codes exposed to the view layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    AlreadyRegistered = 2,
    InvalidCredentials = 3,
    StorageFailure = 4,
    NoSuchBook = 5,
    BookNotAvailable = 6,
    BadValue = 7,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("NIPD already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Invalid NIPD or password")]
    InvalidCredentials,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Numeric code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::AlreadyRegistered(_) => ErrorCode::AlreadyRegistered,
            AppError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AppError::Storage(_) | AppError::Serialization(_) => ErrorCode::StorageFailure,
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::NotFound(_) => ErrorCode::NoSuchBook,
            AppError::BusinessRule(_) => ErrorCode::BookNotAvailable,
            AppError::Internal(_) => ErrorCode::Failure,
        }
    }

    /// Static message shown in the blocking notification.
    ///
    /// Validation and business-rule messages are already written for the
    /// member; everything else collapses to a fixed text so storage details
    /// never reach the screen.
    pub fn user_message(&self) -> String {
        match self {
            AppError::AlreadyRegistered(_) => {
                "NIPD sudah terdaftar. Silakan gunakan NIPD lain atau login.".to_string()
            }
            AppError::InvalidCredentials => {
                "NIPD atau password salah. Silakan coba lagi atau daftar akun baru.".to_string()
            }
            AppError::Validation(msg) | AppError::BusinessRule(msg) => msg.clone(),
            AppError::NotFound(_) => "Buku tidak ditemukan".to_string(),
            AppError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                "Terjadi kesalahan penyimpanan. Silakan coba lagi.".to_string()
            }
            AppError::Serialization(e) => {
                tracing::error!("Serialization error: {:?}", e);
                "Terjadi kesalahan penyimpanan. Silakan coba lagi.".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Terjadi kesalahan. Silakan coba lagi.".to_string()
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join("; "))
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
