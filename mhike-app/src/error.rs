//! Errors surfaced to the UI shell.

use mhike_core::HikeLogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The persistence layer failed; carried through unchanged.
    #[error(transparent)]
    Core(#[from] HikeLogError),

    /// Registration was attempted with an email that already has an account.
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    /// Unknown email or wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Text for the blocking notification shown when an action fails.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Core(e) => e.user_message(),
            Self::EmailTaken(_) => "Email already registered".to_string(),
            Self::InvalidCredentials => "Invalid email or password".to_string(),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Settings format error: {e}"),
        }
    }
}
