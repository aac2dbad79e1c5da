//! Error types for the M-Hike core library.

use thiserror::Error;

/// All errors that can occur within the M-Hike core library.
#[derive(Debug, Error)]
pub enum HikeLogError {
    /// A SQLite operation failed.
    ///
    /// Unique-email and foreign-key violations arrive here unchanged.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An operation was invoked before [`crate::HikeDatabase::initialize`]
    /// succeeded, or after [`crate::HikeDatabase::close`].
    #[error("Database not initialized")]
    NotInitialized,

    /// Opening the database or creating its schema failed.
    #[error("Database initialization failed: {0}")]
    Initialization(String),

    /// An INSERT completed without producing a new row.
    #[error("Failed to create {0}")]
    CreateFailed(String),

    /// A hike ID was requested that does not exist in the database.
    #[error("Hike not found: {0}")]
    HikeNotFound(i64),

    /// A stored or supplied value is outside its closed set or format.
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Convenience alias that pins the error type to [`HikeLogError`].
pub type Result<T> = std::result::Result<T, HikeLogError>;

impl HikeLogError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => format!("Failed to save: {e}"),
            Self::NotInitialized => "The hike database is not open".to_string(),
            Self::Initialization(_) => "Could not open the hike database".to_string(),
            Self::CreateFailed(what) => format!("Error creating {what}. Please try again."),
            Self::HikeNotFound(_) => "Hike no longer exists".to_string(),
            Self::InvalidValue(msg) => msg.clone(),
        }
    }
}
