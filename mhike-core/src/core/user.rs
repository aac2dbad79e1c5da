//! Account records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A registered account as stored in the `users` table.
///
/// `password` is kept and compared as plain text. Introducing hashing would
/// make existing databases unreadable to the login check, so it is left as
/// stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// Input for [`crate::HikeDatabase::create_user`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl NewUser {
    pub fn new(email: impl Into<String>, password: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
        }
    }
}
