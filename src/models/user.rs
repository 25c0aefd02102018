//! User model for storage.

use serde::{Deserialize, Serialize};

/// Registered user stored in the `Users` collection.
///
/// Never serialized into an API response; the password hash stays server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Document ID, assigned by the store on insert
    #[serde(default)]
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    /// Login key. Uniqueness is only checked before insert.
    pub email: String,
    /// Encoded PBKDF2 hash, see `services::password`
    pub password_hash: String,
    pub created_at: String,
}

impl User {
    /// Name shown in the session token.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}
