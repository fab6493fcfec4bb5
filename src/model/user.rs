use serde::{Deserialize, Serialize};

/// A registered account. The on-disk field names are camelCase because the
/// collection files predate this crate and are shared with external tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    /// Argon2 hash, never the plaintext password.
    pub password: String,
    pub role: String,
    pub name: String,
    pub onboarding_completed: bool,
    pub created_at: String,
    pub last_login: String,
    pub is_active: bool,
}

/// Creation payload for a user record. Omitted optional fields fall back to
/// the collection defaults (role "user", empty name).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
