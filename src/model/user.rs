use serde::{Deserialize, Serialize};

/// Role name the backend attaches to administrators.
pub const ADMIN_ROLE: &str = "ADMIN";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Moderator,
}

impl UserRole {
    /// `Admin` if any attached role is the admin sentinel, else `Moderator`.
    pub fn from_role_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        if names.into_iter().any(|n| n == ADMIN_ROLE) {
            UserRole::Admin
        } else {
            UserRole::Moderator
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Moderator => "moderator",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The signed-in user as derived from the backend's user record.
///
/// Held in memory only; it is dropped whenever the token is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub role: UserRole,
}

#[cfg(test)]
#[path = "../tests/model/user_tests.rs"]
mod tests;
