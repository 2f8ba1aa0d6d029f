use serde::{Deserialize, Serialize};

/// Durable token pair, stored under the `accessToken` / `refreshToken` keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTokens {
    pub version: u32,

    #[serde(rename = "accessToken", default)]
    pub access_token: Option<String>,

    // Never issued by the backend; kept for forward compatibility.
    #[serde(rename = "refreshToken", default)]
    pub refresh_token: Option<String>,
}

impl PersistedTokens {
    pub fn empty() -> Self {
        Self {
            version: 1,
            access_token: None,
            refresh_token: None,
        }
    }

    /// The stored access token, treating an empty string as absent.
    pub fn access(&self) -> Option<&str> {
        non_empty(self.access_token.as_deref())
    }

    pub fn refresh(&self) -> Option<&str> {
        non_empty(self.refresh_token.as_deref())
    }
}

pub(crate) fn non_empty(v: Option<&str>) -> Option<&str> {
    v.filter(|s| !s.trim().is_empty())
}

/// First few characters of a token, for log lines.
pub fn token_preview(token: &str) -> String {
    const PREVIEW: usize = 8;
    let head: String = token.chars().take(PREVIEW).collect();
    if token.chars().count() > PREVIEW {
        format!("{head}...")
    } else {
        head
    }
}
