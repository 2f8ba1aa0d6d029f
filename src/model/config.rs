use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8082/api/v1";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// 20 MiB, the portal's upload cap.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 20 * 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub version: u32,

    /// Backend base URL including the `/api/v1` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub routes: RouteConfig,

    #[serde(default)]
    pub upload: UploadLimits,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: 1,
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            routes: RouteConfig::default(),
            upload: UploadLimits::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub login: String,
    pub dashboard: String,

    /// Any route starting with this prefix needs a valid session.
    pub protected_prefix: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            dashboard: "/admin/dashboard".to_string(),
            protected_prefix: "/admin".to_string(),
        }
    }
}

impl RouteConfig {
    pub fn is_protected(&self, route: &str) -> bool {
        route.starts_with(&self.protected_prefix)
    }

    pub fn is_login(&self, route: &str) -> bool {
        route == self.login
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadLimits {
    /// Largest accepted upload, in bytes.
    pub max_file_size: u64,

    /// Content types must start with this prefix.
    pub allowed_type_prefix: String,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_type_prefix: "video/".to_string(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}
