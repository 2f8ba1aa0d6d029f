//! DTOs and payload types for backend requests/responses.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::SUCCESS_CODE;
use crate::error::{ApiError, SESSION_EXPIRED_CODE};
use crate::model::{User, UserRole};

/// The envelope every backend response is wrapped in.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(rename = "timeStamp", default)]
    pub time_stamp: Option<String>,

    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    pub(crate) fn empty() -> Self {
        Self {
            code: SUCCESS_CODE,
            message: None,
            time_stamp: None,
            result: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    fn failure(&self) -> ApiError {
        if self.code == SESSION_EXPIRED_CODE {
            return ApiError::Unauthorized;
        }
        ApiError::Api {
            status: 200,
            code: self.code,
            message: self.message.clone().unwrap_or_default(),
        }
    }

    /// The payload of a success-coded response.
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(self.failure());
        }
        self.result
            .ok_or_else(|| ApiError::Decode("success response without a result".to_string()))
    }

    /// For endpoints with no meaningful payload.
    pub fn into_unit(self) -> Result<(), ApiError> {
        if !self.is_success() {
            return Err(self.failure());
        }
        Ok(())
    }
}

/// `expireAt` arrives either as an ISO-8601 string or epoch milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    Text(String),
}

impl Timestamp {
    pub fn to_datetime(&self) -> Option<OffsetDateTime> {
        match self {
            Timestamp::Millis(ms) => {
                OffsetDateTime::from_unix_timestamp_nanos(i128::from(*ms) * 1_000_000).ok()
            }
            Timestamp::Text(s) => OffsetDateTime::parse(s, &Rfc3339).ok(),
        }
    }

    pub fn to_rfc3339(&self) -> String {
        match (self.to_datetime(), self) {
            (Some(dt), _) => dt.format(&Rfc3339).unwrap_or_else(|_| dt.to_string()),
            (None, Timestamp::Text(s)) => s.clone(),
            (None, Timestamp::Millis(ms)) => ms.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct AuthenticateRequest<'a> {
    pub(super) username: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct TokenRequest<'a> {
    pub(super) token: &'a str,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthenticateResponse {
    #[serde(default)]
    pub token: String,

    #[serde(rename = "expireAt", default)]
    pub expire_at: Option<Timestamp>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    #[serde(default)]
    pub token: String,

    #[serde(rename = "expireAt", default)]
    pub expire_at: Option<Timestamp>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IntrospectResponse {
    #[serde(rename = "isValid", default)]
    pub is_valid: bool,

    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

impl ApiResponse<AuthenticateResponse> {
    /// The issued token, if the response is a well-formed success.
    pub fn token_if_success(&self) -> Option<String> {
        if !self.is_success() {
            return None;
        }
        self.result
            .as_ref()
            .map(|r| r.token.clone())
            .filter(|t| !t.trim().is_empty())
    }
}

impl ApiResponse<RefreshResponse> {
    pub fn token_if_success(&self) -> Option<String> {
        if !self.is_success() {
            return None;
        }
        self.result
            .as_ref()
            .map(|r| r.token.clone())
            .filter(|t| !t.trim().is_empty())
    }
}

impl ApiResponse<IntrospectResponse> {
    /// Valid when success-coded and either flagged valid or naming a user.
    pub fn indicates_valid(&self) -> bool {
        self.is_success()
            && self
                .result
                .as_ref()
                .is_some_and(|r| r.is_valid || r.user_id.as_deref().is_some_and(|u| !u.is_empty()))
    }

    pub fn user_id(&self) -> Option<&str> {
        self.result
            .as_ref()
            .and_then(|r| r.user_id.as_deref())
            .filter(|u| !u.trim().is_empty())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoleResponse {
    #[serde(default)]
    pub id: String,

    #[serde(alias = "roleName")]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub permissions: Vec<PermissionResponse>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PermissionResponse {
    pub id: String,
    pub permission: String,

    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoleRequest {
    #[serde(rename = "roleName")]
    pub role_name: String,
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PermissionRequest {
    pub permission: String,
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,

    #[serde(default)]
    pub mail: String,

    #[serde(rename = "phoneNumber", default)]
    pub phone_number: Option<String>,

    /// `None` when the backend omits the flag; only an explicit `false`
    /// means the account is disabled.
    #[serde(default)]
    pub enable: Option<bool>,

    #[serde(default)]
    pub roles: Vec<RoleResponse>,

    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl UserResponse {
    pub fn is_disabled(&self) -> bool {
        self.enable == Some(false)
    }

    pub fn role(&self) -> UserRole {
        UserRole::from_role_names(self.roles.iter().map(|r| r.name.as_str()))
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: self.mail.clone(),
            username: self.username.clone(),
            role: self.role(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub mail: String,

    #[serde(rename = "phoneNumber")]
    pub phone_number: String,

    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserUpdateRequest {
    pub username: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    pub mail: String,

    #[serde(rename = "phoneNumber")]
    pub phone_number: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
}

impl UserUpdateRequest {
    /// Starts an update from the current record, keeping every field.
    pub fn from_user(user: &UserResponse) -> Self {
        Self {
            username: user.username.clone(),
            password: None,
            mail: user.mail.clone(),
            phone_number: user.phone_number.clone().unwrap_or_default(),
            enable: user.enable,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VideoResponse {
    pub id: String,

    #[serde(rename = "fileName", default)]
    pub file_name: String,

    #[serde(rename = "fileType", default)]
    pub file_type: String,

    #[serde(default)]
    pub size: u64,

    #[serde(default)]
    pub url: String,

    #[serde(rename = "secureUrl", default)]
    pub secure_url: String,

    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub height: Option<u32>,

    #[serde(default)]
    pub etag: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

/// A page of a paged listing; absent fields default.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,

    #[serde(rename = "totalPages", default)]
    pub total_pages: u64,

    #[serde(rename = "totalElements", default)]
    pub total_elements: u64,

    #[serde(default)]
    pub size: u64,

    #[serde(default)]
    pub number: u64,

    #[serde(default)]
    pub first: bool,

    #[serde(default)]
    pub last: bool,

    #[serde(default)]
    pub empty: bool,
}

#[cfg(test)]
#[path = "../tests/remote/types_tests.rs"]
mod tests;
