//! Error taxonomy shared by the client, the session store and the guard.

use reqwest::StatusCode;

/// Application code for an expired or invalid session.
pub const SESSION_EXPIRED_CODE: i64 = 1001;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized (session invalid or expired; run `socialctl login`)")]
    Unauthorized,

    #[error("forbidden (insufficient permissions for this action)")]
    Forbidden,

    #[error("{0}")]
    Validation(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("api error {code} (http {status}): {message}")]
    Api {
        status: u16,
        code: i64,
        message: String,
    },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("token storage: {0}")]
    Storage(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    ClientError,
    ServerError,
    NetworkError,
    Authentication,
    Authorization,
}

impl ApiError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Unauthorized => ErrorCategory::Authentication,
            ApiError::Forbidden => ErrorCategory::Authorization,
            ApiError::Validation(_) => ErrorCategory::ClientError,
            ApiError::Network(err) => match err.status() {
                Some(status) => category_for_status(status),
                None => ErrorCategory::NetworkError,
            },
            ApiError::Api { status, code, .. } => {
                if *code == SESSION_EXPIRED_CODE {
                    return ErrorCategory::Authentication;
                }
                match StatusCode::from_u16(*status) {
                    // A 2xx carrying a non-success code is an application
                    // rejection of the request.
                    Ok(s) if s.is_success() && *code != UNEXPECTED_CODE => {
                        ErrorCategory::ClientError
                    }
                    Ok(s) => category_for_status(s),
                    Err(_) => ErrorCategory::ServerError,
                }
            }
            ApiError::Decode(_) | ApiError::Storage(_) => ErrorCategory::ServerError,
        }
    }

    /// Application code carried by the error, if any.
    pub fn code(&self) -> Option<i64> {
        match self {
            ApiError::Api { code, .. } => Some(*code),
            ApiError::Unauthorized => Some(SESSION_EXPIRED_CODE),
            _ => None,
        }
    }

    /// Errors that must drop the local session when they surface.
    pub fn is_session_invalidating(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Authentication | ErrorCategory::Authorization
        )
    }

    /// Short text suitable for a user-facing notice.
    pub fn user_message(&self) -> String {
        match self.category() {
            ErrorCategory::Authentication => {
                "Authentication required. Please login again.".to_string()
            }
            ErrorCategory::Authorization => {
                "You don't have permission to perform this action.".to_string()
            }
            ErrorCategory::NetworkError => {
                "Network error. Please check your connection.".to_string()
            }
            ErrorCategory::ServerError => "Server error. Please try again later.".to_string(),
            ErrorCategory::ClientError => match self {
                ApiError::Validation(msg) => msg.clone(),
                _ => message_for_code(self.code().unwrap_or(UNEXPECTED_CODE)).to_string(),
            },
        }
    }

    /// The message the server put in the response body, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Api { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

const UNEXPECTED_CODE: i64 = 9999;

/// Maps an application error code to a user-facing message.
pub fn message_for_code(code: i64) -> &'static str {
    match code {
        SESSION_EXPIRED_CODE => "Your session has expired. Please login again.",
        1101 => "User not found. Please check your account.",
        1102 => "Video not found. It may have been deleted.",
        1051 => "Invalid file. Please upload a valid video file.",
        1052 => "File upload failed. Please try again.",
        UNEXPECTED_CODE => "An unexpected error occurred. Please try again.",
        _ => "An error occurred. Please try again.",
    }
}

fn category_for_status(status: StatusCode) -> ErrorCategory {
    match status {
        StatusCode::UNAUTHORIZED => ErrorCategory::Authentication,
        StatusCode::FORBIDDEN => ErrorCategory::Authorization,
        s if s.is_client_error() => ErrorCategory::ClientError,
        _ => ErrorCategory::ServerError,
    }
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
