use std::sync::Arc;

use tracing::{error, info, warn};

use super::{Notice, SessionContext, SessionEvent};
use crate::error::ApiError;
use crate::model::{User, token_preview};
use crate::remote::ApiClient;
use crate::store::TokenStorage;

pub const CREDENTIALS_REQUIRED: &str = "Username and password are required";
pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const LOGIN_FAILED: &str = "Login failed";
pub const LOGOUT_SUCCESS: &str = "Logged out successfully!";
pub const LOGOUT_FAILED: &str = "Logout failed!";

/// Login, logout and restore on top of the shared [`SessionContext`].
///
/// None of these operations return errors: failures become notices and log
/// lines, and the context is left consistent.
#[derive(Clone, Debug)]
pub struct AuthStore {
    client: ApiClient,
}

impl AuthStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn session(&self) -> &Arc<SessionContext> {
        self.client.session()
    }

    fn storage(&self) -> &Arc<dyn TokenStorage> {
        self.client.storage()
    }

    /// Loads persisted tokens into the context. Returns whether a token was
    /// found.
    pub fn restore(&self) -> bool {
        let tokens = match self.storage().read_tokens() {
            Ok(t) => t,
            Err(err) => {
                warn!(error = %format!("{:#}", err), "failed to read persisted tokens");
                return false;
            }
        };
        let session = self.session();
        session.set_refresh_token(tokens.refresh().map(str::to_string));
        match tokens.access() {
            Some(token) => {
                session.set_access_token(Some(token.to_string()));
                true
            }
            None => {
                session.update_session(None, None);
                false
            }
        }
    }

    /// Exchanges credentials for a token. `loading` is held for the duration.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        let session = self.session();
        session.set_loading(true);
        let ok = self.try_login(username, password).await;
        session.set_loading(false);
        ok
    }

    async fn try_login(&self, username: &str, password: &str) -> bool {
        let session = self.session();
        if username.trim().is_empty() || password.is_empty() {
            session.notify(Notice::error(CREDENTIALS_REQUIRED));
            return false;
        }

        info!(username = %username, "login attempt");
        let resp = match self.client.authenticate(username, password).await {
            Ok(resp) => resp,
            Err(err) => {
                error!(username = %username, error = %err, "login request failed");
                let message = err.server_message().unwrap_or(LOGIN_FAILED);
                session.notify(Notice::error(message));
                return false;
            }
        };

        let Some(token) = resp.token_if_success() else {
            warn!(username = %username, code = resp.code, "login rejected");
            let message = resp
                .message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(INVALID_CREDENTIALS);
            session.notify(Notice::error(message));
            return false;
        };

        if let Err(err) = self.persist_login(&token) {
            error!(error = %err, "failed to persist login token");
            session.notify(Notice::error(LOGIN_FAILED));
            return false;
        }

        // Persisted above, so subscribers that read storage see the new token.
        session.update_session(Some(token.clone()), None);
        session.set_refresh_token(None);
        session.emit(SessionEvent::TokenUpdated {
            token: token.clone(),
        });
        info!(username = %username, token = %token_preview(&token), "login succeeded");
        session.notify(Notice::success(LOGIN_SUCCESS));
        true
    }

    fn persist_login(&self, token: &str) -> Result<(), ApiError> {
        let storage = self.storage();
        storage
            .write_access_token(Some(token))
            .and_then(|_| storage.write_refresh_token(None))
            .map_err(|e| ApiError::Storage(format!("{:#}", e)))
    }

    /// Revokes the token server-side when possible, then always drops the
    /// local session.
    pub async fn logout(&self) {
        let session = self.session();
        let token = session
            .access_token()
            .or_else(|| self.storage().access_token().ok().flatten());

        if let Some(token) = token {
            match self.client.logout(&token).await {
                Ok(()) => {
                    info!("logged out");
                    session.notify(Notice::success(LOGOUT_SUCCESS));
                }
                Err(err) => {
                    warn!(error = %err, "logout request failed");
                    session.notify(Notice::error(LOGOUT_FAILED));
                }
            }
        }

        if let Err(err) = self.storage().clear_tokens() {
            warn!(error = %format!("{:#}", err), "failed to clear persisted tokens");
        }
        session.clear_auth();
        session.emit(SessionEvent::Cleared);
    }

    pub fn set_user(&self, user: User) -> bool {
        self.session().set_user(user)
    }

    /// Persists and commits a token obtained elsewhere.
    pub fn set_access_token(&self, token: Option<String>) -> bool {
        if let Err(err) = self.storage().write_access_token(token.as_deref()) {
            warn!(error = %format!("{:#}", err), "failed to persist access token");
            return false;
        }
        self.session().set_access_token(token);
        true
    }

    pub fn set_refresh_token(&self, token: Option<String>) -> bool {
        if let Err(err) = self.storage().write_refresh_token(token.as_deref()) {
            warn!(error = %format!("{:#}", err), "failed to persist refresh token");
            return false;
        }
        self.session().set_refresh_token(token);
        true
    }

    pub fn set_loading(&self, loading: bool) {
        self.session().set_loading(loading);
    }

    pub fn clear_auth(&self) {
        if let Err(err) = self.storage().clear_tokens() {
            warn!(error = %format!("{:#}", err), "failed to clear persisted tokens");
        }
        self.session().clear_auth();
        self.session().emit(SessionEvent::Cleared);
    }
}
