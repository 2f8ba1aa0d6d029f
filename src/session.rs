//! Session state shared by the HTTP client, the auth store and the guard.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::broadcast;

use crate::model::{User, non_empty};

mod auth_store;
pub use self::auth_store::AuthStore;

const EVENT_CAPACITY: usize = 64;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<User>,
    pub loading: bool,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A short user-facing message (the portal showed these as toasts).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new token was persisted by a login.
    TokenUpdated { token: String },
    /// Token and user were dropped together.
    Cleared,
    /// The host should move to `to`; `hard` means drop any in-page state.
    Navigate { to: String, hard: bool },
    Notice(Notice),
}

/// The single source of truth for `{token, user, loading}`.
///
/// Built once per application and handed to the client, store and guard.
/// The `{token, user}` pair only changes together through
/// [`SessionContext::update_session`] or the token-aware helpers, so a user is
/// never held without a token.
#[derive(Debug)]
pub struct SessionContext {
    state: RwLock<SessionState>,
    events: broadcast::Sender<SessionEvent>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: RwLock::new(SessionState::default()),
            events,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> SessionState {
        self.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().access_token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    /// Replaces token and user as one update.
    pub fn update_session(&self, token: Option<String>, user: Option<User>) {
        let token = non_empty(token.as_deref()).map(str::to_string);
        let mut st = self.write();
        st.user = if token.is_some() { user } else { None };
        st.access_token = token;
    }

    /// Sets the user for the current token. Refused when no token is held.
    pub fn set_user(&self, user: User) -> bool {
        let mut st = self.write();
        if st.access_token.is_none() {
            return false;
        }
        st.user = Some(user);
        true
    }

    /// Commits `user` only if `token` is still the current token.
    pub fn set_user_for_token(&self, token: &str, user: User) -> bool {
        let mut st = self.write();
        if st.access_token.as_deref() != Some(token) {
            return false;
        }
        st.user = Some(user);
        true
    }

    /// Clearing the token also drops the user.
    pub fn set_access_token(&self, token: Option<String>) {
        let token = non_empty(token.as_deref()).map(str::to_string);
        let mut st = self.write();
        if token.is_none() {
            st.user = None;
        }
        st.access_token = token;
    }

    pub fn set_refresh_token(&self, token: Option<String>) {
        self.write().refresh_token = non_empty(token.as_deref()).map(str::to_string);
    }

    pub fn set_loading(&self, loading: bool) {
        self.write().loading = loading;
    }

    pub fn clear_auth(&self) {
        let mut st = self.write();
        st.access_token = None;
        st.refresh_token = None;
        st.user = None;
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub(crate) fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    pub(crate) fn notify(&self, notice: Notice) {
        self.emit(SessionEvent::Notice(notice));
    }

    pub(crate) fn navigate(&self, to: &str, hard: bool) {
        self.emit(SessionEvent::Navigate {
            to: to.to_string(),
            hard,
        });
    }
}

#[cfg(test)]
#[path = "tests/session/context_tests.rs"]
mod tests;
