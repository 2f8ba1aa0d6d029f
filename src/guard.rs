//! Reconciles stored credentials with the loaded user and drives redirects.

use std::future::Future;

use tokio::sync::{Mutex, broadcast, watch};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::model::{RouteConfig, User, token_preview};
use crate::remote::ApiClient;
use crate::session::SessionEvent;

/// What the host should do after a reconciliation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Redirect(String),
    /// A validated session is on a protected route.
    Allow,
    /// Nothing to do.
    Idle,
}

enum Validation {
    Valid(User),
    Invalid(&'static str),
    Failed(ApiError),
}

// A token that rotates mid-validation (a login or refresh) is revalidated at
// most this many extra times.
const MAX_REVALIDATIONS: usize = 1;

#[derive(Debug)]
pub struct SessionGuard {
    client: ApiClient,
    in_flight: Mutex<()>,
}

impl SessionGuard {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            in_flight: Mutex::new(()),
        }
    }

    fn routes(&self) -> &RouteConfig {
        &self.client.config().routes
    }

    /// One pass of the guard state machine for `route`.
    ///
    /// Passes are serialized. A validation result, valid or not, is only
    /// acted on if the session still holds the token that was validated;
    /// otherwise the new token is validated instead.
    pub async fn reconcile(&self, route: &str) -> GuardOutcome {
        let _pass = self.in_flight.lock().await;
        let session = self.client.session();

        let mut attempts = 0;
        loop {
            let state = session.snapshot();
            let token = match state.access_token {
                Some(token) => token,
                None => match self.client.storage().access_token() {
                    Ok(Some(stored)) => {
                        session.set_access_token(Some(stored.clone()));
                        stored
                    }
                    Ok(None) => return self.no_session(route),
                    Err(err) => {
                        warn!(error = %format!("{:#}", err), "failed to read stored token");
                        return self.no_session(route);
                    }
                },
            };

            if state.user.is_some() {
                return self.satisfied(route);
            }

            debug!(route = %route, token = %token_preview(&token), "validating session");
            let verdict = self.validate(&token).await;
            // A login or refresh may have replaced the token while it was
            // being validated; a verdict about an old token is never acted on.
            let current = session.access_token().as_deref() == Some(token.as_str());
            match verdict {
                Validation::Valid(user) => {
                    let username = user.username.clone();
                    if session.set_user_for_token(&token, user) {
                        info!(user = %username, route = %route, "session validated");
                        return self.satisfied(route);
                    }
                }
                Validation::Invalid(reason) if current => {
                    warn!(route = %route, reason, "session invalid");
                    return self.invalidate(route);
                }
                Validation::Failed(err) if current && self.routes().is_login(route) => {
                    debug!(error = %err, "validation failed on the login route; session kept");
                    return GuardOutcome::Idle;
                }
                Validation::Failed(err) if current => {
                    warn!(route = %route, error = %err, "session validation failed");
                    return self.invalidate(route);
                }
                Validation::Invalid(_) | Validation::Failed(_) => {}
            }

            if attempts >= MAX_REVALIDATIONS || session.access_token().is_none() {
                debug!("session changed during validation; result discarded");
                return GuardOutcome::Idle;
            }
            attempts += 1;
        }
    }

    async fn validate(&self, token: &str) -> Validation {
        let introspection = match self.client.introspect(token).await {
            Ok(resp) => resp,
            Err(err) => return Validation::Failed(err),
        };
        if !introspection.indicates_valid() {
            return Validation::Invalid("token rejected by introspection");
        }
        let Some(user_id) = introspection.user_id() else {
            return Validation::Invalid("introspection carried no user id");
        };

        let resp = match self.client.get_user_response(user_id).await {
            Ok(resp) => resp,
            Err(err) => return Validation::Failed(err),
        };
        let record = match resp.result {
            Some(record) if resp.is_success() => record,
            _ => return Validation::Invalid("user record unavailable"),
        };
        if record.is_disabled() {
            return Validation::Invalid("account deactivated");
        }
        Validation::Valid(record.to_user())
    }

    fn no_session(&self, route: &str) -> GuardOutcome {
        if self.routes().is_protected(route) {
            let login = self.routes().login.clone();
            return self.redirect(login);
        }
        GuardOutcome::Idle
    }

    fn satisfied(&self, route: &str) -> GuardOutcome {
        let routes = self.routes();
        if routes.is_login(route) {
            let dashboard = routes.dashboard.clone();
            return self.redirect(dashboard);
        }
        if routes.is_protected(route) {
            return GuardOutcome::Allow;
        }
        GuardOutcome::Idle
    }

    /// Drops persisted and in-memory credentials together.
    fn invalidate(&self, route: &str) -> GuardOutcome {
        if let Err(err) = self.client.storage().clear_tokens() {
            warn!(error = %format!("{:#}", err), "failed to clear persisted tokens");
        }
        let session = self.client.session();
        session.clear_auth();
        session.emit(SessionEvent::Cleared);
        self.no_session(route)
    }

    fn redirect(&self, to: String) -> GuardOutcome {
        info!(to = %to, "guard redirect");
        self.client.session().navigate(&to, false);
        GuardOutcome::Redirect(to)
    }

    /// Re-runs [`reconcile`](Self::reconcile) whenever the route changes or a
    /// login publishes a new token, until `shutdown` resolves or the route
    /// sender is dropped.
    pub async fn run(
        &self,
        mut route_rx: watch::Receiver<String>,
        shutdown: impl Future<Output = ()>,
    ) {
        let mut events = self.client.session().subscribe();
        tokio::pin!(shutdown);

        let mut last_token = self.client.session().access_token();
        let route = route_rx.borrow_and_update().clone();
        self.reconcile(&route).await;

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                changed = route_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let route = route_rx.borrow_and_update().clone();
                    debug!(route = %route, "route changed");
                    self.reconcile(&route).await;
                }
                event = events.recv() => match event {
                    Ok(SessionEvent::TokenUpdated { token }) => {
                        if last_token.as_deref() == Some(token.as_str()) {
                            continue;
                        }
                        last_token = Some(token);
                        let route = route_rx.borrow().clone();
                        self.reconcile(&route).await;
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "guard lagged behind session events");
                        let route = route_rx.borrow().clone();
                        self.reconcile(&route).await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
        debug!("guard stopped");
    }
}
