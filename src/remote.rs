use std::sync::Arc;

use crate::error::ApiError;
use crate::model::ClientConfig;
use crate::session::SessionContext;
use crate::store::TokenStorage;

mod http_client;
pub(crate) use self::http_client::ApiRequest;

mod types;
pub use self::types::*;

mod analytics;
mod auth;
mod roles;
mod users;
mod videos;
pub use self::analytics::{DEFAULT_ANALYTICS_SAMPLE, DashboardSummary, VideoAnalytics};
pub use self::users::DEFAULT_USER_PAGE_SIZE;
pub use self::videos::DEFAULT_VIDEO_PAGE_SIZE;

/// HTTP client for the `/api/v1` backend.
///
/// Every call goes through the request/response phases in `http_client`:
/// the stored bearer token is attached, and a 401 triggers one refresh and one
/// replay. Cloning is cheap; clones share the session and the refresh lock.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    config: ClientConfig,
    http: reqwest::Client,
    session: Arc<SessionContext>,
    storage: Arc<dyn TokenStorage>,
    refresh_lock: tokio::sync::Mutex<()>,
}

impl ApiClient {
    pub fn new(
        config: ClientConfig,
        session: Arc<SessionContext>,
        storage: Arc<dyn TokenStorage>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent("socialctl")
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            inner: Arc::new(Inner {
                config,
                http,
                session,
                storage,
                refresh_lock: tokio::sync::Mutex::new(()),
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.inner.session
    }

    pub fn storage(&self) -> &Arc<dyn TokenStorage> {
        &self.inner.storage
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.config.base_url)
            .finish_non_exhaustive()
    }
}
