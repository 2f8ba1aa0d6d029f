//! Credential exchange, introspection, refresh and logout.

use super::*;
use crate::remote::types::{AuthenticateRequest, TokenRequest};

impl ApiClient {
    /// `POST /auth/token`. Sent anonymously; the caller inspects the code.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<ApiResponse<AuthenticateResponse>, ApiError> {
        let req = ApiRequest::post("authenticate", "/auth/token")
            .json(&AuthenticateRequest { username, password })?
            .anonymous();
        self.call(req).await
    }

    /// `POST /auth/introspect`.
    pub async fn introspect(
        &self,
        token: &str,
    ) -> Result<ApiResponse<IntrospectResponse>, ApiError> {
        let req = ApiRequest::post("introspect", "/auth/introspect").json(&TokenRequest { token })?;
        self.call(req).await
    }

    /// `POST /auth/refresh`, using the access token as the refresh credential.
    /// Sent outside the interceptor, which calls it.
    pub async fn refresh(&self, token: &str) -> Result<ApiResponse<RefreshResponse>, ApiError> {
        let req = ApiRequest::post("refresh", "/auth/refresh")
            .json(&TokenRequest { token })?
            .anonymous();
        self.call_direct(&req).await
    }

    /// `POST /auth/logout`. Anonymous: there is no point refreshing a token
    /// only to revoke it.
    pub async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let req = ApiRequest::post("logout", "/auth/logout")
            .json(&TokenRequest { token })?
            .anonymous();
        self.call::<serde_json::Value>(req).await?.into_unit()
    }
}
