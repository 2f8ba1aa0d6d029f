use reqwest::{Method, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::*;
use crate::model::token_preview;
use crate::session::SessionEvent;
use crate::upload::UploadRequest;

#[derive(Clone, Debug)]
pub(crate) enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Upload(UploadRequest),
}

/// A replayable description of one backend call.
#[derive(Clone, Debug)]
pub(crate) struct ApiRequest {
    label: &'static str,
    method: Method,
    path: String,
    // Appended to `path` percent-encoded, one segment each.
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
    body: RequestBody,
    // Sent without a bearer token and never refreshed.
    anonymous: bool,
    retried: bool,
}

impl ApiRequest {
    fn new(label: &'static str, method: Method, path: impl Into<String>) -> Self {
        Self {
            label,
            method,
            path: path.into(),
            segments: Vec::new(),
            query: Vec::new(),
            body: RequestBody::Empty,
            anonymous: false,
            retried: false,
        }
    }

    pub(crate) fn get(label: &'static str, path: impl Into<String>) -> Self {
        Self::new(label, Method::GET, path)
    }

    pub(crate) fn post(label: &'static str, path: impl Into<String>) -> Self {
        Self::new(label, Method::POST, path)
    }

    pub(crate) fn put(label: &'static str, path: impl Into<String>) -> Self {
        Self::new(label, Method::PUT, path)
    }

    pub(crate) fn delete(label: &'static str, path: impl Into<String>) -> Self {
        Self::new(label, Method::DELETE, path)
    }

    /// Appends one path segment; `/`, `?` and `#` in `value` are escaped.
    pub(crate) fn segment(mut self, value: impl Into<String>) -> Self {
        self.segments.push(value.into());
        self
    }

    pub(crate) fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    pub(crate) fn json(mut self, body: &impl Serialize) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::Decode(format!("serialize {} body: {}", self.label, e)))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub(crate) fn upload(mut self, upload: UploadRequest) -> Self {
        self.body = RequestBody::Upload(upload);
        self
    }

    pub(crate) fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }
}

impl ApiClient {
    pub(crate) fn url(&self, req: &ApiRequest) -> Result<reqwest::Url, ApiError> {
        let raw = format!("{}{}", self.inner.config.base_url, req.path);
        let mut url = reqwest::Url::parse(&raw)
            .map_err(|e| ApiError::Validation(format!("invalid api url {}: {}", raw, e)))?;
        if !req.segments.is_empty() {
            url.path_segments_mut()
                .map_err(|()| ApiError::Validation(format!("api url has no path: {}", raw)))?
                .pop_if_empty()
                .extend(&req.segments);
        }
        Ok(url)
    }

    fn stored_token(&self) -> Result<Option<String>, ApiError> {
        self.inner
            .storage
            .access_token()
            .map_err(|e| ApiError::Storage(format!("{:#}", e)))
    }

    async fn dispatch(
        &self,
        req: &ApiRequest,
        token: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.url(req)?;
        let mut builder = self.inner.http.request(req.method.clone(), url);
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder = match &req.body {
            RequestBody::Empty => builder,
            RequestBody::Json(v) => builder.json(v),
            RequestBody::Upload(upload) => builder.multipart(multipart_form(upload)?),
        };

        debug!(
            label = req.label,
            method = %req.method,
            path = %req.path,
            segments = ?req.segments,
            retried = req.retried,
            "api request"
        );
        let resp = builder.send().await?;
        debug!(label = req.label, status = resp.status().as_u16(), "api response");
        Ok(resp)
    }

    /// Runs `req` through the request and response phases.
    ///
    /// A 401 on a request that is neither anonymous nor already retried gets
    /// exactly one refresh and one replay. A replay answered with another 401
    /// becomes `Unauthorized`; any other replay response is returned as-is.
    /// When no token is stored or the refresh fails, the session is expired
    /// and `Unauthorized` is returned.
    pub(crate) async fn execute(&self, mut req: ApiRequest) -> Result<reqwest::Response, ApiError> {
        let token = if req.anonymous {
            None
        } else {
            self.stored_token()?
        };
        let resp = self.dispatch(&req, token.as_deref()).await?;
        if resp.status() != StatusCode::UNAUTHORIZED || req.anonymous || req.retried {
            return Ok(resp);
        }

        req.retried = true;
        let Some(failed) = token else {
            warn!(label = req.label, "401 with no stored token; expiring session");
            self.expire_session();
            return Err(ApiError::Unauthorized);
        };

        let fresh = match self.refresh_after_unauthorized(&failed).await {
            Ok(fresh) => fresh,
            Err(err) => {
                warn!(label = req.label, error = %err, "token refresh failed; expiring session");
                self.expire_session();
                return Err(ApiError::Unauthorized);
            }
        };

        info!(label = req.label, "replaying request with refreshed token");
        let replayed = self.dispatch(&req, Some(&fresh)).await?;
        if replayed.status() == StatusCode::UNAUTHORIZED {
            warn!(label = req.label, "replayed request still unauthorized");
            return Err(ApiError::Unauthorized);
        }
        Ok(replayed)
    }

    /// Single-flight refresh: concurrent 401s queue on the refresh lock, and a
    /// waiter that finds the token already rotated reuses it.
    async fn refresh_after_unauthorized(&self, failed: &str) -> Result<String, ApiError> {
        let _guard = self.inner.refresh_lock.lock().await;

        match self.stored_token()? {
            None => return Err(ApiError::Unauthorized),
            Some(current) if current != failed => {
                debug!(token = %token_preview(&current), "token already rotated");
                return Ok(current);
            }
            Some(_) => {}
        }

        // The backend issues no separate refresh token; the access token is
        // the refresh credential.
        let resp = self.refresh(failed).await?;
        let fresh = resp.token_if_success().ok_or_else(|| ApiError::Api {
            status: StatusCode::OK.as_u16(),
            code: resp.code,
            message: resp
                .message
                .clone()
                .unwrap_or_else(|| "Refresh failed: invalid response".to_string()),
        })?;

        self.inner
            .storage
            .write_access_token(Some(&fresh))
            .map_err(|e| ApiError::Storage(format!("{:#}", e)))?;
        self.inner.session.set_access_token(Some(fresh.clone()));
        info!(token = %token_preview(&fresh), "access token refreshed");
        Ok(fresh)
    }

    /// Drops persisted and in-memory credentials and sends the host to login.
    pub(crate) fn expire_session(&self) {
        if let Err(err) = self.inner.storage.clear_tokens() {
            warn!(error = %format!("{:#}", err), "failed to clear persisted tokens");
        }
        let session = &self.inner.session;
        session.clear_auth();
        session.emit(SessionEvent::Cleared);
        session.navigate(&self.inner.config.routes.login, true);
    }

    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        req: ApiRequest,
    ) -> Result<ApiResponse<T>, ApiError> {
        let resp = self.execute(req).await?;
        decode(resp).await
    }

    /// Sends `req` once with no bearer token and no 401 handling.
    pub(crate) async fn call_direct<T: DeserializeOwned>(
        &self,
        req: &ApiRequest,
    ) -> Result<ApiResponse<T>, ApiError> {
        let resp = self.dispatch(req, None).await?;
        decode(resp).await
    }
}

/// Parses the `{code, message, timeStamp, result}` envelope.
///
/// Non-2xx statuses become errors, with 403 always `Forbidden`. A 401 keeps
/// its envelope so credential rejections can show the server's message; the
/// interceptor turns a replayed 401 into `Unauthorized`. A 2xx body is
/// returned even when its `code` is not the success sentinel, so callers can
/// inspect it.
pub(crate) async fn decode<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<ApiResponse<T>, ApiError> {
    let status = resp.status();
    let bytes = resp.bytes().await?;

    if status.is_success() {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ApiResponse::empty());
        }
        return serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::Decode(format!("parse response envelope: {}", e)));
    }

    if status == StatusCode::FORBIDDEN {
        return Err(ApiError::Forbidden);
    }
    let envelope: Option<ApiResponse<serde_json::Value>> = serde_json::from_slice(&bytes).ok();
    match envelope {
        Some(env) => Err(ApiError::Api {
            status: status.as_u16(),
            code: env.code,
            message: env.message.unwrap_or_default(),
        }),
        None if status == StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
        // No body to take a message from; callers fall back to their own.
        None => Err(ApiError::Api {
            status: status.as_u16(),
            code: 9999,
            message: String::new(),
        }),
    }
}

fn multipart_form(upload: &UploadRequest) -> Result<reqwest::multipart::Form, ApiError> {
    let part = reqwest::multipart::Part::bytes(upload.bytes.clone())
        .file_name(upload.file_name.clone())
        .mime_str(&upload.content_type)
        .map_err(|e| ApiError::Validation(format!("invalid content type: {}", e)))?;
    let mut form = reqwest::multipart::Form::new().part("file", part);
    if let Some(title) = upload.title.clone().filter(|s| !s.is_empty()) {
        form = form.text("title", title);
    }
    if let Some(description) = upload.description.clone().filter(|s| !s.is_empty()) {
        form = form.text("description", description);
    }
    Ok(form)
}

#[cfg(test)]
#[path = "../tests/remote/http_client_tests.rs"]
mod tests;
