#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tokio::sync::broadcast;

use socialctl::model::ClientConfig;
use socialctl::remote::ApiClient;
use socialctl::session::{SessionContext, SessionEvent};
use socialctl::store::{MemoryStore, TokenStorage};

pub const API_PREFIX: &str = "/api/v1";

/// One scripted response.
#[derive(Clone, Debug)]
pub struct Reply {
    status: StatusCode,
    body: Option<Value>,
    delay: Option<Duration>,
}

impl Reply {
    /// HTTP 200 with a success envelope around `result`.
    pub fn ok(result: Value) -> Self {
        Self::json(200, envelope(result))
    }

    /// HTTP 200 with a non-success application code.
    pub fn code(code: i64, message: &str) -> Self {
        Self::json(200, failure(code, message))
    }

    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: Some(body),
            delay: None,
        }
    }

    /// A bare status with no body.
    pub fn status(status: u16) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: None,
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

pub fn envelope(result: Value) -> Value {
    json!({
        "code": 1000,
        "message": "Success",
        "timeStamp": "2025-10-25T10:00:00Z",
        "result": result,
    })
}

pub fn failure(code: i64, message: &str) -> Value {
    json!({
        "code": code,
        "message": message,
        "timeStamp": "2025-10-25T10:00:00Z",
    })
}

/// A request as the mock backend saw it, with the `/api/v1` prefix stripped.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn bearer(&self) -> Option<&str> {
        self.authorization
            .as_deref()
            .and_then(|h| h.strip_prefix("Bearer "))
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

type RouteKey = (Method, String, Option<String>);

// The last reply in a queue is sticky until another reply is queued behind it.
#[derive(Default)]
struct ReplyQueue {
    replies: VecDeque<Reply>,
    last_served: bool,
}

impl ReplyQueue {
    fn push(&mut self, reply: Reply) {
        if self.last_served && self.replies.len() == 1 {
            self.replies.clear();
        }
        self.last_served = false;
        self.replies.push_back(reply);
    }

    fn next(&mut self) -> Option<Reply> {
        if self.replies.len() > 1 {
            return self.replies.pop_front();
        }
        let last = self.replies.front().cloned();
        self.last_served = last.is_some();
        last
    }
}

#[derive(Default)]
struct Script {
    // Keyed by method, path and (optionally) the bearer token presented.
    replies: HashMap<RouteKey, ReplyQueue>,
    requests: Vec<Recorded>,
}

#[derive(Clone, Default)]
struct MockState {
    script: Arc<Mutex<Script>>,
}

impl MockState {
    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn next_reply(&self, method: &Method, path: &str, token: Option<&str>) -> Option<Reply> {
        let mut script = self.lock();
        let keys = [
            (method.clone(), path.to_string(), token.map(str::to_string)),
            (method.clone(), path.to_string(), None),
        ];
        for key in keys {
            if let Some(reply) = script.replies.get_mut(&key).and_then(ReplyQueue::next) {
                return Some(reply);
            }
        }
        None
    }
}

/// In-process backend on `127.0.0.1:0` with scripted replies and request
/// recording. The server task ends with the test's runtime.
pub struct MockBackend {
    pub addr: std::net::SocketAddr,
    state: MockState,
}

impl MockBackend {
    pub async fn start() -> Result<Self> {
        let state = MockState::default();
        let app = Router::new()
            .fallback(handle)
            .with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("bind mock backend")?;
        let addr = listener.local_addr().context("mock backend addr")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(Self { addr, state })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, API_PREFIX)
    }

    /// Queues `reply` for `method path` regardless of the bearer token.
    pub fn on(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.push((method, path.to_string(), None), reply);
        self
    }

    /// Queues `reply` for requests carrying `Bearer token`. Takes precedence
    /// over replies registered with [`MockBackend::on`].
    pub fn on_token(&self, method: Method, path: &str, token: &str, reply: Reply) -> &Self {
        self.push((method, path.to_string(), Some(token.to_string())), reply);
        self
    }

    fn push(&self, key: RouteKey, reply: Reply) {
        self.state
            .lock()
            .replies
            .entry(key)
            .or_default()
            .push(reply);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().requests.clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests_to(method, path).len()
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix(API_PREFIX)
        .unwrap_or(uri.path())
        .to_string();
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let recorded = Recorded {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: header_str(header::AUTHORIZATION),
        content_type: header_str(header::CONTENT_TYPE),
        body,
    };
    let token = recorded.bearer().map(str::to_string);
    state.lock().requests.push(recorded);

    let Some(reply) = state.next_reply(&method, &path, token.as_deref()) else {
        return (StatusCode::NOT_FOUND, axum::Json(failure(9999, "no scripted reply")))
            .into_response();
    };
    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }
    match reply.body {
        Some(body) => (reply.status, axum::Json(body)).into_response(),
        None => reply.status.into_response(),
    }
}

/// A client wired to a fresh mock backend and in-memory token storage.
pub struct Harness {
    pub backend: MockBackend,
    pub session: Arc<SessionContext>,
    pub storage: Arc<MemoryStore>,
    pub client: ApiClient,
}

impl Harness {
    pub async fn new() -> Result<Self> {
        Self::with_storage(MemoryStore::new()).await
    }

    /// Starts with `token` persisted and loaded into the session.
    pub async fn with_token(token: &str) -> Result<Self> {
        let h = Self::with_storage(MemoryStore::with_access_token(token)).await?;
        h.session.set_access_token(Some(token.to_string()));
        Ok(h)
    }

    async fn with_storage(storage: MemoryStore) -> Result<Self> {
        let backend = MockBackend::start().await?;
        let config = ClientConfig {
            base_url: backend.base_url(),
            timeout_ms: 5_000,
            ..ClientConfig::default()
        };
        let session = Arc::new(SessionContext::new());
        let storage = Arc::new(storage);
        let dyn_storage: Arc<dyn TokenStorage> = storage.clone();
        let client = ApiClient::new(config, session.clone(), dyn_storage)
            .context("build api client")?;
        Ok(Self {
            backend,
            session,
            storage,
            client,
        })
    }

    pub fn stored_token(&self) -> Option<String> {
        self.storage.access_token().ok().flatten()
    }
}

/// Everything already queued on `rx`.
pub fn drain(rx: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut out = Vec::new();
    while let Ok(event) = rx.try_recv() {
        out.push(event);
    }
    out
}

pub fn user_record(id: &str, username: &str, role: &str, enable: Option<bool>) -> Value {
    let mut record = json!({
        "id": id,
        "username": username,
        "mail": format!("{username}@example.test"),
        "phoneNumber": "555-0100",
        "roles": [{"id": format!("role-{role}"), "name": role, "description": role}],
    });
    if let Some(enable) = enable {
        record["enable"] = json!(enable);
    }
    record
}

pub fn page(content: Vec<Value>, total_elements: u64, size: u64) -> Value {
    let total_pages = if size == 0 {
        0
    } else {
        total_elements.div_ceil(size)
    };
    json!({
        "content": content,
        "totalPages": total_pages,
        "totalElements": total_elements,
        "size": size,
        "number": 0,
        "first": true,
        "last": total_pages <= 1,
        "empty": total_elements == 0,
    })
}
