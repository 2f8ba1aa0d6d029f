use std::sync::Arc;

use super::*;
use crate::model::ClientConfig;
use crate::session::SessionContext;
use crate::store::MemoryStore;

fn upload(content_type: &str) -> UploadRequest {
    UploadRequest {
        file_name: "clip.mp4".to_string(),
        content_type: content_type.to_string(),
        bytes: vec![0u8; 16],
        title: Some("Clip".to_string()),
        description: None,
    }
}

#[test]
fn builder_collects_query_and_flags() {
    let req = ApiRequest::get("list users", "/users")
        .query("page", 2)
        .query("size", 12)
        .anonymous();
    assert_eq!(req.method, Method::GET);
    assert_eq!(
        req.query,
        vec![("page", "2".to_string()), ("size", "12".to_string())]
    );
    assert!(req.anonymous);
    assert!(!req.retried);
}

#[test]
fn json_body_is_captured_for_replay() -> Result<(), ApiError> {
    let req = ApiRequest::post("introspect", "/auth/introspect")
        .json(&serde_json::json!({"token": "abc"}))?;
    let replay = req.clone();
    match replay.body {
        RequestBody::Json(v) => assert_eq!(v["token"], "abc"),
        other => panic!("unexpected body {other:?}"),
    }
    Ok(())
}

#[test]
fn multipart_rejects_malformed_content_types() {
    assert!(multipart_form(&upload("video/mp4")).is_ok());
    assert!(matches!(
        multipart_form(&upload("not a mime")),
        Err(ApiError::Validation(_))
    ));
}

fn client() -> ApiClient {
    let config = ClientConfig {
        base_url: "http://localhost:8080/api/v1".to_string(),
        ..ClientConfig::default()
    };
    ApiClient::new(
        config,
        Arc::new(SessionContext::new()),
        Arc::new(MemoryStore::new()),
    )
    .expect("build client")
}

#[test]
fn segments_are_escaped_and_appended_to_the_path() -> Result<(), ApiError> {
    let client = client();

    let plain = ApiRequest::get("list users", "/users");
    assert_eq!(client.url(&plain)?.as_str(), "http://localhost:8080/api/v1/users");

    let odd = ApiRequest::delete("delete video", "/videos").segment("a/b?c#d");
    assert_eq!(
        client.url(&odd)?.as_str(),
        "http://localhost:8080/api/v1/videos/a%2Fb%3Fc%23d"
    );

    let nested = ApiRequest::post("grant permission", "/roles")
        .segment("r 1")
        .segment("permissions")
        .segment("p1");
    assert_eq!(client.url(&nested)?.path(), "/api/v1/roles/r%201/permissions/p1");
    Ok(())
}
