use super::*;

#[test]
fn success_envelope_yields_its_result() -> Result<(), ApiError> {
    let resp: ApiResponse<AuthenticateResponse> = serde_json::from_value(serde_json::json!({
        "code": 1000,
        "message": "ok",
        "timeStamp": "2025-10-25T10:00:00Z",
        "result": {"token": "abc", "expireAt": "2025-10-26T10:00:00Z"}
    }))
    .expect("parse envelope");
    assert_eq!(resp.token_if_success().as_deref(), Some("abc"));
    let result = resp.into_result()?;
    assert_eq!(
        result.expire_at.and_then(|t| t.to_datetime()).map(|d| d.unix_timestamp()),
        Some(1_761_472_800)
    );
    Ok(())
}

#[test]
fn non_success_code_is_an_error_even_with_a_result() {
    let resp: ApiResponse<AuthenticateResponse> = serde_json::from_value(serde_json::json!({
        "code": 1005,
        "message": "Unauthenticated",
        "result": {"token": "abc"}
    }))
    .expect("parse envelope");
    assert_eq!(resp.token_if_success(), None);
    match resp.into_result() {
        Err(ApiError::Api { code, message, .. }) => {
            assert_eq!(code, 1005);
            assert_eq!(message, "Unauthenticated");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn session_expired_code_maps_to_unauthorized() {
    let resp: ApiResponse<serde_json::Value> =
        serde_json::from_value(serde_json::json!({"code": 1001})).expect("parse envelope");
    assert!(matches!(resp.into_unit(), Err(ApiError::Unauthorized)));
}

#[test]
fn blank_token_is_not_a_success() {
    let resp: ApiResponse<RefreshResponse> = serde_json::from_value(serde_json::json!({
        "code": 1000,
        "result": {"token": ""}
    }))
    .expect("parse envelope");
    assert_eq!(resp.token_if_success(), None);
}

#[test]
fn introspection_validity_accepts_flag_or_user_id() {
    let parse = |v: serde_json::Value| -> ApiResponse<IntrospectResponse> {
        serde_json::from_value(v).expect("parse envelope")
    };
    assert!(parse(serde_json::json!({"code": 1000, "result": {"isValid": true}})).indicates_valid());
    assert!(parse(serde_json::json!({"code": 1000, "result": {"userId": "u1"}})).indicates_valid());
    assert!(!parse(serde_json::json!({"code": 1000, "result": {"isValid": false}})).indicates_valid());
    assert!(!parse(serde_json::json!({"code": 1002, "result": {"isValid": true, "userId": "u1"}}))
        .indicates_valid());
    assert!(!parse(serde_json::json!({"code": 1000})).indicates_valid());
}

#[test]
fn user_record_derives_role_and_disabled_flag() {
    let user: UserResponse = serde_json::from_value(serde_json::json!({
        "id": "u1",
        "username": "alice",
        "mail": "alice@example.test",
        "phoneNumber": "555",
        "roles": [{"id": "r1", "roleName": "ADMIN", "description": "admins"}]
    }))
    .expect("parse user");
    assert!(!user.is_disabled());
    let u = user.to_user();
    assert_eq!(u.role, UserRole::Admin);
    assert_eq!(u.email, "alice@example.test");

    let disabled: UserResponse = serde_json::from_value(serde_json::json!({
        "id": "u2", "username": "bob", "enable": false, "roles": [{"name": "USER"}]
    }))
    .expect("parse user");
    assert!(disabled.is_disabled());
    assert_eq!(disabled.role(), UserRole::Moderator);
}

#[test]
fn page_defaults_missing_fields() {
    let page: Page<VideoResponse> = serde_json::from_value(serde_json::json!({
        "content": [{"id": "v1", "size": 10}],
        "totalElements": 1
    }))
    .expect("parse page");
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.total_pages, 0);
}

#[test]
fn millis_timestamps_are_supported() {
    let ts: Timestamp = serde_json::from_value(serde_json::json!(1_761_472_800_000_i64))
        .expect("parse timestamp");
    assert_eq!(ts.to_rfc3339(), "2025-10-26T10:00:00Z");
}

#[test]
fn update_request_omits_unset_password() {
    let user: UserResponse = serde_json::from_value(serde_json::json!({
        "id": "u1", "username": "alice", "mail": "a@x", "enable": true
    }))
    .expect("parse user");
    let req = UserUpdateRequest::from_user(&user);
    let v = serde_json::to_value(&req).expect("serialize");
    assert!(v.get("password").is_none());
    assert_eq!(v["enable"], true);
    assert_eq!(v["phoneNumber"], "");
}

#[test]
fn envelope_without_a_result_parses_for_any_payload_type() {
    // `RoleResponse` has no `Default`; a missing result is simply `None`.
    let resp: ApiResponse<RoleResponse> =
        serde_json::from_value(serde_json::json!({"code": 1000, "message": "Deleted"}))
            .expect("parse envelope");
    assert!(resp.result.is_none());
    assert!(matches!(resp.into_result(), Err(ApiError::Decode(_))));
}
