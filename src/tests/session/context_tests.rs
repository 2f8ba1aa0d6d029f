use super::*;
use crate::model::UserRole;

fn alice() -> User {
    User {
        id: "u1".to_string(),
        email: "alice@example.test".to_string(),
        username: "alice".to_string(),
        role: UserRole::Admin,
    }
}

#[test]
fn user_is_refused_without_a_token() {
    let ctx = SessionContext::new();
    assert!(!ctx.set_user(alice()));
    assert_eq!(ctx.user(), None);

    ctx.update_session(None, Some(alice()));
    assert_eq!(ctx.user(), None);
    assert!(!ctx.is_authenticated());
}

#[test]
fn dropping_the_token_drops_the_user() {
    let ctx = SessionContext::new();
    ctx.update_session(Some("abc".into()), Some(alice()));
    assert!(ctx.is_authenticated());
    assert_eq!(ctx.user(), Some(alice()));

    ctx.set_access_token(None);
    assert_eq!(ctx.snapshot(), SessionState::default());
}

#[test]
fn rotating_the_token_keeps_the_user() {
    let ctx = SessionContext::new();
    ctx.update_session(Some("abc".into()), Some(alice()));
    ctx.set_access_token(Some("def".into()));
    assert_eq!(ctx.access_token().as_deref(), Some("def"));
    assert_eq!(ctx.user(), Some(alice()));
}

#[test]
fn stale_user_commit_is_rejected() {
    let ctx = SessionContext::new();
    ctx.set_access_token(Some("new".into()));
    assert!(!ctx.set_user_for_token("old", alice()));
    assert_eq!(ctx.user(), None);
    assert!(ctx.set_user_for_token("new", alice()));
    assert_eq!(ctx.user(), Some(alice()));
}

#[test]
fn empty_tokens_count_as_absent() {
    let ctx = SessionContext::new();
    ctx.set_access_token(Some(String::new()));
    assert!(!ctx.is_authenticated());
}

#[test]
fn clear_auth_resets_everything_but_loading() {
    let ctx = SessionContext::new();
    ctx.update_session(Some("abc".into()), Some(alice()));
    ctx.set_refresh_token(Some("r".into()));
    ctx.set_loading(true);
    ctx.clear_auth();
    let st = ctx.snapshot();
    assert_eq!(st.access_token, None);
    assert_eq!(st.refresh_token, None);
    assert_eq!(st.user, None);
    assert!(st.loading);
}

#[tokio::test]
async fn events_reach_subscribers() {
    let ctx = SessionContext::new();
    let mut rx = ctx.subscribe();
    ctx.navigate("/login", true);
    assert_eq!(
        rx.recv().await.unwrap(),
        SessionEvent::Navigate {
            to: "/login".into(),
            hard: true
        }
    );
}
