use super::*;

#[test]
fn admin_role_name_maps_to_admin() {
    assert_eq!(
        UserRole::from_role_names(["USER", "ADMIN"]),
        UserRole::Admin
    );
}

#[test]
fn anything_else_is_a_moderator() {
    assert_eq!(UserRole::from_role_names(["USER"]), UserRole::Moderator);
    assert_eq!(UserRole::from_role_names(std::iter::empty::<&str>()), UserRole::Moderator);
    // Matching is exact.
    assert_eq!(UserRole::from_role_names(["admin"]), UserRole::Moderator);
}

#[test]
fn role_serializes_lowercase() {
    let v = serde_json::to_value(UserRole::Admin).unwrap();
    assert_eq!(v, serde_json::json!("admin"));
    let r: UserRole = serde_json::from_value(serde_json::json!("moderator")).unwrap();
    assert_eq!(r, UserRole::Moderator);
}
