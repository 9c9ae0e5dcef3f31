use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use serde_json::{Value, json};

use super::*;
use crate::session::SessionController;
use crate::test_support;

type Bodies = Arc<Mutex<Vec<Value>>>;

fn users_router(bodies: Bodies) -> Router {
    let on_patch = bodies.clone();
    let on_password = bodies.clone();
    Router::new()
        .route(
            "/api/users",
            get(|| async {
                Json(json!([
                    {"id": "u1", "username": "amina", "role": "admin", "email": "a@shop.test", "is_active": true},
                    {"id": "u2", "username": "omar", "role": "staff", "is_active": false}
                ]))
            }),
        )
        .route(
            "/api/users/{id}",
            patch(move |Json(body): Json<Value>| async move {
                on_patch.lock().unwrap().push(body);
                StatusCode::OK
            })
            .delete(|| async { StatusCode::NO_CONTENT }),
        )
        .route(
            "/api/users/{id}/change-password",
            post(move |Json(body): Json<Value>| async move {
                on_password.lock().unwrap().push(body);
                StatusCode::OK
            }),
        )
        .route(
            "/api/auth/register",
            post(move |Json(body): Json<Value>| async move {
                bodies.lock().unwrap().push(body);
                StatusCode::CREATED
            }),
        )
}

fn staff(id: &str, role: &str) -> User {
    serde_json::from_value(json!({"id": id, "username": id, "role": role})).unwrap()
}

fn full_profile() -> RegisterRequest {
    RegisterRequest {
        username: "layla".into(),
        password: "goldbar7".into(),
        email: Some("layla@shop.test".into()),
        full_name: Some("Layla Haddad".into()),
        role: Some("staff".into()),
    }
}

#[tokio::test]
async fn list_reads_bare_array_with_active_flag() {
    let backend = test_support::spawn(users_router(Bodies::default())).await;
    let controller = SessionController::new(&backend.config()).unwrap();

    let users = list_users(controller.api()).await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].is_active, Some(true));
    assert_eq!(users[1].is_active, Some(false));
    assert_eq!(users[1].email, None);
}

#[tokio::test]
async fn update_patches_profile_without_password() {
    let bodies = Bodies::default();
    let backend = test_support::spawn(users_router(bodies.clone())).await;
    let controller = SessionController::new(&backend.config()).unwrap();
    let update = UserUpdate {
        username: "omar".into(),
        email: "omar@shop.test".into(),
        full_name: "Omar Saleh".into(),
        role: Some("manager".into()),
        is_active: None,
    };

    update_user(controller.api(), "u2", &update).await.unwrap();

    backend.last("PATCH", "/api/users/u2");
    let sent = bodies.lock().unwrap().pop().unwrap();
    assert_eq!(
        sent,
        json!({"username": "omar", "email": "omar@shop.test", "full_name": "Omar Saleh", "role": "manager"})
    );
    assert!(sent.get("password").is_none());
}

#[tokio::test]
async fn create_posts_full_profile_to_register() {
    let bodies = Bodies::default();
    let backend = test_support::spawn(users_router(bodies.clone())).await;
    let controller = SessionController::new(&backend.config()).unwrap();

    create_user(controller.api(), &full_profile()).await.unwrap();

    backend.last("POST", "/api/auth/register");
    let sent = bodies.lock().unwrap().pop().unwrap();
    assert_eq!(sent["email"], "layla@shop.test");
    assert_eq!(sent["full_name"], "Layla Haddad");
}

#[tokio::test]
async fn create_requires_email_and_full_name_before_sending() {
    let backend = test_support::spawn(users_router(Bodies::default())).await;
    let controller = SessionController::new(&backend.config()).unwrap();

    let no_email = RegisterRequest { email: Some("  ".into()), ..full_profile() };
    let err = create_user(controller.api(), &no_email).await.unwrap_err();
    assert!(matches!(err, ApiError::MissingField("email")));

    let no_name = RegisterRequest { full_name: None, ..full_profile() };
    let err = create_user(controller.api(), &no_name).await.unwrap_err();
    assert!(matches!(err, ApiError::MissingField("full_name")));

    let no_password = RegisterRequest { password: String::new(), ..full_profile() };
    let err = create_user(controller.api(), &no_password).await.unwrap_err();
    assert!(matches!(err, ApiError::MissingField("password")));

    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn update_with_blank_field_sends_nothing() {
    let backend = test_support::spawn(users_router(Bodies::default())).await;
    let controller = SessionController::new(&backend.config()).unwrap();
    let update = UserUpdate { username: "omar".into(), email: "omar@shop.test".into(), ..UserUpdate::default() };

    let err = update_user(controller.api(), "u2", &update).await.unwrap_err();

    assert!(matches!(err, ApiError::MissingField("full_name")));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn short_password_is_rejected_locally() {
    let bodies = Bodies::default();
    let backend = test_support::spawn(users_router(bodies.clone())).await;
    let controller = SessionController::new(&backend.config()).unwrap();

    let err = change_password(controller.api(), "u2", "12345").await.unwrap_err();
    assert!(matches!(err, ApiError::PasswordTooShort { min: 6 }));
    let err = change_password(controller.api(), "u2", "").await.unwrap_err();
    assert!(matches!(err, ApiError::PasswordTooShort { .. }));
    assert!(backend.requests().is_empty());

    change_password(controller.api(), "u2", "dinar1").await.unwrap();
    backend.last("POST", "/api/users/u2/change-password");
    assert_eq!(bodies.lock().unwrap().pop().unwrap(), json!({"new_password": "dinar1"}));
}

#[tokio::test]
async fn password_length_counts_characters_not_bytes() {
    let backend = test_support::spawn(users_router(Bodies::default())).await;
    let controller = SessionController::new(&backend.config()).unwrap();

    let err = change_password(controller.api(), "u2", "ذهب").await.unwrap_err();
    assert!(matches!(err, ApiError::PasswordTooShort { .. }));
    change_password(controller.api(), "u2", "ذهبذهب").await.unwrap();
}

#[tokio::test]
async fn delete_hits_user_path() {
    let backend = test_support::spawn(users_router(Bodies::default())).await;
    let controller = SessionController::new(&backend.config()).unwrap();

    delete_user(controller.api(), "u2").await.unwrap();

    backend.last("DELETE", "/api/users/u2");
}

#[test]
fn management_rights_follow_role() {
    let admin = staff("u1", "admin");
    let manager = staff("u3", "manager");
    let clerk = staff("u2", "staff");

    assert!(can_manage_users(&admin));
    assert!(can_manage_users(&manager));
    assert!(!can_manage_users(&clerk));

    assert!(can_delete_user(&admin, &clerk));
    assert!(!can_delete_user(&admin, &admin));
    assert!(!can_delete_user(&manager, &clerk));
}
