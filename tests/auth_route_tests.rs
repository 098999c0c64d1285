mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;

#[tokio::test]
async fn register_rejects_short_passwords_and_duplicate_emails() {
    let t = common::spawn_app().await;

    let (status, body) = common::post_json(
        &t.app,
        "/api/auth/register",
        json!({"name": "A", "email": "a@example.com", "password": "short"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, body) = common::post_json(
        &t.app,
        "/api/auth/register",
        json!({"name": "A", "email": "a@example.com", "password": "hunter22"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@example.com");
    assert!(body.get("password_hash").is_none());

    let (status, body) = common::post_json(
        &t.app,
        "/api/auth/register",
        json!({"name": "B", "email": "a@example.com", "password": "hunter23"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn login_answers_identically_for_unknown_email_and_wrong_password() {
    let t = common::spawn_app().await;
    common::post_json(
        &t.app,
        "/api/auth/register",
        json!({"name": "A", "email": "a@example.com", "password": "hunter22"}),
    )
    .await;

    let (status, unknown) = common::post_json(
        &t.app,
        "/api/auth/login",
        json!({"email": "nobody@example.com", "password": "hunter22"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, wrong) = common::post_json(
        &t.app,
        "/api/auth/login",
        json!({"email": "a@example.com", "password": "wrong-password"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown, wrong);

    let (status, body) = common::post_json(
        &t.app,
        "/api/auth/login",
        json!({"email": "a@example.com", "password": "hunter22"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "A");
}

#[tokio::test]
async fn password_reset_flow_consumes_the_token() {
    let t = common::spawn_app().await;
    common::post_json(
        &t.app,
        "/api/auth/register",
        json!({"name": "A", "email": "a@example.com", "password": "hunter22"}),
    )
    .await;

    // forgot-password never reveals whether the account exists
    let (status, known) = common::post_json(
        &t.app,
        "/api/auth/forgot-password",
        json!({"email": "a@example.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, unknown) = common::post_json(
        &t.app,
        "/api/auth/forgot-password",
        json!({"email": "nobody@example.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(known, unknown);

    // recover the token straight from storage, as an operator would from logs
    let pool = SqlitePoolOptions::new()
        .connect(&t.state.cfg.database_url)
        .await
        .expect("connect to test db");
    let (token,): (String,) = sqlx::query_as("SELECT token FROM password_reset_tokens")
        .fetch_one(&pool)
        .await
        .expect("one reset token");

    let (status, _) = common::post_json(
        &t.app,
        "/api/auth/reset-password",
        json!({"token": &token, "new_password": "new-password-1"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = common::post_json(
        &t.app,
        "/api/auth/login",
        json!({"email": "a@example.com", "password": "new-password-1"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = common::post_json(
        &t.app,
        "/api/auth/login",
        json!({"email": "a@example.com", "password": "hunter22"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // token is single-use
    let (status, body) = common::post_json(
        &t.app,
        "/api/auth/reset-password",
        json!({"token": &token, "new_password": "whatever-2"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}
