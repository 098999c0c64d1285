#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, Bytes, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use truckest::config::Config;
use truckest::router::{TruckestState, truckest_router};

pub struct TestApp {
    pub app: Router,
    pub state: TruckestState,
    // keeps the scratch sqlite file and upload dir alive for the test
    pub tmp: TempDir,
}

pub async fn spawn_app() -> TestApp {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let db_path = tmp.path().join("truckest-test.sqlite");

    let mut cfg = Config::default();
    cfg.database_url = format!("sqlite:{}", db_path.display());
    cfg.upload_dir = tmp.path().join("uploads");
    std::fs::create_dir_all(&cfg.upload_dir).expect("failed to create upload dir");

    let db = truckest::db::spawn(&cfg.database_url)
        .await
        .expect("failed to spawn database");
    let state = TruckestState::new(cfg, db);
    let app = truckest_router(state.clone());
    TestApp { app, state, tmp }
}

pub async fn request(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn request_raw(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    (status, headers, bytes)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    request(
        app,
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request"),
    )
    .await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("failed to build request"),
    )
    .await
}

pub async fn post_json_as(
    app: &Router,
    uri: &str,
    user_id: &str,
    body: Value,
) -> (StatusCode, Value) {
    request(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-user-id", user_id)
            .body(Body::from(body.to_string()))
            .expect("failed to build request"),
    )
    .await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(
        app,
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("failed to build request"),
    )
    .await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    request(
        app,
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request"),
    )
    .await
}

pub const MULTIPART_BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Hand-rolled multipart/form-data body: text fields plus one optional file.
pub fn multipart_body(
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(app: &Router, uri: &str, body: Vec<u8>) -> (StatusCode, Value) {
    request(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("failed to build request"),
    )
    .await
}

/// Register a user and create a job for it; returns (user_id, job_id).
pub async fn seed_job(app: &Router, email: &str, vin: &str) -> (String, String) {
    let (status, user) = post_json(
        app,
        "/api/auth/register",
        serde_json::json!({"name": "Test Inspector", "email": email, "password": "hunter22"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let user_id = user["id"].as_str().expect("user id").to_string();

    let (status, job) = post_json_as(
        app,
        "/api/jobs",
        &user_id,
        serde_json::json!({"vin": vin}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let job_id = job["id"].as_str().expect("job id").to_string();
    (user_id, job_id)
}

/// First section id and one of its part ids from the seeded taxonomy.
pub async fn first_section_and_part(app: &Router) -> (String, String) {
    let (status, sections) = get(app, "/api/taxonomy/sections").await;
    assert_eq!(status, StatusCode::OK);
    let section = &sections.as_array().expect("sections array")[0];
    let section_id = section["id"].as_str().expect("section id").to_string();
    let part_id = section["parts"][0]["id"].as_str().expect("part id").to_string();
    (section_id, part_id)
}
