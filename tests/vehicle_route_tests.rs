mod common;

use axum::http::StatusCode;
use serde_json::json;

const VIN: &str = "1XKWD49X5PJ123456";

#[tokio::test]
async fn vin_decode_validates_length_before_touching_the_registry() {
    let t = common::spawn_app().await;

    let (status, body) = common::post_json(&t.app, "/api/vin/decode", json!({"vin": "ABC123"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, _) = common::post_json(&t.app, "/api/vin/decode", json!({"vin": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn manual_vehicle_upsert_is_idempotent_by_vin() {
    let t = common::spawn_app().await;

    let (status, created) = common::post_json(
        &t.app,
        "/api/vehicles",
        json!({"vin": VIN, "make": "KENWORTH", "model": "T680", "year": 2023, "owner": "ACME Freight"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["make"], "KENWORTH");

    // a second upsert leaves the existing record untouched
    let (status, second) = common::post_json(
        &t.app,
        "/api/vehicles",
        json!({"vin": VIN, "make": "PETERBILT", "model": "579"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["make"], "KENWORTH");
    assert_eq!(second["owner"], "ACME Freight");

    let (status, _) = common::post_json(&t.app, "/api/vehicles", json!({"vin": "123"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
