mod common;

use axum::http::StatusCode;
use serde_json::json;

const VIN: &str = "1XKWD49X5PJ123456";
const JPEG_STUB: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0];

async fn seed_job_with_image(t: &common::TestApp) -> (String, String) {
    let (user_id, job_id) = common::seed_job(&t.app, "expert@example.com", VIN).await;
    let (section_id, part_id) = common::first_section_and_part(&t.app).await;
    let body = common::multipart_body(
        &[
            ("job_id", &job_id),
            ("section_id", &section_id),
            ("part_ids", &part_id),
        ],
        Some(("file", "damage.jpg", JPEG_STUB)),
    );
    let (status, _) = common::post_multipart(&t.app, "/api/uploads", body).await;
    assert_eq!(status, StatusCode::OK);
    (user_id, job_id)
}

#[tokio::test]
async fn simulated_analysis_echoes_every_image() {
    let t = common::spawn_app().await;
    let (status, body) = common::post_json(
        &t.app,
        "/api/ai/analyze",
        json!({"images": ["a.jpg", "b.jpg"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["analysis"][0]["image"], "a.jpg");
}

#[tokio::test]
async fn repair_estimate_is_persisted_for_the_job() {
    let t = common::spawn_app().await;
    let (_, job_id) = seed_job_with_image(&t).await;

    let (status, body) = common::post_json(
        &t.app,
        "/api/ai/repair-estimate",
        json!({"job_id": &job_id}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["damage_count"], 1);
    let hours = body["estimate"]["hours"].as_f64().expect("hours");
    let cost = body["estimate"]["cost"].as_f64().expect("cost");
    assert!(hours > 0.0);
    // cost follows the default labor rate
    assert!((cost - hours * 75.0).abs() < 0.01);

    let (_, detail) = common::get(&t.app, &format!("/api/jobs/{job_id}")).await;
    assert_eq!(detail["estimates"].as_array().map(Vec::len), Some(1));

    let (status, _) = common::post_json(
        &t.app,
        "/api/ai/repair-estimate",
        json!({"job_id": "no-such-job"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn expert_correction_overwrites_the_estimate() {
    let t = common::spawn_app().await;
    let (_, job_id) = seed_job_with_image(&t).await;
    common::post_json(
        &t.app,
        "/api/ai/repair-estimate",
        json!({"job_id": &job_id}),
    )
    .await;

    let (status, _) = common::post_json(
        &t.app,
        "/api/estimates",
        json!({"job_id": &job_id, "corrected_hours": -3.0}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = common::post_json(
        &t.app,
        "/api/estimates",
        json!({"job_id": &job_id, "corrected_hours": 12.5, "ai_estimate": 4.2}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["estimate"]["hours"], 12.5);
    assert_eq!(body["estimate"]["cost"], 0.0);

    // still a single estimate row, now carrying the corrected hours
    let (_, detail) = common::get(&t.app, &format!("/api/jobs/{job_id}")).await;
    assert_eq!(detail["estimates"].as_array().map(Vec::len), Some(1));
    assert_eq!(detail["estimates"][0]["hours"], 12.5);
}

#[tokio::test]
async fn corrections_and_feedback_are_recorded() {
    let t = common::spawn_app().await;
    let (user_id, job_id) = seed_job_with_image(&t).await;

    let (status, correction) = common::post_json(
        &t.app,
        "/api/expert-corrections",
        json!({"job_id": &job_id, "actual_hours": 8.0, "ai_estimate": 3.5}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(correction["kind"], "expert_correction");
    assert_eq!(correction["user_id"], "system");
    assert!(
        correction["message"]
            .as_str()
            .expect("synthesized message")
            .contains("8 hours")
    );

    let (_, detail) = common::get(&t.app, &format!("/api/jobs/{job_id}")).await;
    assert_eq!(detail["corrections"].as_array().map(Vec::len), Some(1));

    // plain feedback requires an identity
    let (status, _) = common::post_json(
        &t.app,
        "/api/feedback",
        json!({"job_id": &job_id, "kind": "praise", "actual_hours": 8.0}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, feedback) = common::post_json_as(
        &t.app,
        "/api/feedback",
        &user_id,
        json!({"job_id": &job_id, "kind": "praise", "actual_hours": 8.0, "rating": 5.0}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feedback["user_id"], user_id);

    let (status, _) = common::post_json_as(
        &t.app,
        "/api/feedback",
        &user_id,
        json!({"job_id": "no-such-job", "kind": "praise", "actual_hours": 1.0}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
