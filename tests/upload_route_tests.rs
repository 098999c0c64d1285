mod common;

use axum::http::StatusCode;

const VIN: &str = "1XKWD49X5PJ123456";
const JPEG_STUB: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];

#[tokio::test]
async fn upload_probe_is_accessible() {
    let t = common::spawn_app().await;
    let (status, body) = common::get(&t.app, "/api/uploads").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["methods"][0], "POST");
}

#[tokio::test]
async fn damage_upload_stores_file_and_labels() {
    let t = common::spawn_app().await;
    let (_, job_id) = common::seed_job(&t.app, "labeler@example.com", VIN).await;
    let (section_id, part_id) = common::first_section_and_part(&t.app).await;

    let (_, severity_levels) = common::get(&t.app, "/api/taxonomy/severity-levels").await;
    let severity_id = severity_levels[0]["id"].as_str().expect("severity id");
    let (_, damage_types) = common::get(&t.app, "/api/taxonomy/damage-types").await;
    let damage_type_id = damage_types[0]["id"].as_str().expect("damage type id");

    let body = common::multipart_body(
        &[
            ("job_id", &job_id),
            ("section_id", &section_id),
            ("part_ids", &part_id),
            ("damage_type_ids", damage_type_id),
            ("severity_id", severity_id),
            ("notes", "deep scrape near the wheel arch"),
        ],
        Some(("file", "damage.jpg", JPEG_STUB)),
    );
    let (status, image) = common::post_multipart(&t.app, "/api/uploads", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(image["job_id"], job_id);
    assert_eq!(image["parts"].as_array().map(Vec::len), Some(1));
    assert_eq!(image["damage_types"].as_array().map(Vec::len), Some(1));
    assert_eq!(image["severity"]["name"], severity_levels[0]["name"]);

    // the file landed in the upload dir under the public path
    let image_path = image["image_path"].as_str().expect("image path");
    let filename = image_path.strip_prefix("/uploads/").expect("public prefix");
    let on_disk = t.state.cfg.upload_dir.join(filename);
    assert_eq!(std::fs::read(on_disk).expect("uploaded file"), JPEG_STUB);

    // and the job detail now carries the labeled image
    let (_, detail) = common::get(&t.app, &format!("/api/jobs/{job_id}")).await;
    assert_eq!(detail["images"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn damage_upload_requires_labels_and_a_known_job() {
    let t = common::spawn_app().await;
    let (_, job_id) = common::seed_job(&t.app, "labeler@example.com", VIN).await;
    let (section_id, part_id) = common::first_section_and_part(&t.app).await;

    // no parts selected
    let body = common::multipart_body(
        &[("job_id", &job_id), ("section_id", &section_id)],
        Some(("file", "damage.jpg", JPEG_STUB)),
    );
    let (status, _) = common::post_multipart(&t.app, "/api/uploads", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // no file
    let body = common::multipart_body(
        &[
            ("job_id", &job_id),
            ("section_id", &section_id),
            ("part_ids", &part_id),
        ],
        None,
    );
    let (status, _) = common::post_multipart(&t.app, "/api/uploads", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // unknown job
    let body = common::multipart_body(
        &[
            ("job_id", "no-such-job"),
            ("section_id", &section_id),
            ("part_ids", &part_id),
        ],
        Some(("file", "damage.jpg", JPEG_STUB)),
    );
    let (status, _) = common::post_multipart(&t.app, "/api/uploads", body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reference_image_lifecycle() {
    let t = common::spawn_app().await;

    let (status, _) = common::get(&t.app, "/api/reference-images").await;
    // vin query parameter is mandatory
    assert_ne!(status, StatusCode::OK);

    let body = common::multipart_body(
        &[("vin", VIN), ("angle", "front")],
        Some(("file", "front.jpg", JPEG_STUB)),
    );
    let (status, image) = common::post_multipart(&t.app, "/api/reference-images", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(image["vin"], VIN);
    assert_eq!(image["angle"], "front");
    let image_id = image["id"].as_str().expect("image id");
    let filename = image["image_path"]
        .as_str()
        .and_then(|p| p.strip_prefix("/uploads/"))
        .expect("public prefix")
        .to_string();
    assert!(t.state.cfg.upload_dir.join(&filename).exists());

    let (status, listed) =
        common::get(&t.app, &format!("/api/reference-images?vin={VIN}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let (status, deleted) =
        common::delete(&t.app, &format!("/api/reference-images/{image_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["deleted"], true);
    assert!(!t.state.cfg.upload_dir.join(&filename).exists());

    let (_, listed) = common::get(&t.app, &format!("/api/reference-images?vin={VIN}")).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(0));

    let (status, _) =
        common::delete(&t.app, &format!("/api/reference-images/{image_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
