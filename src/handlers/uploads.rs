use crate::db::images::NewImage;
use crate::db::models::VehicleReferenceImage;
use crate::error::TruckestError;
use crate::router::TruckestState;
use crate::types::job::LabeledImage;
use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};
use chrono::Utc;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::path::Path as FsPath;
use tracing::{info, warn};

/// GET /api/uploads: availability probe kept for the frontend.
pub async fn probe() -> Json<Value> {
    Json(json!({
        "message": "Upload API is accessible",
        "methods": ["POST"],
        "timestamp": Utc::now(),
    }))
}

struct UploadedFile {
    original_name: String,
    bytes: axum::body::Bytes,
}

#[derive(Default)]
struct DamageUploadFields {
    file: Option<UploadedFile>,
    job_id: Option<String>,
    section_id: Option<String>,
    part_ids: Vec<String>,
    damage_type_ids: Vec<String>,
    severity_id: Option<String>,
    notes: Option<String>,
}

async fn collect_damage_fields(
    mut multipart: Multipart,
) -> Result<DamageUploadFields, TruckestError> {
    let mut fields = DamageUploadFields::default();
    while let Some(field) = multipart.next_field().await? {
        match field.name().unwrap_or_default() {
            "file" => {
                let original_name = field.file_name().unwrap_or("upload").to_string();
                fields.file = Some(UploadedFile {
                    original_name,
                    bytes: field.bytes().await?,
                });
            }
            "job_id" => fields.job_id = Some(field.text().await?),
            "section_id" => fields.section_id = Some(field.text().await?),
            "part_ids" => fields.part_ids.push(field.text().await?),
            "damage_type_ids" => fields.damage_type_ids.push(field.text().await?),
            "severity_id" => fields.severity_id = Some(field.text().await?),
            "notes" => fields.notes = Some(field.text().await?),
            other => {
                warn!(field = other, "ignoring unknown multipart field");
            }
        }
    }
    Ok(fields)
}

/// Unique on-disk name: `{scope}-{millis}-{hex}{ext}`, extension taken from
/// the client's filename.
fn unique_filename(scope: &str, original_name: &str) -> String {
    let ext = FsPath::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    let mut suffix = [0u8; 5];
    rand::thread_rng().fill_bytes(&mut suffix);
    format!(
        "{scope}-{}-{}{ext}",
        Utc::now().timestamp_millis(),
        hex::encode(suffix)
    )
}

async fn write_upload(
    state: &TruckestState,
    filename: &str,
    bytes: &[u8],
) -> Result<String, TruckestError> {
    tokio::fs::write(state.cfg.upload_dir.join(filename), bytes).await?;
    Ok(format!("/uploads/{filename}"))
}

/// POST /api/uploads: a damage photograph with its labels, multipart.
pub async fn upload_damage_image(
    State(state): State<TruckestState>,
    multipart: Multipart,
) -> Result<Json<LabeledImage>, TruckestError> {
    let fields = collect_damage_fields(multipart).await?;
    let Some(file) = fields.file else {
        return Err(TruckestError::BadRequest("No file uploaded".to_string()));
    };
    let (Some(job_id), Some(section_id)) = (fields.job_id, fields.section_id) else {
        return Err(TruckestError::BadRequest(
            "job_id and section_id are required".to_string(),
        ));
    };
    if fields.part_ids.is_empty() {
        return Err(TruckestError::BadRequest(
            "At least one vehicle part is required".to_string(),
        ));
    }

    let filename = unique_filename(&job_id, &file.original_name);
    let image_path = write_upload(&state, &filename, &file.bytes).await?;

    let image = state
        .db
        .images
        .insert_labeled(NewImage {
            job_id,
            image_path,
            section_id,
            severity_id: fields.severity_id.filter(|s| !s.is_empty()),
            notes: fields.notes.filter(|s| !s.is_empty()),
            part_ids: fields.part_ids,
            damage_type_ids: fields.damage_type_ids,
        })
        .await?;
    info!(image_id = %image.image.id, job_id = %image.image.job_id, "damage image stored");
    Ok(Json(image))
}

#[derive(Debug, Deserialize)]
pub struct ReferenceImageQuery {
    pub vin: String,
}

/// GET /api/reference-images?vin=<vin>
pub async fn list_reference_images(
    State(state): State<TruckestState>,
    Query(query): Query<ReferenceImageQuery>,
) -> Result<Json<Vec<VehicleReferenceImage>>, TruckestError> {
    let vin = query.vin.trim().to_ascii_uppercase();
    if vin.is_empty() {
        return Err(TruckestError::BadRequest("VIN is required".to_string()));
    }
    Ok(Json(state.db.vehicles.reference_images(&vin).await?))
}

/// POST /api/reference-images: multipart upload of a per-VIN training shot.
pub async fn upload_reference_image(
    State(state): State<TruckestState>,
    mut multipart: Multipart,
) -> Result<Json<VehicleReferenceImage>, TruckestError> {
    let mut file: Option<UploadedFile> = None;
    let mut vin: Option<String> = None;
    let mut angle: Option<String> = None;
    while let Some(field) = multipart.next_field().await? {
        match field.name().unwrap_or_default() {
            "file" => {
                let original_name = field.file_name().unwrap_or("upload").to_string();
                file = Some(UploadedFile {
                    original_name,
                    bytes: field.bytes().await?,
                });
            }
            "vin" => vin = Some(field.text().await?),
            "angle" => angle = Some(field.text().await?),
            other => {
                warn!(field = other, "ignoring unknown multipart field");
            }
        }
    }

    let Some(file) = file else {
        return Err(TruckestError::BadRequest("No file uploaded".to_string()));
    };
    let vin = vin
        .map(|v| v.trim().to_ascii_uppercase())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| TruckestError::BadRequest("VIN is required".to_string()))?;
    let angle = angle.filter(|a| !a.is_empty());

    let scope = format!("{vin}-{}", angle.as_deref().unwrap_or("misc"));
    let filename = unique_filename(&scope, &file.original_name);
    let image_path = write_upload(&state, &filename, &file.bytes).await?;

    let image = state
        .db
        .vehicles
        .add_reference_image(&vin, &image_path, angle.as_deref())
        .await?;
    Ok(Json(image))
}

#[derive(Debug, Serialize)]
pub struct DeleteReferenceImageResponse {
    pub deleted: bool,
}

/// DELETE /api/reference-images/{id}: removes the row and best-effort
/// deletes the file from disk.
pub async fn delete_reference_image(
    State(state): State<TruckestState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteReferenceImageResponse>, TruckestError> {
    let image = state
        .db
        .vehicles
        .delete_reference_image(&id)
        .await?
        .ok_or(TruckestError::NotFound("Reference image"))?;

    // basename only: never follow a stored path outside the upload dir
    if let Some(filename) = FsPath::new(&image.image_path).file_name() {
        if let Err(e) = tokio::fs::remove_file(state.cfg.upload_dir.join(filename)).await {
            warn!(image_id = %image.id, error = %e, "reference image file removal failed");
        }
    }
    Ok(Json(DeleteReferenceImageResponse { deleted: true }))
}
