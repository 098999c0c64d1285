use crate::db::models::Vehicle;
use crate::db::vehicles::ManualVehicle;
use crate::error::TruckestError;
use crate::middleware::identity::MaybeUser;
use crate::router::TruckestState;
use crate::types::registry::VehicleProfile;
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

const VIN_LEN: usize = 17;

#[derive(Debug, Deserialize)]
pub struct DecodeVinRequest {
    pub vin: String,
}

#[derive(Debug, Serialize)]
pub struct DecodeVinResponse {
    pub vehicle: VehicleProfile,
    pub source: &'static str,
    pub retrieved_at: DateTime<Utc>,
    /// Id of the job opened for this lookup; absent when persistence failed.
    pub job_id: Option<String>,
}

/// POST /api/vin/decode
///
/// Decodes through the registry, then upserts the vehicle and opens a job for
/// the caller. A storage failure after a successful decode is logged and the
/// profile is still returned, just without a job id.
pub async fn decode_vin(
    State(state): State<TruckestState>,
    user: MaybeUser,
    Json(req): Json<DecodeVinRequest>,
) -> Result<Json<DecodeVinResponse>, TruckestError> {
    let vin = req.vin.trim().to_ascii_uppercase();
    if vin.len() != VIN_LEN {
        return Err(TruckestError::BadRequest(format!(
            "VIN must be exactly {VIN_LEN} characters"
        )));
    }

    let profile = state.registry.decode(&vin).await?;

    let notes = format!("registry lookup: {}", Utc::now().to_rfc3339());
    let job_id = match persist_lookup(&state, &profile, &notes, user.id()).await {
        Ok(job_id) => Some(job_id),
        Err(e) => {
            warn!(vin = %vin, error = %e, "vehicle persistence failed; continuing without job");
            None
        }
    };

    Ok(Json(DecodeVinResponse {
        vehicle: profile,
        source: "NHTSA",
        retrieved_at: Utc::now(),
        job_id,
    }))
}

async fn persist_lookup(
    state: &TruckestState,
    profile: &VehicleProfile,
    notes: &str,
    user_id: &str,
) -> Result<String, TruckestError> {
    let vehicle = state.db.vehicles.upsert_profile(profile, Some(notes)).await?;
    let job = state.db.jobs.create(&vehicle.vin, user_id).await?;
    Ok(job.id)
}

#[derive(Debug, Deserialize)]
pub struct UpsertVehicleRequest {
    pub vin: String,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub weight_class: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub reference_image_path: Option<String>,
}

/// POST /api/vehicles: manual upsert-by-VIN; an existing vehicle is
/// returned unchanged.
pub async fn upsert_vehicle(
    State(state): State<TruckestState>,
    Json(req): Json<UpsertVehicleRequest>,
) -> Result<Json<Vehicle>, TruckestError> {
    let vin = req.vin.trim().to_ascii_uppercase();
    if vin.len() < 5 {
        return Err(TruckestError::BadRequest("vin is required".to_string()));
    }
    let vehicle = state
        .db
        .vehicles
        .upsert_manual(&ManualVehicle {
            vin,
            vehicle_type: req.vehicle_type,
            make: req.make,
            model: req.model,
            year: req.year,
            weight_class: req.weight_class,
            owner: req.owner,
            notes: req.notes,
            reference_image_path: req.reference_image_path,
        })
        .await?;
    Ok(Json(vehicle))
}
