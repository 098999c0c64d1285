use crate::db::models::JobReport;
use crate::error::TruckestError;
use crate::middleware::identity::RequireUser;
use crate::router::TruckestState;
use crate::types::job::JobDetail;
use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub vin: String,
}

/// POST /api/jobs
pub async fn create_job(
    State(state): State<TruckestState>,
    RequireUser(user_id): RequireUser,
    Json(req): Json<CreateJobRequest>,
) -> Result<Json<JobReport>, TruckestError> {
    let vin = req.vin.trim().to_ascii_uppercase();
    if vin.len() < 5 {
        return Err(TruckestError::BadRequest("vin is required".to_string()));
    }
    // jobs may reference vehicles that were never registry-decoded
    state
        .db
        .vehicles
        .upsert_manual(&crate::db::vehicles::ManualVehicle {
            vin: vin.clone(),
            ..Default::default()
        })
        .await?;
    let job = state.db.jobs.create(&vin, &user_id).await?;
    Ok(Json(job))
}

/// GET /api/jobs
pub async fn list_jobs(
    State(state): State<TruckestState>,
) -> Result<Json<Vec<JobDetail>>, TruckestError> {
    Ok(Json(state.db.job_details().await?))
}

/// GET /api/jobs/{id}
pub async fn get_job(
    State(state): State<TruckestState>,
    Path(id): Path<String>,
) -> Result<Json<JobDetail>, TruckestError> {
    let job = state
        .db
        .jobs
        .get(&id)
        .await?
        .ok_or(TruckestError::NotFound("Job"))?;
    Ok(Json(state.db.job_detail(job).await?))
}

#[derive(Debug, Deserialize)]
pub struct UpdateJobRequest {
    pub expert_hours: f64,
}

#[derive(Debug, Serialize)]
pub struct DeleteJobResponse {
    pub deleted: bool,
}

/// PUT /api/jobs/{id}: record the expert's hours and close the job.
pub async fn update_job(
    State(state): State<TruckestState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateJobRequest>,
) -> Result<Json<JobReport>, TruckestError> {
    if !req.expert_hours.is_finite() || req.expert_hours < 0.0 {
        return Err(TruckestError::BadRequest(
            "Expert hours must be a non-negative number".to_string(),
        ));
    }
    let job = state.db.jobs.set_expert_hours(&id, req.expert_hours).await?;
    Ok(Json(job))
}

/// DELETE /api/jobs/{id}
pub async fn delete_job(
    State(state): State<TruckestState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteJobResponse>, TruckestError> {
    state.db.jobs.delete(&id).await?;
    Ok(Json(DeleteJobResponse { deleted: true }))
}
