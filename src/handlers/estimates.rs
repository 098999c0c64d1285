use crate::db::estimates::NewFeedback;
use crate::db::models::{Feedback, RepairEstimate};
use crate::error::TruckestError;
use crate::middleware::identity::{MaybeUser, RequireUser};
use crate::router::TruckestState;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub images: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzedImage {
    pub image: String,
    pub result: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub message: &'static str,
    pub analysis: Vec<AnalyzedImage>,
}

/// POST /api/ai/analyze: simulated per-image detection, a stand-in until a
/// real model is wired up.
pub async fn analyze(Json(req): Json<AnalyzeRequest>) -> Json<AnalyzeResponse> {
    let analysis = req
        .images
        .into_iter()
        .map(|image| AnalyzedImage {
            image,
            result: "Detected: surface damage with 90% confidence".to_string(),
        })
        .collect();
    Json(AnalyzeResponse {
        message: "Simulated AI response",
        analysis,
    })
}

#[derive(Debug, Deserialize)]
pub struct RepairEstimateRequest {
    pub job_id: String,
}

#[derive(Debug, Serialize)]
pub struct RepairEstimateResponse {
    pub estimate: RepairEstimate,
    pub damage_count: usize,
    pub summary: String,
}

/// POST /api/ai/repair-estimate: quote the job's labeled damage with the
/// placeholder estimator and persist the result.
pub async fn repair_estimate(
    State(state): State<TruckestState>,
    Json(req): Json<RepairEstimateRequest>,
) -> Result<Json<RepairEstimateResponse>, TruckestError> {
    let job = state
        .db
        .jobs
        .get(&req.job_id)
        .await?
        .ok_or(TruckestError::NotFound("Job"))?;
    let images = state.db.images.labeled_for_job(&job.id).await?;

    let quote = state.estimator.quote(&images);
    let estimate = state
        .db
        .estimates
        .insert(&job.id, quote.hours, quote.cost)
        .await?;
    info!(job_id = %job.id, hours = quote.hours, "simulated repair estimate stored");

    let summary = format!(
        "Estimated repair time for VIN {} with {} damage image(s): approximately {} hours.",
        job.vin,
        images.len(),
        quote.hours
    );
    Ok(Json(RepairEstimateResponse {
        estimate,
        damage_count: images.len(),
        summary,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CorrectEstimateRequest {
    pub job_id: String,
    pub corrected_hours: f64,
    #[serde(default)]
    pub ai_estimate: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CorrectEstimateResponse {
    pub estimate: RepairEstimate,
    pub ai_estimate: Option<f64>,
}

/// POST /api/estimates: overwrite the job's estimate with expert hours.
pub async fn correct_estimate(
    State(state): State<TruckestState>,
    Json(req): Json<CorrectEstimateRequest>,
) -> Result<Json<CorrectEstimateResponse>, TruckestError> {
    if !req.corrected_hours.is_finite() || req.corrected_hours < 0.0 {
        return Err(TruckestError::BadRequest(
            "Corrected hours must be a non-negative number".to_string(),
        ));
    }
    let estimate = state
        .db
        .estimates
        .correct_for_job(&req.job_id, req.corrected_hours)
        .await?;
    Ok(Json(CorrectEstimateResponse {
        estimate,
        ai_estimate: req.ai_estimate,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ExpertCorrectionRequest {
    pub job_id: String,
    pub actual_hours: f64,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub ai_estimate: Option<f64>,
}

/// POST /api/expert-corrections: record a correction as feedback.
pub async fn expert_correction(
    State(state): State<TruckestState>,
    user: MaybeUser,
    Json(req): Json<ExpertCorrectionRequest>,
) -> Result<Json<Feedback>, TruckestError> {
    if !req.actual_hours.is_finite() || req.actual_hours < 0.0 {
        return Err(TruckestError::BadRequest(
            "Actual hours must be a non-negative number".to_string(),
        ));
    }
    let message = req.message.or_else(|| {
        req.ai_estimate.map(|ai| {
            format!(
                "Expert corrected AI estimate to {} hours. AI was {ai} hours.",
                req.actual_hours
            )
        })
    });
    let feedback = state
        .db
        .estimates
        .insert_feedback(NewFeedback {
            job_id: req.job_id,
            user_id: user.id().to_string(),
            kind: req.kind.unwrap_or_else(|| "expert_correction".to_string()),
            message,
            actual_hours: Some(req.actual_hours),
            rating: req.rating,
        })
        .await?;
    Ok(Json(feedback))
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub job_id: String,
    pub kind: String,
    pub actual_hours: f64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// POST /api/feedback: requires an authenticated caller.
pub async fn submit_feedback(
    State(state): State<TruckestState>,
    RequireUser(user_id): RequireUser,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<Feedback>, TruckestError> {
    if !req.actual_hours.is_finite() || req.actual_hours < 0.0 {
        return Err(TruckestError::BadRequest(
            "Actual hours must be a non-negative number".to_string(),
        ));
    }
    let feedback = state
        .db
        .estimates
        .insert_feedback(NewFeedback {
            job_id: req.job_id,
            user_id,
            kind: req.kind,
            message: req.message,
            actual_hours: Some(req.actual_hours),
            rating: req.rating,
        })
        .await?;
    Ok(Json(feedback))
}
