use crate::config::Config;
use crate::db::Database;
use crate::handlers::{auth, estimates, export, jobs, taxonomy, uploads, vehicles};
use crate::service::estimator::RepairEstimator;
use crate::service::registry::VinRegistry;
use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};

#[derive(Clone)]
pub struct TruckestState {
    pub cfg: Arc<Config>,
    pub db: Database,
    pub registry: VinRegistry,
    pub estimator: RepairEstimator,
}

impl TruckestState {
    pub fn new(cfg: Config, db: Database) -> Self {
        let registry = VinRegistry::new(&cfg);
        let estimator = RepairEstimator::new(cfg.labor_rate_per_hour);
        Self {
            cfg: Arc::new(cfg),
            db,
            registry,
            estimator,
        }
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

pub fn truckest_router(state: TruckestState) -> Router {
    let upload_dir = state.cfg.upload_dir.clone();
    let max_upload_bytes = state.cfg.max_upload_bytes;

    let api = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password", post(auth::reset_password))
        .route("/taxonomy/sections", get(taxonomy::sections))
        .route("/taxonomy/damage-types", get(taxonomy::damage_types))
        .route("/taxonomy/severity-levels", get(taxonomy::severity_levels))
        .route("/vin/decode", post(vehicles::decode_vin))
        .route("/vehicles", post(vehicles::upsert_vehicle))
        .route("/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route(
            "/jobs/{id}",
            get(jobs::get_job).put(jobs::update_job).delete(jobs::delete_job),
        )
        .route(
            "/uploads",
            get(uploads::probe).post(uploads::upload_damage_image),
        )
        .route(
            "/reference-images",
            get(uploads::list_reference_images).post(uploads::upload_reference_image),
        )
        .route(
            "/reference-images/{id}",
            delete(uploads::delete_reference_image),
        )
        .route("/export/training-data", get(export::training_data))
        .route("/ai/analyze", post(estimates::analyze))
        .route("/ai/repair-estimate", post(estimates::repair_estimate))
        .route("/estimates", post(estimates::correct_estimate))
        .route("/expert-corrections", post(estimates::expert_correction))
        .route("/feedback", post(estimates::submit_feedback))
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    Router::new()
        .nest("/api", api)
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
