use crate::db::models::{DamageType, SeverityLevel};
use crate::db::taxonomy::SectionWithParts;
use crate::error::TruckestError;
use crate::router::TruckestState;
use axum::{Json, extract::State};

/// GET /api/taxonomy/sections
pub async fn sections(
    State(state): State<TruckestState>,
) -> Result<Json<Vec<SectionWithParts>>, TruckestError> {
    Ok(Json(state.db.taxonomy.sections_with_parts().await?))
}

/// GET /api/taxonomy/damage-types
pub async fn damage_types(
    State(state): State<TruckestState>,
) -> Result<Json<Vec<DamageType>>, TruckestError> {
    Ok(Json(state.db.taxonomy.damage_types().await?))
}

/// GET /api/taxonomy/severity-levels
pub async fn severity_levels(
    State(state): State<TruckestState>,
) -> Result<Json<Vec<SeverityLevel>>, TruckestError> {
    Ok(Json(state.db.taxonomy.severity_levels().await?))
}
