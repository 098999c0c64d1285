use crate::error::TruckestError;
use crate::router::TruckestState;
use crate::types::export::{ExportMetadata, ExportStats, TrainingExport, to_csv};
use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub include_unlabeled: Option<bool>,
}

/// GET /api/export/training-data?format=json|csv&include_unlabeled=
pub async fn training_data(
    State(state): State<TruckestState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, TruckestError> {
    let include_unlabeled = query.include_unlabeled.unwrap_or(false);
    let format = query
        .format
        .as_deref()
        .unwrap_or("json")
        .to_ascii_lowercase();

    let records = state.db.images.export_records(include_unlabeled).await?;

    if format == "csv" {
        let csv = to_csv(&records);
        let filename = format!("training-data-{}.csv", Utc::now().format("%Y-%m-%d"));
        return Ok((
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ),
            ],
            csv,
        )
            .into_response());
    }

    let statistics = ExportStats::collect(&records);
    Ok(Json(TrainingExport {
        metadata: ExportMetadata {
            exported_at: Utc::now(),
            format,
            include_unlabeled,
            statistics,
        },
        data: records,
    })
    .into_response())
}
