//! Training-data export shapes: one flattened record per image, corpus
//! statistics, and the CSV rendering used by the export endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct ExportLabels {
    pub parts: Vec<String>,
    pub damage_types: Vec<String>,
    pub severity: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportVehicle {
    pub vin: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i64>,
    pub vehicle_type: Option<String>,
    pub body_class: Option<String>,
    pub weight_class: Option<String>,
    pub gvwr: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportLabeler {
    pub user_id: String,
    pub name: String,
    pub experience_level: Option<String>,
}

/// One image flattened for model training: labels, vehicle context and the
/// labeler who produced it.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRecord {
    pub image_id: String,
    pub image_path: String,
    pub uploaded_at: DateTime<Utc>,
    pub labels: ExportLabels,
    pub vehicle: Option<ExportVehicle>,
    pub job_id: String,
    pub job_created_at: Option<DateTime<Utc>>,
    pub labeler: Option<ExportLabeler>,
}

impl ExportRecord {
    pub fn is_labeled(&self) -> bool {
        !self.labels.parts.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportStats {
    pub total_images: usize,
    pub labeled_images: usize,
    pub unlabeled_images: usize,
    pub part_distribution: BTreeMap<String, u64>,
    pub damage_type_distribution: BTreeMap<String, u64>,
    pub severity_distribution: BTreeMap<String, u64>,
    pub vehicle_type_distribution: BTreeMap<String, u64>,
}

impl ExportStats {
    pub fn collect(records: &[ExportRecord]) -> Self {
        let mut stats = Self {
            total_images: records.len(),
            ..Self::default()
        };
        for record in records {
            if record.is_labeled() {
                stats.labeled_images += 1;
            } else {
                stats.unlabeled_images += 1;
            }
            for part in &record.labels.parts {
                *stats.part_distribution.entry(part.clone()).or_default() += 1;
            }
            for damage in &record.labels.damage_types {
                *stats
                    .damage_type_distribution
                    .entry(damage.clone())
                    .or_default() += 1;
            }
            if let Some(severity) = &record.labels.severity {
                *stats
                    .severity_distribution
                    .entry(severity.clone())
                    .or_default() += 1;
            }
            if let Some(vehicle_type) = record
                .vehicle
                .as_ref()
                .and_then(|v| v.vehicle_type.as_ref())
            {
                *stats
                    .vehicle_type_distribution
                    .entry(vehicle_type.clone())
                    .or_default() += 1;
            }
        }
        stats
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub exported_at: DateTime<Utc>,
    pub format: String,
    pub include_unlabeled: bool,
    pub statistics: ExportStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingExport {
    pub metadata: ExportMetadata,
    pub data: Vec<ExportRecord>,
}

const CSV_HEADERS: &[&str] = &[
    "image_id",
    "image_path",
    "uploaded_at",
    "parts",
    "damage_types",
    "severity",
    "notes",
    "vin",
    "make",
    "model",
    "year",
    "vehicle_type",
    "body_class",
    "weight_class",
    "gvwr",
    "job_id",
    "job_created_at",
    "labeler_experience",
];

/// Render records as RFC4180 CSV: every field quoted, quotes doubled,
/// multi-value label columns joined with `|`.
pub fn to_csv(records: &[ExportRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(csv_row(CSV_HEADERS.iter().map(|h| h.to_string())));
    for record in records {
        let vehicle = record.vehicle.as_ref();
        lines.push(csv_row(
            [
                record.image_id.clone(),
                record.image_path.clone(),
                record.uploaded_at.to_rfc3339(),
                record.labels.parts.join("|"),
                record.labels.damage_types.join("|"),
                record.labels.severity.clone().unwrap_or_default(),
                record.labels.notes.clone().unwrap_or_default(),
                vehicle.map(|v| v.vin.clone()).unwrap_or_default(),
                vehicle.and_then(|v| v.make.clone()).unwrap_or_default(),
                vehicle.and_then(|v| v.model.clone()).unwrap_or_default(),
                vehicle
                    .and_then(|v| v.year.map(|y| y.to_string()))
                    .unwrap_or_default(),
                vehicle
                    .and_then(|v| v.vehicle_type.clone())
                    .unwrap_or_default(),
                vehicle
                    .and_then(|v| v.body_class.clone())
                    .unwrap_or_default(),
                vehicle
                    .and_then(|v| v.weight_class.clone())
                    .unwrap_or_default(),
                vehicle.and_then(|v| v.gvwr.clone()).unwrap_or_default(),
                record.job_id.clone(),
                record
                    .job_created_at
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default(),
                record
                    .labeler
                    .as_ref()
                    .and_then(|l| l.experience_level.clone())
                    .unwrap_or_default(),
            ]
            .into_iter(),
        ));
    }
    lines.join("\n")
}

fn csv_row(fields: impl Iterator<Item = String>) -> String {
    fields
        .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(parts: Vec<&str>, severity: Option<&str>) -> ExportRecord {
        ExportRecord {
            image_id: "img-1".to_string(),
            image_path: "/uploads/img-1.jpg".to_string(),
            uploaded_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            labels: ExportLabels {
                parts: parts.into_iter().map(String::from).collect(),
                damage_types: vec!["Dent".to_string(), "Rust".to_string()],
                severity: severity.map(String::from),
                notes: Some("lower \"edge\" scuffed".to_string()),
            },
            vehicle: Some(ExportVehicle {
                vin: "1XKWD49X5PJ123456".to_string(),
                make: Some("KENWORTH".to_string()),
                model: Some("T680".to_string()),
                year: Some(2023),
                vehicle_type: Some("TRUCK".to_string()),
                body_class: None,
                weight_class: None,
                gvwr: None,
            }),
            job_id: "job-1".to_string(),
            job_created_at: None,
            labeler: None,
        }
    }

    #[test]
    fn stats_count_labeled_and_distributions() {
        let records = vec![
            record(vec!["LT Door", "LT Fender"], Some("Severe")),
            record(vec![], None),
        ];
        let stats = ExportStats::collect(&records);
        assert_eq!(stats.total_images, 2);
        assert_eq!(stats.labeled_images, 1);
        assert_eq!(stats.unlabeled_images, 1);
        assert_eq!(stats.part_distribution.get("LT Door"), Some(&1));
        assert_eq!(stats.damage_type_distribution.get("Dent"), Some(&2));
        assert_eq!(stats.severity_distribution.get("Severe"), Some(&1));
        assert_eq!(stats.vehicle_type_distribution.get("TRUCK"), Some(&2));
    }

    #[test]
    fn csv_joins_multivalue_columns_and_doubles_quotes() {
        let csv = to_csv(&[record(vec!["LT Door", "LT Fender"], Some("Severe"))]);
        let mut lines = csv.lines();
        assert!(lines.next().expect("header").starts_with("\"image_id\""));
        let row = lines.next().expect("data row");
        assert!(row.contains("\"LT Door|LT Fender\""));
        assert!(row.contains("\"Dent|Rust\""));
        assert!(row.contains("\"lower \"\"edge\"\" scuffed\""));
        assert_eq!(row.split("\",\"").count(), CSV_HEADERS.len());
    }
}
