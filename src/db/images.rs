use crate::db::SqlitePool;
use crate::db::models::{DamageType, ImageRow, SeverityLevel, TruckSection, VehiclePart};
use crate::error::TruckestError;
use crate::types::export::{ExportLabeler, ExportLabels, ExportRecord, ExportVehicle};
use crate::types::job::LabeledImage;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

/// A freshly uploaded damage photograph with its label selections.
#[derive(Debug, Clone)]
pub struct NewImage {
    pub job_id: String,
    pub image_path: String,
    pub section_id: String,
    pub severity_id: Option<String>,
    pub notes: Option<String>,
    pub part_ids: Vec<String>,
    pub damage_type_ids: Vec<String>,
}

#[derive(Clone)]
pub struct ImageStore {
    pool: SqlitePool,
}

impl ImageStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the image row and its label joins in one transaction.
    pub async fn insert_labeled(&self, new: NewImage) -> Result<LabeledImage, TruckestError> {
        let job: Option<(String,)> = sqlx::query_as("SELECT id FROM job_reports WHERE id = ?")
            .bind(&new.job_id)
            .fetch_optional(&self.pool)
            .await?;
        if job.is_none() {
            return Err(TruckestError::NotFound("Job"));
        }

        let id = Uuid::new_v4().to_string();
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"INSERT INTO images (id, job_id, image_path, section_id, severity_id, notes, uploaded_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&new.job_id)
        .bind(&new.image_path)
        .bind(&new.section_id)
        .bind(&new.severity_id)
        .bind(&new.notes)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
        for part_id in &new.part_ids {
            sqlx::query("INSERT INTO image_vehicle_parts (image_id, part_id) VALUES (?, ?)")
                .bind(&id)
                .bind(part_id)
                .execute(&mut *tx)
                .await?;
        }
        for damage_type_id in &new.damage_type_ids {
            sqlx::query("INSERT INTO image_damage_types (image_id, damage_type_id) VALUES (?, ?)")
                .bind(&id)
                .bind(damage_type_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        self.get_labeled(&id).await
    }

    pub async fn get_labeled(&self, id: &str) -> Result<LabeledImage, TruckestError> {
        let image = sqlx::query_as::<_, ImageRow>(
            r#"SELECT id, job_id, image_path, section_id, severity_id, notes, uploaded_at
               FROM images WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(TruckestError::NotFound("Image"))?;
        self.assemble(image).await
    }

    pub async fn labeled_for_job(&self, job_id: &str) -> Result<Vec<LabeledImage>, TruckestError> {
        let rows = sqlx::query_as::<_, ImageRow>(
            r#"SELECT id, job_id, image_path, section_id, severity_id, notes, uploaded_at
               FROM images WHERE job_id = ? ORDER BY uploaded_at ASC"#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        let mut images = Vec::with_capacity(rows.len());
        for row in rows {
            images.push(self.assemble(row).await?);
        }
        Ok(images)
    }

    async fn assemble(&self, image: ImageRow) -> Result<LabeledImage, TruckestError> {
        let section =
            sqlx::query_as::<_, TruckSection>("SELECT id, name FROM truck_sections WHERE id = ?")
                .bind(&image.section_id)
                .fetch_optional(&self.pool)
                .await?;
        let severity = match &image.severity_id {
            Some(severity_id) => {
                sqlx::query_as::<_, SeverityLevel>(
                    "SELECT id, name, rank FROM severity_levels WHERE id = ?",
                )
                .bind(severity_id)
                .fetch_optional(&self.pool)
                .await?
            }
            None => None,
        };
        let parts = sqlx::query_as::<_, VehiclePart>(
            r#"SELECT vp.id, vp.section_id, vp.name
               FROM image_vehicle_parts ivp
               JOIN vehicle_parts vp ON vp.id = ivp.part_id
               WHERE ivp.image_id = ? ORDER BY vp.name"#,
        )
        .bind(&image.id)
        .fetch_all(&self.pool)
        .await?;
        let damage_types = sqlx::query_as::<_, DamageType>(
            r#"SELECT dt.id, dt.name
               FROM image_damage_types idt
               JOIN damage_types dt ON dt.id = idt.damage_type_id
               WHERE idt.image_id = ? ORDER BY dt.name"#,
        )
        .bind(&image.id)
        .fetch_all(&self.pool)
        .await?;
        Ok(LabeledImage {
            image,
            section,
            severity,
            parts,
            damage_types,
        })
    }

    /// Flatten the whole corpus into export records, newest upload first.
    /// Unlabeled images (no part associations) are skipped unless requested.
    pub async fn export_records(
        &self,
        include_unlabeled: bool,
    ) -> Result<Vec<ExportRecord>, TruckestError> {
        let images = sqlx::query_as::<_, ImageRow>(
            r#"SELECT id, job_id, image_path, section_id, severity_id, notes, uploaded_at
               FROM images ORDER BY uploaded_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut parts_by_image: HashMap<String, Vec<String>> = HashMap::new();
        let part_rows = sqlx::query_as::<_, (String, String)>(
            r#"SELECT ivp.image_id, vp.name
               FROM image_vehicle_parts ivp
               JOIN vehicle_parts vp ON vp.id = ivp.part_id
               ORDER BY vp.name"#,
        )
        .fetch_all(&self.pool)
        .await?;
        for (image_id, name) in part_rows {
            parts_by_image.entry(image_id).or_default().push(name);
        }

        let mut damage_by_image: HashMap<String, Vec<String>> = HashMap::new();
        let damage_rows = sqlx::query_as::<_, (String, String)>(
            r#"SELECT idt.image_id, dt.name
               FROM image_damage_types idt
               JOIN damage_types dt ON dt.id = idt.damage_type_id
               ORDER BY dt.name"#,
        )
        .fetch_all(&self.pool)
        .await?;
        for (image_id, name) in damage_rows {
            damage_by_image.entry(image_id).or_default().push(name);
        }

        let severity_names: HashMap<String, String> =
            sqlx::query_as::<_, (String, String)>("SELECT id, name FROM severity_levels")
                .fetch_all(&self.pool)
                .await?
                .into_iter()
                .collect();

        let job_rows = sqlx::query_as::<_, (String, String, String, DateTime<Utc>)>(
            "SELECT id, vin, uploaded_by, created_at FROM job_reports",
        )
        .fetch_all(&self.pool)
        .await?;
        let jobs: HashMap<String, (String, String, DateTime<Utc>)> = job_rows
            .into_iter()
            .map(|(id, vin, uploaded_by, created_at)| (id, (vin, uploaded_by, created_at)))
            .collect();

        let vehicle_rows = sqlx::query_as::<
            _,
            (
                String,
                Option<String>,
                Option<String>,
                Option<i64>,
                Option<String>,
                Option<String>,
                Option<String>,
                Option<String>,
            ),
        >(
            r#"SELECT vin, make, model, year, vehicle_type, body_class, weight_class, gvwr
               FROM vehicles"#,
        )
        .fetch_all(&self.pool)
        .await?;
        let vehicles: HashMap<String, ExportVehicle> = vehicle_rows
            .into_iter()
            .map(
                |(vin, make, model, year, vehicle_type, body_class, weight_class, gvwr)| {
                    (
                        vin.clone(),
                        ExportVehicle {
                            vin,
                            make,
                            model,
                            year,
                            vehicle_type,
                            body_class,
                            weight_class,
                            gvwr,
                        },
                    )
                },
            )
            .collect();

        let user_rows = sqlx::query_as::<_, (String, String, Option<String>)>(
            "SELECT id, name, experience_level FROM users",
        )
        .fetch_all(&self.pool)
        .await?;
        let users: HashMap<String, (String, Option<String>)> = user_rows
            .into_iter()
            .map(|(id, name, experience_level)| (id, (name, experience_level)))
            .collect();

        let mut records = Vec::with_capacity(images.len());
        for image in images {
            let parts = parts_by_image.remove(&image.id).unwrap_or_default();
            if !include_unlabeled && parts.is_empty() {
                continue;
            }
            let job = jobs.get(&image.job_id);
            let labeler = job
                .and_then(|(_, uploaded_by, _)| users.get(uploaded_by).map(|u| (uploaded_by, u)))
                .map(|(user_id, (name, experience_level))| ExportLabeler {
                    user_id: user_id.clone(),
                    name: name.clone(),
                    experience_level: experience_level.clone(),
                });
            records.push(ExportRecord {
                image_id: image.id.clone(),
                image_path: image.image_path,
                uploaded_at: image.uploaded_at,
                labels: ExportLabels {
                    parts,
                    damage_types: damage_by_image.remove(&image.id).unwrap_or_default(),
                    severity: image
                        .severity_id
                        .as_ref()
                        .and_then(|id| severity_names.get(id).cloned()),
                    notes: image.notes,
                },
                vehicle: job.and_then(|(vin, _, _)| vehicles.get(vin).cloned()),
                job_id: image.job_id.clone(),
                job_created_at: job.map(|(_, _, created_at)| *created_at),
                labeler,
            });
        }
        Ok(records)
    }
}
