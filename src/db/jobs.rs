use crate::db::SqlitePool;
use crate::db::models::JobReport;
use crate::error::TruckestError;
use chrono::Utc;
use uuid::Uuid;

#[derive(Clone)]
pub struct JobStore {
    pool: SqlitePool,
}

impl JobStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, vin: &str, uploaded_by: &str) -> Result<JobReport, TruckestError> {
        let now = Utc::now();
        let job = JobReport {
            id: Uuid::new_v4().to_string(),
            vin: vin.to_string(),
            uploaded_by: uploaded_by.to_string(),
            status: "PENDING".to_string(),
            expert_hours: None,
            created_at: now,
            updated_at: now,
        };
        sqlx::query(
            r#"INSERT INTO job_reports (id, vin, uploaded_by, status, expert_hours, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&job.id)
        .bind(&job.vin)
        .bind(&job.uploaded_by)
        .bind(&job.status)
        .bind(job.expert_hours)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(job)
    }

    pub async fn get(&self, id: &str) -> Result<Option<JobReport>, TruckestError> {
        let job = sqlx::query_as::<_, JobReport>(
            r#"SELECT id, vin, uploaded_by, status, expert_hours, created_at, updated_at
               FROM job_reports WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(job)
    }

    pub async fn list(&self) -> Result<Vec<JobReport>, TruckestError> {
        let jobs = sqlx::query_as::<_, JobReport>(
            r#"SELECT id, vin, uploaded_by, status, expert_hours, created_at, updated_at
               FROM job_reports ORDER BY created_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    /// Record the expert's authoritative hours and close the job.
    pub async fn set_expert_hours(
        &self,
        id: &str,
        expert_hours: f64,
    ) -> Result<JobReport, TruckestError> {
        let result = sqlx::query(
            r#"UPDATE job_reports
               SET expert_hours = ?, status = 'COMPLETED', updated_at = ?
               WHERE id = ?"#,
        )
        .bind(expert_hours)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(TruckestError::NotFound("Job"));
        }
        self.get(id).await?.ok_or(TruckestError::NotFound("Job"))
    }

    /// Delete a job and everything hanging off it in one transaction:
    /// label joins, images, estimates, feedback, then the job row itself.
    pub async fn delete(&self, id: &str) -> Result<(), TruckestError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "DELETE FROM image_vehicle_parts WHERE image_id IN (SELECT id FROM images WHERE job_id = ?)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        sqlx::query(
            "DELETE FROM image_damage_types WHERE image_id IN (SELECT id FROM images WHERE job_id = ?)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM images WHERE job_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM repair_estimates WHERE job_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM feedback WHERE job_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM job_reports WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(TruckestError::NotFound("Job"));
        }
        tx.commit().await?;
        Ok(())
    }
}
