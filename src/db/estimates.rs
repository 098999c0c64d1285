use crate::db::SqlitePool;
use crate::db::models::{Feedback, RepairEstimate};
use crate::error::TruckestError;
use chrono::Utc;
use uuid::Uuid;

/// A feedback row to insert; `kind` is free-form, expert corrections use
/// `expert_correction`.
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub job_id: String,
    pub user_id: String,
    pub kind: String,
    pub message: Option<String>,
    pub actual_hours: Option<f64>,
    pub rating: Option<f64>,
}

#[derive(Clone)]
pub struct EstimateStore {
    pool: SqlitePool,
}

impl EstimateStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn job_exists(&self, job_id: &str) -> Result<bool, TruckestError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT id FROM job_reports WHERE id = ?")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    pub async fn insert(
        &self,
        job_id: &str,
        hours: f64,
        cost: f64,
    ) -> Result<RepairEstimate, TruckestError> {
        if !self.job_exists(job_id).await? {
            return Err(TruckestError::NotFound("Job"));
        }
        let estimate = RepairEstimate {
            id: Uuid::new_v4().to_string(),
            job_id: job_id.to_string(),
            hours,
            cost,
            created_at: Utc::now(),
        };
        sqlx::query(
            r#"INSERT INTO repair_estimates (id, job_id, hours, cost, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(&estimate.id)
        .bind(&estimate.job_id)
        .bind(estimate.hours)
        .bind(estimate.cost)
        .bind(estimate.created_at)
        .execute(&self.pool)
        .await?;
        Ok(estimate)
    }

    pub async fn for_job(&self, job_id: &str) -> Result<Vec<RepairEstimate>, TruckestError> {
        let estimates = sqlx::query_as::<_, RepairEstimate>(
            r#"SELECT id, job_id, hours, cost, created_at
               FROM repair_estimates WHERE job_id = ? ORDER BY created_at DESC"#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(estimates)
    }

    /// Overwrite the job's estimate with expert-corrected hours, creating the
    /// row when no estimate exists yet. The corrected figure carries no cost.
    pub async fn correct_for_job(
        &self,
        job_id: &str,
        hours: f64,
    ) -> Result<RepairEstimate, TruckestError> {
        let existing = sqlx::query_as::<_, RepairEstimate>(
            r#"SELECT id, job_id, hours, cost, created_at
               FROM repair_estimates WHERE job_id = ? ORDER BY created_at ASC LIMIT 1"#,
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?;
        match existing {
            Some(mut estimate) => {
                sqlx::query("UPDATE repair_estimates SET hours = ?, cost = 0 WHERE id = ?")
                    .bind(hours)
                    .bind(&estimate.id)
                    .execute(&self.pool)
                    .await?;
                estimate.hours = hours;
                estimate.cost = 0.0;
                Ok(estimate)
            }
            None => self.insert(job_id, hours, 0.0).await,
        }
    }

    pub async fn insert_feedback(&self, new: NewFeedback) -> Result<Feedback, TruckestError> {
        if !self.job_exists(&new.job_id).await? {
            return Err(TruckestError::NotFound("Job"));
        }
        let feedback = Feedback {
            id: Uuid::new_v4().to_string(),
            job_id: new.job_id,
            user_id: new.user_id,
            kind: new.kind,
            message: new.message,
            actual_hours: new.actual_hours,
            rating: new.rating,
            created_at: Utc::now(),
        };
        sqlx::query(
            r#"INSERT INTO feedback (id, job_id, user_id, kind, message, actual_hours, rating, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&feedback.id)
        .bind(&feedback.job_id)
        .bind(&feedback.user_id)
        .bind(&feedback.kind)
        .bind(&feedback.message)
        .bind(feedback.actual_hours)
        .bind(feedback.rating)
        .bind(feedback.created_at)
        .execute(&self.pool)
        .await?;
        Ok(feedback)
    }

    /// Expert corrections with recorded hours, newest first.
    pub async fn expert_corrections(&self, job_id: &str) -> Result<Vec<Feedback>, TruckestError> {
        let corrections = sqlx::query_as::<_, Feedback>(
            r#"SELECT id, job_id, user_id, kind, message, actual_hours, rating, created_at
               FROM feedback
               WHERE job_id = ? AND kind = 'expert_correction' AND actual_hours IS NOT NULL
               ORDER BY created_at DESC"#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(corrections)
    }
}
