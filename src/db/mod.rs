//! Database module: models, schema and per-concern stores over a shared
//! SQLite pool.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and conversions
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - one store per concern (`users`, `vehicles`, `jobs`, `images`,
//!   `taxonomy`, `estimates`), all cloning the same pool

pub mod estimates;
pub mod images;
pub mod jobs;
pub mod models;
pub mod schema;
pub mod taxonomy;
pub mod users;
pub mod vehicles;

use crate::error::TruckestError;
use crate::types::job::JobDetail;
use models::JobReport;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub use schema::SQLITE_INIT;

pub type SqlitePool = sqlx::Pool<sqlx::Sqlite>;

/// All stores bundled for handler access.
#[derive(Clone)]
pub struct Database {
    pub users: users::UserStore,
    pub vehicles: vehicles::VehicleStore,
    pub jobs: jobs::JobStore,
    pub images: images::ImageStore,
    pub taxonomy: taxonomy::TaxonomyStore,
    pub estimates: estimates::EstimateStore,
}

impl Database {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: users::UserStore::new(pool.clone()),
            vehicles: vehicles::VehicleStore::new(pool.clone()),
            jobs: jobs::JobStore::new(pool.clone()),
            images: images::ImageStore::new(pool.clone()),
            taxonomy: taxonomy::TaxonomyStore::new(pool.clone()),
            estimates: estimates::EstimateStore::new(pool),
        }
    }

    /// Resolve everything the inspection UI shows for one job.
    pub async fn job_detail(&self, job: JobReport) -> Result<JobDetail, TruckestError> {
        let vehicle = self.vehicles.get(&job.vin).await?;
        let images = self.images.labeled_for_job(&job.id).await?;
        let estimates = self.estimates.for_job(&job.id).await?;
        let corrections = self.estimates.expert_corrections(&job.id).await?;
        Ok(JobDetail {
            job,
            vehicle,
            images,
            estimates,
            corrections,
        })
    }

    pub async fn job_details(&self) -> Result<Vec<JobDetail>, TruckestError> {
        let jobs = self.jobs.list().await?;
        let mut details = Vec::with_capacity(jobs.len());
        for job in jobs {
            details.push(self.job_detail(job).await?);
        }
        Ok(details)
    }
}

/// Connect, initialize the schema and seed the label taxonomy.
pub async fn spawn(database_url: &str) -> Result<Database, TruckestError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;

    let db = Database::new(pool);
    db.taxonomy.seed().await?;
    Ok(db)
}

/// Initialize the schema by executing the bundled DDL.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), TruckestError> {
    // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
