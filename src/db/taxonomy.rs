use crate::catalog;
use crate::db::SqlitePool;
use crate::db::models::{DamageType, SeverityLevel, TruckSection, VehiclePart};
use crate::error::TruckestError;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct SectionWithParts {
    #[serde(flatten)]
    pub section: TruckSection,
    pub parts: Vec<VehiclePart>,
}

#[derive(Clone)]
pub struct TaxonomyStore {
    pool: SqlitePool,
}

impl TaxonomyStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Seed the static label taxonomy. Insert-or-ignore keyed on the unique
    /// names, so re-running at every startup keeps ids stable.
    pub async fn seed(&self) -> Result<(), TruckestError> {
        let mut tx = self.pool.begin().await?;
        for (section_name, part_names) in catalog::TRUCK_SECTIONS {
            sqlx::query("INSERT OR IGNORE INTO truck_sections (id, name) VALUES (?, ?)")
                .bind(Uuid::new_v4().to_string())
                .bind(section_name)
                .execute(&mut *tx)
                .await?;
            let (section_id,): (String,) =
                sqlx::query_as("SELECT id FROM truck_sections WHERE name = ?")
                    .bind(section_name)
                    .fetch_one(&mut *tx)
                    .await?;
            for part_name in *part_names {
                sqlx::query(
                    "INSERT OR IGNORE INTO vehicle_parts (id, section_id, name) VALUES (?, ?, ?)",
                )
                .bind(Uuid::new_v4().to_string())
                .bind(&section_id)
                .bind(part_name)
                .execute(&mut *tx)
                .await?;
            }
        }
        for damage_name in catalog::DAMAGE_TYPES {
            sqlx::query("INSERT OR IGNORE INTO damage_types (id, name) VALUES (?, ?)")
                .bind(Uuid::new_v4().to_string())
                .bind(damage_name)
                .execute(&mut *tx)
                .await?;
        }
        for (rank, severity_name) in catalog::SEVERITY_LEVELS.iter().enumerate() {
            sqlx::query("INSERT OR IGNORE INTO severity_levels (id, name, rank) VALUES (?, ?, ?)")
                .bind(Uuid::new_v4().to_string())
                .bind(severity_name)
                .bind(rank as i64)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn sections_with_parts(&self) -> Result<Vec<SectionWithParts>, TruckestError> {
        let sections = sqlx::query_as::<_, TruckSection>(
            "SELECT id, name FROM truck_sections ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        let mut result = Vec::with_capacity(sections.len());
        for section in sections {
            let parts = sqlx::query_as::<_, VehiclePart>(
                "SELECT id, section_id, name FROM vehicle_parts WHERE section_id = ? ORDER BY name",
            )
            .bind(&section.id)
            .fetch_all(&self.pool)
            .await?;
            result.push(SectionWithParts { section, parts });
        }
        Ok(result)
    }

    pub async fn damage_types(&self) -> Result<Vec<DamageType>, TruckestError> {
        let types =
            sqlx::query_as::<_, DamageType>("SELECT id, name FROM damage_types ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(types)
    }

    pub async fn severity_levels(&self) -> Result<Vec<SeverityLevel>, TruckestError> {
        let levels = sqlx::query_as::<_, SeverityLevel>(
            "SELECT id, name, rank FROM severity_levels ORDER BY rank",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(levels)
    }
}
