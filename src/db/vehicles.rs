use crate::db::SqlitePool;
use crate::db::models::{Vehicle, VehicleReferenceImage};
use crate::error::TruckestError;
use crate::types::registry::VehicleProfile;
use chrono::Utc;
use uuid::Uuid;

/// Fields accepted by the manual vehicle upsert endpoint.
#[derive(Debug, Clone, Default)]
pub struct ManualVehicle {
    pub vin: String,
    pub vehicle_type: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i64>,
    pub weight_class: Option<String>,
    pub owner: Option<String>,
    pub notes: Option<String>,
    pub reference_image_path: Option<String>,
}

#[derive(Clone)]
pub struct VehicleStore {
    pool: SqlitePool,
}

impl VehicleStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, vin: &str) -> Result<Option<Vehicle>, TruckestError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE vin = ?")
            .bind(vin)
            .fetch_optional(&self.pool)
            .await?;
        Ok(vehicle)
    }

    /// Upsert a registry-decoded profile by VIN.
    /// Uses SQLite `INSERT ... ON CONFLICT(vin) DO UPDATE`, refreshing every
    /// decoded attribute while leaving owner/notes/reference image intact.
    pub async fn upsert_profile(
        &self,
        profile: &VehicleProfile,
        notes: Option<&str>,
    ) -> Result<Vehicle, TruckestError> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO vehicles (
                vin, vehicle_type, make, model, year, body_class, drive_type,
                engine_model, engine_cylinders, displacement_l, fuel_type,
                brake_system, manufacturer, plant, series, trim, weight_class,
                gvwr, doors, cab_type, notes, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(vin) DO UPDATE SET
                vehicle_type=excluded.vehicle_type,
                make=excluded.make,
                model=excluded.model,
                year=excluded.year,
                body_class=excluded.body_class,
                drive_type=excluded.drive_type,
                engine_model=excluded.engine_model,
                engine_cylinders=excluded.engine_cylinders,
                displacement_l=excluded.displacement_l,
                fuel_type=excluded.fuel_type,
                brake_system=excluded.brake_system,
                manufacturer=excluded.manufacturer,
                plant=excluded.plant,
                series=excluded.series,
                trim=excluded.trim,
                weight_class=excluded.weight_class,
                gvwr=excluded.gvwr,
                doors=excluded.doors,
                cab_type=excluded.cab_type,
                updated_at=excluded.updated_at
            "#,
        )
        .bind(&profile.vin)
        .bind(&profile.vehicle_type)
        .bind(&profile.make)
        .bind(&profile.model)
        .bind(profile.year)
        .bind(&profile.body_class)
        .bind(&profile.drive_type)
        .bind(&profile.engine_model)
        .bind(profile.engine_cylinders)
        .bind(profile.displacement_l)
        .bind(&profile.fuel_type)
        .bind(&profile.brake_system)
        .bind(&profile.manufacturer)
        .bind(&profile.plant)
        .bind(&profile.series)
        .bind(&profile.trim)
        .bind(&profile.weight_class)
        .bind(&profile.gvwr)
        .bind(profile.doors)
        .bind(&profile.cab_type)
        .bind(notes)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.get(&profile.vin)
            .await?
            .ok_or(TruckestError::NotFound("Vehicle"))
    }

    /// Manual upsert: creates the record when absent, otherwise returns the
    /// existing row unchanged.
    pub async fn upsert_manual(&self, input: &ManualVehicle) -> Result<Vehicle, TruckestError> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO vehicles (
                vin, vehicle_type, make, model, year, weight_class, owner,
                notes, reference_image_path, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(vin) DO NOTHING
            "#,
        )
        .bind(&input.vin)
        .bind(&input.vehicle_type)
        .bind(&input.make)
        .bind(&input.model)
        .bind(input.year)
        .bind(&input.weight_class)
        .bind(&input.owner)
        .bind(&input.notes)
        .bind(&input.reference_image_path)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.get(&input.vin)
            .await?
            .ok_or(TruckestError::NotFound("Vehicle"))
    }

    pub async fn add_reference_image(
        &self,
        vin: &str,
        image_path: &str,
        angle: Option<&str>,
    ) -> Result<VehicleReferenceImage, TruckestError> {
        let image = VehicleReferenceImage {
            id: Uuid::new_v4().to_string(),
            vin: vin.to_string(),
            image_path: image_path.to_string(),
            angle: angle.map(String::from),
            uploaded_at: Utc::now(),
        };
        sqlx::query(
            r#"INSERT INTO vehicle_reference_images (id, vin, image_path, angle, uploaded_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(&image.id)
        .bind(&image.vin)
        .bind(&image.image_path)
        .bind(&image.angle)
        .bind(image.uploaded_at)
        .execute(&self.pool)
        .await?;
        Ok(image)
    }

    pub async fn reference_images(
        &self,
        vin: &str,
    ) -> Result<Vec<VehicleReferenceImage>, TruckestError> {
        let images = sqlx::query_as::<_, VehicleReferenceImage>(
            r#"SELECT id, vin, image_path, angle, uploaded_at
               FROM vehicle_reference_images WHERE vin = ? ORDER BY uploaded_at ASC"#,
        )
        .bind(vin)
        .fetch_all(&self.pool)
        .await?;
        Ok(images)
    }

    /// Delete a reference image, returning the removed row so the caller can
    /// clean up the file on disk.
    pub async fn delete_reference_image(
        &self,
        id: &str,
    ) -> Result<Option<VehicleReferenceImage>, TruckestError> {
        let image = sqlx::query_as::<_, VehicleReferenceImage>(
            r#"SELECT id, vin, image_path, angle, uploaded_at
               FROM vehicle_reference_images WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(image) = image else {
            return Ok(None);
        };
        sqlx::query("DELETE FROM vehicle_reference_images WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(Some(image))
    }
}
