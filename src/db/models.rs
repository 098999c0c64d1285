use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub experience_level: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User shape returned by the API; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetToken {
    pub token: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub vin: String,
    pub vehicle_type: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i64>,
    pub body_class: Option<String>,
    pub drive_type: Option<String>,
    pub engine_model: Option<String>,
    pub engine_cylinders: Option<i64>,
    pub displacement_l: Option<f64>,
    pub fuel_type: Option<String>,
    pub brake_system: Option<String>,
    pub manufacturer: Option<String>,
    pub plant: Option<String>,
    pub series: Option<String>,
    pub trim: Option<String>,
    pub weight_class: Option<String>,
    pub gvwr: Option<String>,
    pub doors: Option<i64>,
    pub cab_type: Option<String>,
    pub owner: Option<String>,
    pub notes: Option<String>,
    pub reference_image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobReport {
    pub id: String,
    pub vin: String,
    pub uploaded_by: String,
    pub status: String,
    pub expert_hours: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ImageRow {
    pub id: String,
    pub job_id: String,
    pub image_path: String,
    pub section_id: String,
    pub severity_id: Option<String>,
    pub notes: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TruckSection {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VehiclePart {
    pub id: String,
    pub section_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DamageType {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SeverityLevel {
    pub id: String,
    pub name: String,
    pub rank: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RepairEstimate {
    pub id: String,
    pub job_id: String,
    pub hours: f64,
    pub cost: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Feedback {
    pub id: String,
    pub job_id: String,
    pub user_id: String,
    pub kind: String,
    pub message: Option<String>,
    pub actual_hours: Option<f64>,
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VehicleReferenceImage {
    pub id: String,
    pub vin: String,
    pub image_path: String,
    pub angle: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}
