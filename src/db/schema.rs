//! SQL DDL for initializing the inspection database.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema. Ids are UUIDv4 text; timestamps are RFC3339 text.
/// `uploaded_by`/`user_id` carry the bare `x-user-id` header identity and are
/// deliberately not constrained to `users`.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'inspector',
    experience_level TEXT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS password_reset_tokens (
    token TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES users(id),
    expires_at TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS vehicles (
    vin TEXT PRIMARY KEY,
    vehicle_type TEXT NULL,
    make TEXT NULL,
    model TEXT NULL,
    year INTEGER NULL,
    body_class TEXT NULL,
    drive_type TEXT NULL,
    engine_model TEXT NULL,
    engine_cylinders INTEGER NULL,
    displacement_l REAL NULL,
    fuel_type TEXT NULL,
    brake_system TEXT NULL,
    manufacturer TEXT NULL,
    plant TEXT NULL,
    series TEXT NULL,
    trim TEXT NULL,
    weight_class TEXT NULL,
    gvwr TEXT NULL,
    doors INTEGER NULL,
    cab_type TEXT NULL,
    owner TEXT NULL,
    notes TEXT NULL,
    reference_image_path TEXT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS job_reports (
    id TEXT PRIMARY KEY,
    vin TEXT NOT NULL REFERENCES vehicles(vin),
    uploaded_by TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'PENDING',
    expert_hours REAL NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_job_reports_vin ON job_reports(vin);

CREATE TABLE IF NOT EXISTS truck_sections (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS vehicle_parts (
    id TEXT PRIMARY KEY,
    section_id TEXT NOT NULL REFERENCES truck_sections(id),
    name TEXT NOT NULL,
    UNIQUE(section_id, name)
);

CREATE TABLE IF NOT EXISTS damage_types (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS severity_levels (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    rank INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS images (
    id TEXT PRIMARY KEY,
    job_id TEXT NOT NULL REFERENCES job_reports(id),
    image_path TEXT NOT NULL,
    section_id TEXT NOT NULL REFERENCES truck_sections(id),
    severity_id TEXT NULL REFERENCES severity_levels(id),
    notes TEXT NULL,
    uploaded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_images_job_id ON images(job_id);

CREATE TABLE IF NOT EXISTS image_vehicle_parts (
    image_id TEXT NOT NULL REFERENCES images(id),
    part_id TEXT NOT NULL REFERENCES vehicle_parts(id),
    PRIMARY KEY (image_id, part_id)
);

CREATE TABLE IF NOT EXISTS image_damage_types (
    image_id TEXT NOT NULL REFERENCES images(id),
    damage_type_id TEXT NOT NULL REFERENCES damage_types(id),
    PRIMARY KEY (image_id, damage_type_id)
);

CREATE TABLE IF NOT EXISTS repair_estimates (
    id TEXT PRIMARY KEY,
    job_id TEXT NOT NULL REFERENCES job_reports(id),
    hours REAL NOT NULL,
    cost REAL NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_repair_estimates_job_id ON repair_estimates(job_id);

CREATE TABLE IF NOT EXISTS feedback (
    id TEXT PRIMARY KEY,
    job_id TEXT NOT NULL REFERENCES job_reports(id),
    user_id TEXT NOT NULL,
    kind TEXT NOT NULL,
    message TEXT NULL,
    actual_hours REAL NULL,
    rating REAL NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_feedback_job_id ON feedback(job_id);

CREATE TABLE IF NOT EXISTS vehicle_reference_images (
    id TEXT PRIMARY KEY,
    vin TEXT NOT NULL,
    image_path TEXT NOT NULL,
    angle TEXT NULL,
    uploaded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_vehicle_reference_images_vin ON vehicle_reference_images(vin)
"#;
