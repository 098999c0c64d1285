pub mod auth;
pub mod estimates;
pub mod export;
pub mod jobs;
pub mod taxonomy;
pub mod uploads;
pub mod vehicles;
