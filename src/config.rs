use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::LazyLock;
use url::Url;

/// Runtime configuration, loaded once from defaults overlaid with
/// `TRUCKEST_`-prefixed environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    /// Directory uploaded images are written to; served under `/uploads`.
    pub upload_dir: PathBuf,
    /// Base URL of the NHTSA vPIC registry. Must end with a slash.
    pub registry_base_url: Url,
    pub proxy: Option<Url>,
    /// Outbound VIN lookups allowed per minute.
    pub vin_lookups_per_minute: u32,
    /// Labor rate used to turn estimated hours into a cost figure.
    pub labor_rate_per_hour: f64,
    pub reset_token_ttl_minutes: i64,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:truckest.sqlite".to_string(),
            listen_addr: "0.0.0.0:4000".to_string(),
            loglevel: "info".to_string(),
            upload_dir: PathBuf::from("public/uploads"),
            registry_base_url: Url::parse("https://vpic.nhtsa.dot.gov/api/")
                .expect("default registry URL is valid"),
            proxy: None,
            vin_lookups_per_minute: 10,
            labor_rate_per_hour: 75.0,
            reset_token_ttl_minutes: 60,
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Env::prefixed("TRUCKEST_"))
        .extract()
        .expect("FATAL: invalid configuration")
});
