use crate::api::nhtsa::RegistryApi;
use crate::config::Config;
use crate::error::TruckestError;
use crate::types::registry::VehicleProfile;
use backon::ExponentialBuilder;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

fn default_retry_policy() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_secs(1))
        .with_max_delay(Duration::from_secs(3))
        .with_max_times(3)
        .with_jitter()
}

/// Outbound VIN lookups against the public registry: one preconfigured HTTP
/// client, a process-wide rate limiter (the vPIC service is a shared public
/// resource) and retry-on-5xx semantics.
#[derive(Clone)]
pub struct VinRegistry {
    client: reqwest::Client,
    limiter: Arc<DefaultDirectRateLimiter>,
    base_url: Url,
}

impl VinRegistry {
    pub fn new(cfg: &Config) -> Self {
        let mut builder = reqwest::Client::builder()
            .user_agent("truckest/1.0".to_string())
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15));
        if let Some(proxy_url) = cfg.proxy.clone() {
            let proxy = reqwest::Proxy::all(proxy_url.as_str())
                .expect("invalid PROXY url for reqwest client");
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .expect("FATAL: initialize VinRegistry HTTP client failed");

        let per_minute = cfg.vin_lookups_per_minute.max(1);
        let limiter = Arc::new(RateLimiter::direct(Quota::per_minute(
            std::num::NonZeroU32::new(per_minute).unwrap(),
        )));

        Self {
            client,
            limiter,
            base_url: cfg.registry_base_url.clone(),
        }
    }

    /// Decode a VIN into a typed vehicle profile.
    pub async fn decode(&self, vin: &str) -> Result<VehicleProfile, TruckestError> {
        self.limiter.until_ready().await;
        let payload = RegistryApi::try_decode_vin(
            self.client.clone(),
            &self.base_url,
            vin,
            default_retry_policy(),
        )
        .await?;
        VehicleProfile::from_results(vin, &payload.results)
    }
}
