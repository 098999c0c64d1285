use crate::error::TruckestError;
use crate::types::registry::DecodeVinResponse;
use backon::{ExponentialBuilder, Retryable};
use tracing::error;
use url::Url;

/// Stateless NHTSA vPIC calls.
pub struct RegistryApi;

impl RegistryApi {
    /// Decode a VIN, retrying transient registry failures.
    pub async fn try_decode_vin(
        client: reqwest::Client,
        base_url: &Url,
        vin: &str,
        retry_policy: ExponentialBuilder,
    ) -> Result<DecodeVinResponse, TruckestError> {
        let mut url = base_url.join(&format!("vehicles/DecodeVin/{vin}"))?;
        url.set_query(Some("format=json"));

        let resp = (|| async {
            let resp = client.get(url.clone()).send().await?;
            if resp.status().is_server_error() {
                let status = resp.status();
                let err = resp.error_for_status().unwrap_err();
                error!("vehicle registry server error (will retry): {}", status);
                return Err(err);
            }
            Ok(resp)
        })
        .retry(retry_policy)
        .await?;

        if !resp.status().is_success() {
            return Err(TruckestError::RegistryStatus(resp.status()));
        }
        Ok(resp.json::<DecodeVinResponse>().await?)
    }
}
