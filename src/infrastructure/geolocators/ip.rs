#[cfg(test)]
#[path = "ip_test.rs"]
mod tests;

use std::time::Duration;

use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Coordinate;
use crate::domain::models::Geolocator;
use crate::domain::models::GeolocatorName;
use crate::domain::models::LocationError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct LookupResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

/// Approximates the position from the public IP address using an
/// ip-api.com compatible lookup service.
pub struct IpGeolocator {
    url: String,
    timeout: String,
}

impl Default for IpGeolocator {
    fn default() -> IpGeolocator {
        return IpGeolocator {
            url: Config::get(ConfigKey::GeolocatorURL),
            timeout: Config::get(ConfigKey::HealthCheckTimeout),
        };
    }
}

impl IpGeolocator {
    async fn lookup(&self) -> anyhow::Result<LookupResponse> {
        let timeout = self.timeout.parse::<u64>().unwrap_or(1000);
        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(timeout))
            .send()
            .await?
            .error_for_status()?
            .json::<LookupResponse>()
            .await?;

        return Ok(res);
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    fn name(&self) -> GeolocatorName {
        return GeolocatorName::Ip;
    }

    #[allow(clippy::implicit_return)]
    async fn locate(&self) -> Result<Coordinate, LocationError> {
        let res = self.lookup().await.map_err(|err| {
            tracing::error!(error = ?err, url = self.url, "IP lookup failed");
            return LocationError::Unavailable("Position lookup failed".to_string());
        })?;

        if res.status != "success" {
            return Err(LocationError::Unavailable(
                res.message
                    .unwrap_or_else(|| return "Position lookup failed".to_string()),
            ));
        }

        match (res.lat, res.lon) {
            (Some(lat), Some(lon)) => return Ok(Coordinate::new(lat, lon)),
            _ => {
                return Err(LocationError::Unavailable(
                    "Position lookup returned no coordinates".to_string(),
                ))
            }
        }
    }
}
