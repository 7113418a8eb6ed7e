#[cfg(test)]
#[path = "fixed_test.rs"]
mod tests;

use async_trait::async_trait;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Coordinate;
use crate::domain::models::Geolocator;
use crate::domain::models::GeolocatorName;
use crate::domain::models::LocationError;

/// Reports the position set through the `latitude` and `longitude` config
/// keys.
pub struct FixedGeolocator {
    latitude: String,
    longitude: String,
}

impl Default for FixedGeolocator {
    fn default() -> FixedGeolocator {
        return FixedGeolocator {
            latitude: Config::get(ConfigKey::Latitude),
            longitude: Config::get(ConfigKey::Longitude),
        };
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    fn name(&self) -> GeolocatorName {
        return GeolocatorName::Fixed;
    }

    #[allow(clippy::implicit_return)]
    async fn locate(&self) -> Result<Coordinate, LocationError> {
        if self.latitude.trim().is_empty() || self.longitude.trim().is_empty() {
            return Err(LocationError::Unavailable(
                "No fixed position configured. Set latitude and longitude in the config file"
                    .to_string(),
            ));
        }

        return Coordinate::parse(&self.latitude, &self.longitude).ok_or_else(|| {
            return LocationError::Unavailable(format!(
                "Configured position '{}, {}' is not a valid coordinate",
                self.latitude, self.longitude
            ));
        });
    }
}
