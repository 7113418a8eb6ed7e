#[cfg(test)]
#[path = "none_test.rs"]
mod tests;

use async_trait::async_trait;

use crate::domain::models::Coordinate;
use crate::domain::models::Geolocator;
use crate::domain::models::GeolocatorName;
use crate::domain::models::LocationError;

#[derive(Default)]
pub struct NoopGeolocator {}

#[async_trait]
impl Geolocator for NoopGeolocator {
    fn name(&self) -> GeolocatorName {
        return GeolocatorName::None;
    }

    #[allow(clippy::implicit_return)]
    async fn locate(&self) -> Result<Coordinate, LocationError> {
        return Err(LocationError::Unsupported);
    }
}
