use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::Coordinate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum GeolocatorName {
    Fixed,
    Ip,
    None,
}

impl GeolocatorName {
    pub fn parse(text: &str) -> Option<GeolocatorName> {
        return GeolocatorName::iter().find(|e| return e.to_string() == text);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Geolocation is not supported")]
    Unsupported,
    #[error("{0}")]
    Unavailable(String),
}

#[async_trait]
pub trait Geolocator {
    /// Returns the name of the geolocator.
    fn name(&self) -> GeolocatorName;

    /// Acquires a fresh position fix. Callers decide whether a cached
    /// coordinate is good enough; implementations never cache.
    async fn locate(&self) -> Result<Coordinate, LocationError>;
}

pub type GeolocatorBox = Box<dyn Geolocator + Send + Sync>;
