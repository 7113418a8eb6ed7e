pub mod fixed;
pub mod ip;
pub mod none;

use anyhow::Result;

use crate::domain::models::GeolocatorBox;
use crate::domain::models::GeolocatorName;

pub struct GeolocatorManager {}

impl GeolocatorManager {
    pub fn get(name: GeolocatorName) -> Result<GeolocatorBox> {
        match name {
            GeolocatorName::Fixed => return Ok(Box::<fixed::FixedGeolocator>::default()),
            GeolocatorName::Ip => return Ok(Box::<ip::IpGeolocator>::default()),
            GeolocatorName::None => return Ok(Box::<none::NoopGeolocator>::default()),
        }
    }
}
