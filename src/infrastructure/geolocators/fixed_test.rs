use super::FixedGeolocator;
use crate::domain::models::Coordinate;
use crate::domain::models::Geolocator;
use crate::domain::models::GeolocatorName;
use crate::domain::models::LocationError;

fn geolocator(latitude: &str, longitude: &str) -> FixedGeolocator {
    return FixedGeolocator {
        latitude: latitude.to_string(),
        longitude: longitude.to_string(),
    };
}

#[tokio::test]
async fn it_returns_the_configured_position() {
    let res = geolocator("28.6139", " 77.209 ").locate().await;
    assert_eq!(res, Ok(Coordinate::new(28.6139, 77.209)));
}

#[tokio::test]
async fn it_fails_without_a_configured_position() {
    let res = geolocator("", "77.209").locate().await;
    assert!(matches!(res, Err(LocationError::Unavailable(_))));
}

#[tokio::test]
async fn it_fails_on_invalid_positions() {
    let res = geolocator("north", "77.209").locate().await;
    assert_eq!(
        res,
        Err(LocationError::Unavailable(
            "Configured position 'north, 77.209' is not a valid coordinate".to_string()
        ))
    );
}

#[test]
fn it_is_named_fixed() {
    assert_eq!(geolocator("", "").name(), GeolocatorName::Fixed);
}
