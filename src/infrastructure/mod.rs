pub mod api;
pub mod geolocators;
