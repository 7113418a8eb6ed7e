use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Coordinate;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: String,
    pub distance_km: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SafetyScore {
    pub safety_level: String,
    #[serde(default)]
    pub location_name: String,
    pub safety_score: f64,
    pub crime_risk: f64,
    pub time_risk_factor: f64,
    #[serde(default)]
    pub nearby_incidents: Vec<Incident>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteSafety {
    pub overall_route_safety: String,
    pub distance_km: f64,
    pub average_safety_score: f64,
    pub minimum_safety_score: f64,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// A heatmap rendered by the backend. The file lives on the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SafetyMap {
    pub map_file: String,
    pub center: Coordinate,
    pub radius_km: f64,
}
