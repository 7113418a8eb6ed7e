#[cfg(test)]
#[path = "coordinate_test.rs"]
mod tests;

use std::fmt;

use serde_derive::Deserialize;
use serde_derive::Serialize;

/// Parses user entered numeric input. Non-finite values are rejected so
/// `NaN` and `inf` never make it into a request body.
pub fn parse_number(text: &str) -> Option<f64> {
    let val = text.trim().parse::<f64>().ok()?;
    if !val.is_finite() {
        return None;
    }

    return Some(val);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Coordinate {
        return Coordinate {
            latitude,
            longitude,
        };
    }

    pub fn parse(latitude: &str, longitude: &str) -> Option<Coordinate> {
        return Some(Coordinate::new(
            parse_number(latitude)?,
            parse_number(longitude)?,
        ));
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "{}, {}", self.latitude, self.longitude);
    }
}
