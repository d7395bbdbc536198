use std::fmt;
use thiserror::Error;

const LAT_DEG_MAX: f64 = 90.0;
const LAT_DEG_MIN: f64 = -90.0;
const LNG_DEG_MAX: f64 = 180.0;
const LNG_DEG_MIN: f64 = -180.0;

/// A geographical position in degrees (WGS 84).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

impl MapPoint {
    pub const fn lat(self) -> f64 {
        self.lat
    }

    pub const fn lng(self) -> f64 {
        self.lng
    }

    pub const fn to_lat_lng_deg(self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    pub fn is_valid_lat(lat: f64) -> bool {
        lat.is_finite() && (LAT_DEG_MIN..=LAT_DEG_MAX).contains(&lat)
    }

    pub fn is_valid_lng(lng: f64) -> bool {
        lng.is_finite() && (LNG_DEG_MIN..=LNG_DEG_MAX).contains(&lng)
    }

    pub fn try_from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(
        lat: LAT,
        lng: LNG,
    ) -> Option<Self> {
        let (lat, lng) = (lat.into(), lng.into());
        (Self::is_valid_lat(lat) && Self::is_valid_lng(lng)).then_some(Self { lat, lng })
    }

    pub fn parse_lat_lng_deg(lat_deg_str: &str, lng_deg_str: &str) -> Result<Self, ParseError> {
        let lat = lat_deg_str
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseError::Latitude(lat_deg_str.to_owned()))?;
        let lng = lng_deg_str
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseError::Longitude(lng_deg_str.to_owned()))?;
        if !Self::is_valid_lat(lat) {
            return Err(ParseError::Latitude(lat_deg_str.to_owned()));
        }
        if !Self::is_valid_lng(lng) {
            return Err(ParseError::Longitude(lng_deg_str.to_owned()));
        }
        Ok(Self { lat, lng })
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid latitude degrees: {0}")]
    Latitude(String),
    #[error("Invalid longitude degrees: {0}")]
    Longitude(String),
}
