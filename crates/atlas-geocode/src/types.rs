use atlas_core::GeoPoint;
use serde::Deserialize;

use crate::error::GeocodeError;

/// One place from a Nominatim `/search` response. Coordinates arrive as
/// decimal strings.
#[derive(Debug, Deserialize)]
pub(crate) struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}

/// A resolved location.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodingResult {
    pub lat: f64,
    pub lng: f64,
    pub display_name: String,
}

impl GeocodingResult {
    #[must_use]
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

impl TryFrom<NominatimPlace> for GeocodingResult {
    type Error = GeocodeError;

    fn try_from(place: NominatimPlace) -> Result<Self, Self::Error> {
        Ok(Self {
            lat: parse_coordinate("lat", &place.lat, 90.0)?,
            lng: parse_coordinate("lon", &place.lon, 180.0)?,
            display_name: place.display_name,
        })
    }
}

fn parse_coordinate(field: &'static str, raw: &str, bound: f64) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= bound)
        .ok_or_else(|| GeocodeError::InvalidCoordinate {
            field,
            value: raw.to_owned(),
        })
}
