//! Media asset types as exposed to site clients.
//!
//! Field names on the wire follow the content store's conventions
//! (`_id`, `_createdAt`, `mimeType`, ...) so front-end code can consume the
//! JSON unchanged. Coordinates are flattened into `lat`/`lng` and omitted
//! entirely when the asset has no location.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// The media types the site knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MimeType {
    #[serde(rename = "video/mp4")]
    VideoMp4,
    #[serde(rename = "image/jpeg")]
    ImageJpeg,
    #[serde(rename = "image/png")]
    ImagePng,
    #[serde(rename = "image/gif")]
    ImageGif,
}

impl MimeType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MimeType::VideoMp4 => "video/mp4",
            MimeType::ImageJpeg => "image/jpeg",
            MimeType::ImagePng => "image/png",
            MimeType::ImageGif => "image/gif",
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported mime type: {0}")]
pub struct UnknownMimeType(pub String);

impl FromStr for MimeType {
    type Err = UnknownMimeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video/mp4" => Ok(MimeType::VideoMp4),
            "image/jpeg" => Ok(MimeType::ImageJpeg),
            "image/png" => Ok(MimeType::ImagePng),
            "image/gif" => Ok(MimeType::ImageGif),
            other => Err(UnknownMimeType(other.to_owned())),
        }
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Exactly one of latitude/longitude was present.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("partial location: lat={lat:?}, lng={lng:?}")]
pub struct PartialLocation {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Combines two optional coordinates into an optional point.
    ///
    /// # Errors
    ///
    /// Returns [`PartialLocation`] when only one of the two is present.
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Result<Option<Self>, PartialLocation> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Ok(Some(Self { lat, lng })),
            (None, None) => Ok(None),
            (lat, lng) => Err(PartialLocation { lat, lng }),
        }
    }
}

/// A media record held in the content store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Asset {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "_updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "mimeType")]
    pub mime_type: MimeType,
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub location: Option<GeoPoint>,
    pub size: u64,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_asset(location: Option<GeoPoint>) -> Asset {
        let ts = DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc);
        Asset {
            id: "image-abc123-800x600-jpg".to_string(),
            created_at: ts,
            updated_at: ts,
            mime_type: MimeType::ImageJpeg,
            tags: vec!["Kyoto, Japan".to_string()],
            location,
            size: 48_213,
            url: "https://cdn.sanity.io/images/p/d/abc123-800x600.jpg".to_string(),
        }
    }

    #[test]
    fn mime_type_parses_known_values() {
        assert_eq!("video/mp4".parse::<MimeType>(), Ok(MimeType::VideoMp4));
        assert_eq!("image/gif".parse::<MimeType>(), Ok(MimeType::ImageGif));
        assert_eq!(MimeType::ImagePng.to_string(), "image/png");
    }

    #[test]
    fn mime_type_rejects_unknown_value() {
        let err = "image/webp".parse::<MimeType>().unwrap_err();
        assert_eq!(err, UnknownMimeType("image/webp".to_string()));
    }

    #[test]
    fn geo_point_requires_both_coordinates() {
        assert_eq!(
            GeoPoint::from_parts(Some(1.0), Some(2.0)),
            Ok(Some(GeoPoint::new(1.0, 2.0)))
        );
        assert_eq!(GeoPoint::from_parts(None, None), Ok(None));
        assert!(GeoPoint::from_parts(Some(1.0), None).is_err());
        assert!(GeoPoint::from_parts(None, Some(2.0)).is_err());
    }

    #[test]
    fn asset_serializes_with_store_field_names() {
        let asset = sample_asset(Some(GeoPoint::new(35.0, 135.75)));
        let json = serde_json::to_value(&asset).expect("serialize");
        assert_eq!(json["_id"], "image-abc123-800x600-jpg");
        assert_eq!(json["mimeType"], "image/jpeg");
        assert_eq!(json["_createdAt"], "2024-05-01T10:00:00Z");
        assert_eq!(json["lat"], 35.0);
        assert_eq!(json["lng"], 135.75);
        assert_eq!(json["tags"][0], "Kyoto, Japan");
    }

    #[test]
    fn asset_without_location_omits_coordinates() {
        let json = serde_json::to_value(sample_asset(None)).expect("serialize");
        let obj = json.as_object().expect("object");
        assert!(!obj.contains_key("lat"));
        assert!(!obj.contains_key("lng"));
        assert!(json["tags"].is_array());
    }
}
