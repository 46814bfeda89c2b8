//! Wire shapes returned by the store and their conversion into domain types.
//!
//! Tag lists come from dereferencing `opt.media.tags[]`, so the store may
//! return `null` for an asset without tags and `null` entries for dangling
//! tag references. Both collapse to an ordinary `Vec<String>` here.

use atlas_core::{Asset, GeoPoint};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::RecordError;

/// Envelope around every query result.
#[derive(Debug, Deserialize)]
pub(crate) struct QueryResponse<T> {
    pub result: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagRecord {
    pub name: Option<String>,
}

/// Acknowledgement of a mutation request.
#[derive(Debug, Deserialize)]
pub(crate) struct MutateResponse {
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
}

/// An asset row as projected by the query layer, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetRecord {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    #[serde(rename = "_createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "_updatedAt")]
    pub updated_at: Option<String>,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub size: Option<u64>,
    pub url: Option<String>,
}

impl TryFrom<AssetRecord> for Asset {
    type Error = RecordError;

    fn try_from(record: AssetRecord) -> Result<Self, Self::Error> {
        let id = record.id.ok_or(RecordError::MissingField("_id"))?;
        let created_at = parse_timestamp("_createdAt", record.created_at)?;
        let updated_at = parse_timestamp("_updatedAt", record.updated_at)?;
        let mime_type = record
            .mime_type
            .ok_or(RecordError::MissingField("mimeType"))?
            .parse()?;
        let location = GeoPoint::from_parts(record.lat, record.lng)?;
        let size = record.size.ok_or(RecordError::MissingField("size"))?;
        let url = record.url.ok_or(RecordError::MissingField("url"))?;

        Ok(Asset {
            id,
            created_at,
            updated_at,
            mime_type,
            tags: record.tags,
            location,
            size,
            url,
        })
    }
}

fn parse_timestamp(
    field: &'static str,
    value: Option<String>,
) -> Result<DateTime<Utc>, RecordError> {
    let raw = value.ok_or(RecordError::MissingField(field))?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| RecordError::InvalidTimestamp { field, value: raw })
}

/// Converts store records into assets, dropping and logging any that fail
/// validation. Order is preserved.
#[must_use]
pub fn collect_assets(records: Vec<AssetRecord>) -> Vec<Asset> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.id.clone();
            match Asset::try_from(record) {
                Ok(asset) => Some(asset),
                Err(e) => {
                    tracing::warn!(
                        asset_id = id.as_deref().unwrap_or("<missing>"),
                        error = %e,
                        "dropping malformed asset record"
                    );
                    None
                }
            }
        })
        .collect()
}

/// An asset lacking coordinates, as listed for the location backfill.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnlocatedAsset {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "originalFilename", default)]
    pub original_filename: Option<String>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(rename = "hasLocation", default)]
    pub has_location: bool,
}

impl UnlocatedAsset {
    /// Original filename when known, otherwise the asset id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.original_filename.as_deref().unwrap_or(&self.id)
    }
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default().into_iter().flatten().collect())
}
