use thiserror::Error;

/// Errors returned by the Nominatim geocoding client.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("geocoding API returned HTTP {status}")]
    UnexpectedStatus { status: u16 },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid coordinate {field}={value:?}")]
    InvalidCoordinate { field: &'static str, value: String },

    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}
