use atlas_core::{PartialLocation, UnknownMimeType};
use thiserror::Error;

/// Errors returned by the Sanity content store client.
#[derive(Debug, Error)]
pub enum SanityError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-2xx status.
    #[error("Sanity API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured project, dataset, or base URL does not form a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Reasons a store record cannot be turned into an [`atlas_core::Asset`].
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("invalid timestamp in `{field}`: {value}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error(transparent)]
    MimeType(#[from] UnknownMimeType),

    #[error(transparent)]
    Location(#[from] PartialLocation),
}
