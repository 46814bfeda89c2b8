mod app_config;
mod asset;
mod config;
mod pagination;
mod tags;

use thiserror::Error;

pub use app_config::AppConfig;
pub use asset::{Asset, GeoPoint, MimeType, PartialLocation, UnknownMimeType};
pub use config::{load_app_config, load_app_config_from_env};
pub use pagination::{PageWindow, DEFAULT_PAGE_SIZE};
pub use tags::{
    find_location_tag, split_location_tag, summarize_tags, CountryRegions, TagSummary,
    SENTINEL_TAG,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
