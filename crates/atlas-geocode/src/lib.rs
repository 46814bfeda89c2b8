pub mod cache;
pub mod client;
pub mod error;
pub mod types;

pub use cache::{CachedGeocoder, GeocodeCache};
pub use client::NominatimClient;
pub use error::GeocodeError;
pub use types::GeocodingResult;
