pub mod client;
pub mod error;
mod queries;
pub mod types;

pub use client::SanityClient;
pub use error::{RecordError, SanityError};
pub use types::{collect_assets, AssetRecord, UnlocatedAsset};
