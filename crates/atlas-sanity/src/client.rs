//! HTTP client for the Sanity content store.
//!
//! Reads go through the GROQ query endpoint (optionally via the CDN host);
//! writes go through the mutation endpoint on the live API host. Every
//! request carries the configured bearer token.

use std::time::Duration;

use atlas_core::{AppConfig, Asset, GeoPoint, PageWindow};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::SanityError;
use crate::queries;
use crate::types::{
    collect_assets, AssetRecord, MutateResponse, QueryResponse, TagRecord, UnlocatedAsset,
};

/// Client for one Sanity project and dataset.
///
/// Use [`SanityClient::new`] for production or [`SanityClient::with_base_url`]
/// to point both reads and writes at a mock server in tests.
pub struct SanityClient {
    client: Client,
    query_base: Url,
    mutate_base: Url,
    api_version: String,
    dataset: String,
    token: String,
}

impl SanityClient {
    /// Creates a client for `project_id`, reading from the CDN host when
    /// `use_cdn` is set.
    ///
    /// # Errors
    ///
    /// Returns [`SanityError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SanityError::InvalidUrl`] if the project
    /// id does not form a valid host name.
    pub fn new(
        project_id: &str,
        dataset: &str,
        api_version: &str,
        token: &str,
        use_cdn: bool,
        timeout_secs: u64,
    ) -> Result<Self, SanityError> {
        let api_host = format!("https://{project_id}.api.sanity.io/");
        let query_host = if use_cdn {
            format!("https://{project_id}.apicdn.sanity.io/")
        } else {
            api_host.clone()
        };

        Ok(Self {
            client: build_http_client(timeout_secs)?,
            query_base: parse_base(&query_host)?,
            mutate_base: parse_base(&api_host)?,
            api_version: normalize_api_version(api_version),
            dataset: dataset.to_owned(),
            token: token.to_owned(),
        })
    }

    /// Creates a client from application config. `use_cdn` overrides the
    /// configured CDN setting for callers that need fresh reads.
    ///
    /// # Errors
    ///
    /// See [`SanityClient::new`].
    pub fn from_app_config(config: &AppConfig, use_cdn: bool) -> Result<Self, SanityError> {
        Self::new(
            &config.sanity_project_id,
            &config.sanity_dataset,
            &config.sanity_api_version,
            &config.sanity_token,
            use_cdn,
            config.request_timeout_secs,
        )
    }

    /// Creates a client that sends both reads and writes to `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SanityError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SanityError::InvalidUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        dataset: &str,
        api_version: &str,
        token: &str,
        timeout_secs: u64,
    ) -> Result<Self, SanityError> {
        let base = parse_base(base_url)?;
        Ok(Self {
            client: build_http_client(timeout_secs)?,
            query_base: base.clone(),
            mutate_base: base,
            api_version: normalize_api_version(api_version),
            dataset: dataset.to_owned(),
            token: token.to_owned(),
        })
    }

    /// Lists every published tag label in alphabetical order.
    ///
    /// # Errors
    ///
    /// - [`SanityError::Http`] on network failure.
    /// - [`SanityError::Api`] on a non-2xx status.
    /// - [`SanityError::Deserialize`] if the body does not match the expected shape.
    pub async fn fetch_tags(&self) -> Result<Vec<String>, SanityError> {
        let records: Vec<TagRecord> = self.query("fetch_tags", queries::TAGS, &[]).await?;
        let mut names: Vec<String> = records.into_iter().filter_map(|r| r.name).collect();
        names.dedup();
        Ok(names)
    }

    /// Lists assets carrying `tag`, newest first, for a 1-indexed `page`.
    ///
    /// A page past the end of the result set yields an empty list.
    ///
    /// # Errors
    ///
    /// - [`SanityError::Http`] on network failure.
    /// - [`SanityError::Api`] on a non-2xx status.
    /// - [`SanityError::Deserialize`] if the body does not match the expected shape.
    pub async fn fetch_assets(
        &self,
        tag: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Asset>, SanityError> {
        let window = PageWindow::for_page(page, page_size);
        let groq = queries::assets_by_tag(window);
        let records: Vec<AssetRecord> = self
            .query(
                &format!("fetch_assets(tag={tag}, page={page})"),
                &groq,
                &[("tag", serde_json::Value::from(tag))],
            )
            .await?;
        Ok(collect_assets(records))
    }

    /// Lists every asset that has both coordinates, newest first.
    ///
    /// # Errors
    ///
    /// - [`SanityError::Http`] on network failure.
    /// - [`SanityError::Api`] on a non-2xx status.
    /// - [`SanityError::Deserialize`] if the body does not match the expected shape.
    pub async fn fetch_located_assets(&self) -> Result<Vec<Asset>, SanityError> {
        let records: Vec<AssetRecord> = self
            .query("fetch_located_assets", &queries::located_assets(), &[])
            .await?;
        Ok(collect_assets(records))
    }

    /// Lists published assets missing latitude or longitude.
    ///
    /// # Errors
    ///
    /// - [`SanityError::Http`] on network failure.
    /// - [`SanityError::Api`] on a non-2xx status.
    /// - [`SanityError::Deserialize`] if the body does not match the expected shape.
    pub async fn fetch_assets_without_location(&self) -> Result<Vec<UnlocatedAsset>, SanityError> {
        self.query(
            "fetch_assets_without_location",
            &queries::unlocated_assets(),
            &[],
        )
        .await
    }

    /// Sets `metadata.location` on a single asset with a patch mutation.
    ///
    /// # Errors
    ///
    /// - [`SanityError::Http`] on network failure.
    /// - [`SanityError::Api`] on a non-2xx status (e.g. an unauthorized token).
    /// - [`SanityError::Deserialize`] if the acknowledgement cannot be parsed.
    pub async fn set_asset_location(
        &self,
        asset_id: &str,
        point: GeoPoint,
    ) -> Result<(), SanityError> {
        let url = self.endpoint_url(&self.mutate_base, "mutate")?;
        let payload = serde_json::json!({
            "mutations": [{
                "patch": {
                    "id": asset_id,
                    "set": {
                        "metadata.location": {
                            "_type": "geopoint",
                            "lat": point.lat,
                            "lng": point.lng
                        }
                    }
                }
            }]
        });

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?;
        let body = read_success_body(response).await?;
        let ack: MutateResponse =
            serde_json::from_str(&body).map_err(|e| SanityError::Deserialize {
                context: format!("set_asset_location(id={asset_id})"),
                source: e,
            })?;

        tracing::debug!(
            asset_id,
            transaction_id = %ack.transaction_id,
            "asset location patched"
        );
        Ok(())
    }

    /// Runs a GROQ query and decodes the `result` field of the envelope.
    async fn query<T: DeserializeOwned>(
        &self,
        context: &str,
        groq: &str,
        params: &[(&str, serde_json::Value)],
    ) -> Result<T, SanityError> {
        let url = self.build_query_url(groq, params)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        let body = read_success_body(response).await?;
        let envelope: QueryResponse<T> =
            serde_json::from_str(&body).map_err(|e| SanityError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;
        Ok(envelope.result)
    }

    /// Builds the query URL with the GROQ text and JSON-encoded `$param`
    /// values as percent-encoded query pairs.
    fn build_query_url(
        &self,
        groq: &str,
        params: &[(&str, serde_json::Value)],
    ) -> Result<Url, SanityError> {
        let mut url = self.endpoint_url(&self.query_base, "query")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", groq);
            for (name, value) in params {
                pairs.append_pair(&format!("${name}"), &value.to_string());
            }
        }
        Ok(url)
    }

    fn endpoint_url(&self, base: &Url, operation: &str) -> Result<Url, SanityError> {
        let path = format!("{}/data/{operation}/{}", self.api_version, self.dataset);
        base.join(&path)
            .map_err(|e| SanityError::InvalidUrl(format!("{base}{path}: {e}")))
    }
}

fn build_http_client(timeout_secs: u64) -> Result<Client, SanityError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent("atlas/0.1 (content-site)")
        .build()?)
}

/// Parses a base URL, ensuring it ends with exactly one slash so relative
/// joins append to the path instead of replacing its last segment.
fn parse_base(base_url: &str) -> Result<Url, SanityError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised)
        .map_err(|e| SanityError::InvalidUrl(format!("invalid base URL '{base_url}': {e}")))
}

/// `"2024-01-01"` and `"v2024-01-01"` both become `"v2024-01-01"`.
fn normalize_api_version(version: &str) -> String {
    let trimmed = version.trim();
    if trimmed.starts_with('v') {
        trimmed.to_owned()
    } else {
        format!("v{trimmed}")
    }
}

/// Returns the body of a 2xx response, or [`SanityError::Api`] carrying the
/// store's error description.
async fn read_success_body(response: Response) -> Result<String, SanityError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(SanityError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    Ok(body)
}

/// Extracts a human-readable message from a Sanity error body.
///
/// Query errors look like `{"error": {"description": "..."}}`; auth and
/// routing errors look like `{"error": "Unauthorized", "message": "..."}`.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.chars().take(200).collect();
    };
    value
        .pointer("/error/description")
        .or_else(|| value.get("message"))
        .or_else(|| value.get("error"))
        .and_then(serde_json::Value::as_str)
        .unwrap_or("unknown error")
        .to_string()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
