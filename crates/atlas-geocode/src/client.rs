//! HTTP client for the Nominatim (`OpenStreetMap`) search API.
//!
//! Nominatim's usage policy requires an identifying `User-Agent` and at most
//! one request per second. This client sets the header; pacing is left to
//! [`crate::CachedGeocoder`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::GeocodeError;
use crate::types::{GeocodingResult, NominatimPlace};

pub struct NominatimClient {
    client: Client,
    base_url: Url,
}

impl NominatimClient {
    /// Creates a client for the Nominatim instance at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, user_agent: &str, timeout_secs: u64) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalised).map_err(|_| GeocodeError::InvalidBaseUrl(base_url.to_owned()))?;

        Ok(Self { client, base_url })
    }

    /// Resolves a free-text place name to its best match.
    ///
    /// Returns `Ok(None)` when the service has no match.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] on network failure.
    /// - [`GeocodeError::UnexpectedStatus`] on a non-2xx status.
    /// - [`GeocodeError::Deserialize`] if the body is not a JSON array of places.
    /// - [`GeocodeError::InvalidCoordinate`] if the match has unusable coordinates.
    pub async fn search(&self, query: &str) -> Result<Option<GeocodingResult>, GeocodeError> {
        let url = self.search_url(query);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("search(q={query})"),
                source: e,
            })?;

        places
            .into_iter()
            .next()
            .map(GeocodingResult::try_from)
            .transpose()
    }

    fn search_url(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("search");
        }
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("limit", "1");
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_sets_required_params() {
        let client = NominatimClient::new("https://nominatim.openstreetmap.org", "test/1.0", 5)
            .expect("client");
        let url = client.search_url("Tokyo, Japan");
        assert_eq!(url.path(), "/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "Tokyo, Japan".to_string()),
                ("format".to_string(), "json".to_string()),
                ("limit".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn search_url_appends_to_base_path() {
        let client =
            NominatimClient::new("http://localhost:8080/nominatim/", "test/1.0", 5).expect("client");
        assert_eq!(client.search_url("Lima").path(), "/nominatim/search");
    }

    #[test]
    fn rejects_invalid_base_url() {
        let result = NominatimClient::new("::not a url::", "test/1.0", 5);
        assert!(matches!(result, Err(GeocodeError::InvalidBaseUrl(_))));
    }
}
