use crate::{Metadata, MetadataSource, PreviewError};
use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client};
use std::time::Duration;
use tracing::{debug, error, instrument};
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://open-apis.hax.cloud/api/services/website/metadata";
pub const DEFAULT_USER_AGENT: &str = "link_preview_card/0.1.0";

/// Client for the website metadata service.
#[derive(Clone)]
pub struct MetadataFetcher {
    client: Client,
    endpoint: Url,
}

impl Default for MetadataFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataFetcher {
    pub fn new() -> Self {
        debug!("Metadata fetcher initialized with default configuration");
        Self {
            client: Client::new(),
            // constant, known to parse
            endpoint: Url::parse(DEFAULT_ENDPOINT).unwrap(),
        }
    }

    /// Creates a fetcher with custom configuration.
    ///
    /// # Examples
    /// ```ignore
    /// let fetcher = MetadataFetcher::new_with_config(FetcherConfig {
    ///     endpoint: "http://localhost:8080/api/services/website/metadata".to_string(),
    ///     timeout: Some(Duration::from_secs(5)),
    ///     ..Default::default()
    /// })?;
    /// ```
    pub fn new_with_config(config: FetcherConfig) -> Result<Self, PreviewError> {
        let endpoint = Url::parse(&config.endpoint)?;

        let mut client_builder = Client::builder().user_agent(config.user_agent);

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        if let Some(headers) = config.headers {
            client_builder = client_builder.default_headers(headers);
        }

        let client = client_builder.build().map_err(|e| {
            error!(error = %e, "Failed to create HTTP client");
            PreviewError::ConfigError(e.to_string())
        })?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Asks the metadata service about `link`.
    ///
    /// The link is sent verbatim as the `q` query parameter. Any status
    /// outside the 2xx range is an error, as is a body without a `data`
    /// object.
    #[instrument(level = "debug", skip(self), err)]
    pub async fn fetch_metadata(&self, link: &str) -> Result<Metadata, PreviewError> {
        debug!(link = %link, "Requesting website metadata");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("q", link)])
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, link = %link, "Failed to send metadata request");
                PreviewError::FetchError(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, link = %link, "Metadata service rejected request");
            return Err(PreviewError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            error!(error = %e, link = %link, "Failed to read metadata response body");
            PreviewError::FetchError(e.to_string())
        })?;

        let metadata = Metadata::from_json(&body)?;
        debug!(link = %link, body_length = body.len(), "Received website metadata");
        Ok(metadata)
    }

    /// Fetches several links concurrently. Each result stands on its own.
    pub async fn fetch_batch(&self, links: &[&str]) -> Vec<Result<Metadata, PreviewError>> {
        let futures: Vec<_> = links.iter().map(|link| self.fetch_metadata(link)).collect();
        futures::future::join_all(futures).await
    }
}

#[async_trait]
impl MetadataSource for MetadataFetcher {
    async fn fetch_metadata(&self, link: &str) -> Result<Metadata, PreviewError> {
        MetadataFetcher::fetch_metadata(self, link).await
    }
}

pub struct FetcherConfig {
    pub endpoint: String,
    pub user_agent: String,
    /// `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
    pub headers: Option<HeaderMap>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            headers: None,
        }
    }
}

impl FetcherConfig {
    /// Reads `LINK_PREVIEW_ENDPOINT`, `LINK_PREVIEW_USER_AGENT` and
    /// `LINK_PREVIEW_TIMEOUT_SECS`, keeping defaults for unset variables.
    pub fn from_env() -> Result<Self, PreviewError> {
        let mut config = Self::default();

        if let Ok(endpoint) = std::env::var("LINK_PREVIEW_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Ok(user_agent) = std::env::var("LINK_PREVIEW_USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Ok(secs) = std::env::var("LINK_PREVIEW_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                PreviewError::ConfigError(format!("Invalid LINK_PREVIEW_TIMEOUT_SECS: {e}"))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let fetcher = MetadataFetcher::new();
        assert_eq!(fetcher.endpoint().as_str(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let result =
            MetadataFetcher::new_with_config(FetcherConfig::default().with_endpoint("not a url"));
        assert!(matches!(result, Err(PreviewError::UrlParseError(_))));
    }

    #[test]
    fn test_config_from_env() {
        // the only test touching these variables
        std::env::set_var("LINK_PREVIEW_ENDPOINT", "http://127.0.0.1:9/metadata");
        std::env::set_var("LINK_PREVIEW_USER_AGENT", "card-tests/1.0");
        std::env::set_var("LINK_PREVIEW_TIMEOUT_SECS", " 7 ");

        let config = FetcherConfig::from_env().unwrap();
        assert_eq!(config.endpoint, "http://127.0.0.1:9/metadata");
        assert_eq!(config.user_agent, "card-tests/1.0");
        assert_eq!(config.timeout, Some(Duration::from_secs(7)));

        std::env::set_var("LINK_PREVIEW_TIMEOUT_SECS", "soon");
        let result = FetcherConfig::from_env();

        std::env::remove_var("LINK_PREVIEW_ENDPOINT");
        std::env::remove_var("LINK_PREVIEW_USER_AGENT");
        std::env::remove_var("LINK_PREVIEW_TIMEOUT_SECS");

        match result {
            Err(PreviewError::ConfigError(msg)) => {
                assert!(msg.contains("LINK_PREVIEW_TIMEOUT_SECS"))
            }
            Err(e) => panic!("expected ConfigError, got: {e:?}"),
            Ok(_) => panic!("expected ConfigError for a non-numeric timeout"),
        }
    }

    #[test]
    fn test_config_defaults_have_no_timeout() {
        let config = FetcherConfig::default();
        assert!(config.timeout.is_none());
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }
}
