//! # Moralis HTTP Client
//!
//! Thin wrapper around `reqwest` preconfigured for the Moralis Web3 Data API:
//! the API key travels as the `X-API-Key` default header on every request.

use crate::error::SdkError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Options needed to start the client.
#[derive(Clone)]
pub struct MoralisConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Call the version endpoint once during start to prove the key works
    pub verify_on_start: bool,
}

impl From<&lib_core::Config> for MoralisConfig {
    fn from(config: &lib_core::Config) -> Self {
        Self {
            api_key: config.moralis_api_key.clone(),
            base_url: config.moralis_base_url.clone(),
            timeout: Duration::from_secs(config.moralis_timeout_secs),
            verify_on_start: config.moralis_verify_on_start,
        }
    }
}

impl std::fmt::Debug for MoralisConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoralisConfig")
            .field("api_key", &"***REDACTED***")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("verify_on_start", &self.verify_on_start)
            .finish()
    }
}

/// Response of `GET /web3/version`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiVersion {
    pub version: String,
}

/// HTTP client wrapper for the Moralis API
#[derive(Debug, Clone)]
pub struct MoralisClient {
    http: Client,
    base_url: String,
}

impl MoralisClient {
    /// Build a client from configuration. Does not contact Moralis.
    pub fn new(config: &MoralisConfig) -> Result<Self, SdkError> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(SdkError::MissingApiKey);
        }

        let mut key_header = HeaderValue::from_str(api_key)
            .map_err(|_| SdkError::InvalidConfig("API key contains invalid header characters".into()))?;
        key_header.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", key_header);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        debug!(base_url = %config.base_url, "[MORALIS] HTTP client built");

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query the API version; fails when Moralis rejects the key.
    pub async fn verify(&self) -> Result<ApiVersion, SdkError> {
        let url = format!("{}/web3/version", self.base_url);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SdkError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let version: ApiVersion = response.json().await?;
        info!(version = %version.version, "[MORALIS] API key verified");
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: &str) -> MoralisConfig {
        MoralisConfig {
            api_key: api_key.to_string(),
            base_url: "https://deep-index.moralis.io/api/v2.2/".to_string(),
            timeout: Duration::from_secs(5),
            verify_on_start: false,
        }
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(MoralisClient::new(&config("")), Err(SdkError::MissingApiKey)));
        assert!(matches!(MoralisClient::new(&config("  ")), Err(SdkError::MissingApiKey)));
    }

    #[test]
    fn test_key_with_newline_rejected() {
        let result = MoralisClient::new(&config("abc\ndef"));
        assert!(matches!(result, Err(SdkError::InvalidConfig(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = MoralisClient::new(&config("key")).unwrap();
        assert_eq!(client.base_url(), "https://deep-index.moralis.io/api/v2.2");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let rendered = format!("{:?}", config("super-secret-key"));
        assert!(!rendered.contains("super-secret-key"));
    }
}
