//! # Market-Data SDK Handle
//!
//! Pages call [`MarketDataSdk::ensure_started`] on every request. [`MoralisSdk`]
//! turns that into a one-time start: the first call builds (and optionally
//! verifies) the client, every later call is a cheap check. A failed start is not
//! remembered, so the next request tries again.

use crate::client::{MoralisClient, MoralisConfig};
use crate::error::SdkError;
use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{error, info, instrument};

/// Process-wide market-data client with an explicit start lifecycle.
#[async_trait]
pub trait MarketDataSdk: Send + Sync {
    /// Start the client if it is not running yet.
    async fn ensure_started(&self) -> Result<(), SdkError>;
}

/// Start-once Moralis SDK handle.
pub struct MoralisSdk {
    config: MoralisConfig,
    client: OnceCell<MoralisClient>,
}

impl MoralisSdk {
    pub fn new(config: MoralisConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    /// The started client, if [`ensure_started`](MarketDataSdk::ensure_started) has succeeded.
    pub fn client(&self) -> Option<&MoralisClient> {
        self.client.get()
    }

    pub fn is_started(&self) -> bool {
        self.client.initialized()
    }

    async fn start(&self) -> Result<MoralisClient, SdkError> {
        info!(base_url = %self.config.base_url, "[MORALIS] Starting market-data client");
        let client = MoralisClient::new(&self.config)?;

        if self.config.verify_on_start {
            client.verify().await?;
        }

        info!("[MORALIS] Market-data client started");
        Ok(client)
    }
}

#[async_trait]
impl MarketDataSdk for MoralisSdk {
    #[instrument(skip(self))]
    async fn ensure_started(&self) -> Result<(), SdkError> {
        self.client
            .get_or_try_init(|| self.start())
            .await
            .map(|_| ())
            .map_err(|e| {
                error!("[MORALIS] Failed to start market-data client: {}", e);
                e
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Serve `/web3/version`, failing the first `fail_first` calls with 401.
    async fn spawn_version_server(hits: Arc<AtomicUsize>, fail_first: usize) -> String {
        let app = Router::new().route(
            "/web3/version",
            get(move || {
                let hits = Arc::clone(&hits);
                async move {
                    let n = hits.fetch_add(1, Ordering::SeqCst);
                    if n < fail_first {
                        Err((StatusCode::UNAUTHORIZED, "Invalid key"))
                    } else {
                        Ok(Json(serde_json::json!({ "version": "2.2" })))
                    }
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn config(api_key: &str, base_url: String, verify_on_start: bool) -> MoralisConfig {
        MoralisConfig {
            api_key: api_key.to_string(),
            base_url,
            timeout: Duration::from_secs(5),
            verify_on_start,
        }
    }

    #[tokio::test]
    async fn test_started_once_across_calls() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base_url = spawn_version_server(Arc::clone(&hits), 0).await;
        let sdk = MoralisSdk::new(config("key", base_url, true));

        for _ in 0..5 {
            sdk.ensure_started().await.unwrap();
        }

        assert!(sdk.is_started());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_first_calls_share_one_start() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base_url = spawn_version_server(Arc::clone(&hits), 0).await;
        let sdk = Arc::new(MoralisSdk::new(config("key", base_url, true)));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let sdk = Arc::clone(&sdk);
                tokio::spawn(async move { sdk.ensure_started().await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_start_is_retried() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base_url = spawn_version_server(Arc::clone(&hits), 1).await;
        let sdk = MoralisSdk::new(config("key", base_url, true));

        let first = sdk.ensure_started().await;
        assert!(matches!(first, Err(SdkError::Rejected { status: 401, .. })));
        assert!(sdk.client().is_none());

        sdk.ensure_started().await.unwrap();
        assert!(sdk.client().is_some());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let sdk = MoralisSdk::new(config("", "http://127.0.0.1:9".to_string(), true));
        let result = sdk.ensure_started().await;
        assert!(matches!(result, Err(SdkError::MissingApiKey)));
        assert!(!sdk.is_started());
    }

    #[tokio::test]
    async fn test_start_without_verification_skips_network() {
        let sdk = MoralisSdk::new(config("key", "http://127.0.0.1:9".to_string(), false));
        sdk.ensure_started().await.unwrap();
        assert_eq!(sdk.client().unwrap().base_url(), "http://127.0.0.1:9");
    }
}
