//! Where key sets come from.
//!
//! The provider only depends on [`KeySetSource`]; the HTTP implementation is
//! the production one.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use super::types::KeySet;

/// Key-set retrieval errors.
///
/// Kept separate from `AuthError` so the provider decides how to surface them
/// (it fails closed as `ProviderUnavailable`).
#[derive(Debug, Error)]
pub enum KeySetError {
    #[error("key set request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("key set endpoint returned {0}")]
    Status(StatusCode),
    #[error("malformed key set payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[async_trait]
pub trait KeySetSource: Send + Sync + 'static {
    // Endpoint description for logs.
    fn describe(&self) -> &str;

    async fn fetch(&self) -> Result<KeySet, KeySetError>;
}

/// Fetches the key set with a plain `GET` against the provider's JWKS URL.
#[derive(Debug, Clone)]
pub struct HttpKeySetSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpKeySetSource {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, KeySetError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl KeySetSource for HttpKeySetSource {
    fn describe(&self) -> &str {
        self.url.as_str()
    }

    async fn fetch(&self) -> Result<KeySet, KeySetError> {
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(KeySetError::Status(status));
        }

        // Decode separately so a bad payload is distinguishable from a bad transport.
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
