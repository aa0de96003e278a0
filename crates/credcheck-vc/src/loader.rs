use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

/// Error raised by a [`DocumentLoader`].
///
/// From the pipeline's point of view a loader failure condemns the
/// credential, not the process: the message ends up in a rejection.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct LoaderError(String);

impl LoaderError {
    pub fn new(message: impl ToString) -> Self {
        Self(message.to_string())
    }
}

/// Retrieves the JSON document a URL points at.
///
/// `Ok(None)` means the document does not exist. Transport and decoding
/// problems are reported through [`LoaderError`].
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<Option<Value>, LoaderError>;
}

/// Loader serving documents from a fixed in-memory table.
#[derive(Debug, Clone, Default)]
pub struct StaticDocumentLoader {
    documents: HashMap<String, Value>,
}

impl StaticDocumentLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: impl Into<String>, document: Value) -> Self {
        self.insert(url, document);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, document: Value) {
        self.documents.insert(url.into(), document);
    }
}

#[async_trait]
impl DocumentLoader for StaticDocumentLoader {
    async fn load(&self, url: &str) -> Result<Option<Value>, LoaderError> {
        Ok(self.documents.get(url).cloned())
    }
}

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::Value;

    use super::{DocumentLoader, LoaderError};

    const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Loader fetching key and controller documents over HTTP(S).
    ///
    /// A `404` maps to `Ok(None)`; every other failure, including the
    /// request timeout, surfaces as a [`LoaderError`].
    #[derive(Debug, Clone)]
    pub struct HttpDocumentLoader {
        client: reqwest::Client,
    }

    impl HttpDocumentLoader {
        pub fn new() -> Result<Self, LoaderError> {
            Self::with_timeout(DEFAULT_TIMEOUT)
        }

        pub fn with_timeout(timeout: Duration) -> Result<Self, LoaderError> {
            let client = reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(timeout)
                .build()
                .map_err(LoaderError::new)?;
            Ok(Self { client })
        }
    }

    #[async_trait]
    impl DocumentLoader for HttpDocumentLoader {
        async fn load(&self, url: &str) -> Result<Option<Value>, LoaderError> {
            tracing::debug!(%url, "fetching key document");
            let response = self
                .client
                .get(url)
                .header(reqwest::header::ACCEPT, "application/json")
                .send()
                .await
                .map_err(LoaderError::new)?;
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Ok(None);
            }
            let response = response.error_for_status().map_err(LoaderError::new)?;
            let document: Value = response.json().await.map_err(LoaderError::new)?;
            Ok(Some(document))
        }
    }
}

#[cfg(feature = "http")]
pub use http::HttpDocumentLoader;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn static_loader_serves_inserted_documents() {
        let loader = StaticDocumentLoader::new()
            .with_document("https://example.com/key.json", json!({"controller": "x"}));
        let document = loader.load("https://example.com/key.json").await.unwrap();
        assert_eq!(document, Some(json!({"controller": "x"})));
    }

    #[tokio::test]
    async fn static_loader_misses_are_not_errors() {
        let loader = StaticDocumentLoader::new();
        assert_eq!(loader.load("https://example.com/absent").await.unwrap(), None);
    }
}
