use async_trait::async_trait;
use baseline_core::model::FeatureItem;

use crate::repository::{CatalogSource, StorageError};

/// Catalog fetched from a static HTTP resource.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalog {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn load(&self) -> Result<Vec<FeatureItem>, StorageError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| StorageError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::HttpStatus(status.as_u16()));
        }

        response.json::<Vec<FeatureItem>>().await.map_err(|e| {
            if e.is_decode() {
                StorageError::Serialization(e.to_string())
            } else {
                StorageError::Http(e.to_string())
            }
        })
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
