//! Service layer for the resolver.
//!
//! - Identifier resolution (`resolver`)
//! - Gallica IIIF manifests (`Gallica`)
//! - IRHT manuscript API (`Irht`)
//!
//! Both provider clients implement [`ManuscriptApi`], which composes URL
//! building, fetching and normalization.

mod gallica;
mod irht;
pub mod resolver;

pub use gallica::Gallica;
pub use irht::Irht;
pub use resolver::{classify, extract_identifier, is_match};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{Identifier, ProviderTag, ResolvedRecord};
use crate::utils::JsonFetcher;

/// A provider's client and normalizer.
#[async_trait]
pub trait ManuscriptApi: Send + Sync {
    /// Normalized record produced for this provider.
    type Record: Send;

    const TAG: ProviderTag;

    /// Whether the URL belongs to this provider.
    fn is_match(&self, url: &str) -> bool {
        resolver::is_match(url, Self::TAG)
    }

    /// Extract this provider's identifier from a URL.
    fn extract(&self, url: &str) -> Result<Identifier> {
        resolver::extract_identifier(url, Self::TAG)
    }

    /// URL of the provider's metadata document for an identifier.
    fn build_fetch_url(&self, identifier: &Identifier) -> Result<String>;

    /// Map a raw provider document into the normalized record.
    fn normalize(&self, document: &Value) -> Result<Self::Record>;

    /// Fetch the raw metadata document. Transport failures are not retried.
    async fn fetch(&self, fetcher: &dyn JsonFetcher, identifier: &Identifier) -> Result<Value> {
        let url = self.build_fetch_url(identifier)?;
        fetcher
            .fetch_json(&url)
            .await
            .map_err(|source| AppError::Transport {
                provider: Self::TAG,
                identifier: identifier.to_string(),
                source,
            })
    }

    /// Fetch and normalize the record for an identifier.
    async fn object(
        &self,
        fetcher: &dyn JsonFetcher,
        identifier: &Identifier,
    ) -> Result<Self::Record> {
        let document = self.fetch(fetcher, identifier).await?;
        self.normalize(&document)
            .map_err(|e| e.with_identifier(identifier))
    }
}

/// Resolve one URL end to end.
///
/// Returns `Ok(None)` when the URL belongs to no known provider.
pub async fn resolve_url(fetcher: &dyn JsonFetcher, url: &str) -> Result<Option<ResolvedRecord>> {
    let Some(provider) = classify(url) else {
        log::debug!("No provider for {}", url);
        return Ok(None);
    };

    let record: ResolvedRecord = match provider {
        ProviderTag::Gallica => resolve_with(&Gallica, fetcher, url).await?.into(),
        ProviderTag::Irht => resolve_with(&Irht, fetcher, url).await?.into(),
    };
    Ok(Some(record))
}

async fn resolve_with<P: ManuscriptApi>(
    api: &P,
    fetcher: &dyn JsonFetcher,
    url: &str,
) -> Result<P::Record> {
    let identifier = api.extract(url)?;
    log::debug!("Resolving {} {}", P::TAG, identifier);
    api.object(fetcher, &identifier).await
}

/// Map a `serde_path_to_error` failure to a normalization error on its path.
pub(crate) fn shape_error(
    provider: ProviderTag,
    error: serde_path_to_error::Error<serde_json::Error>,
) -> AppError {
    let path = error.path().to_string();
    let field = if path == "." { "document".to_string() } else { path };
    AppError::normalization(provider, field, error.into_inner())
}

#[cfg(test)]
pub(crate) mod testing {
    //! Stub fetcher shared by the service and pipeline tests.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use crate::error::TransportError;
    use crate::utils::JsonFetcher;

    /// Serves canned documents by URL and records every request.
    #[derive(Default)]
    pub struct StubFetcher {
        documents: HashMap<String, Value>,
        pub requests: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        pub fn with(mut self, url: &str, document: Value) -> Self {
            self.documents.insert(url.to_string(), document);
            self
        }
    }

    #[async_trait]
    impl JsonFetcher for StubFetcher {
        async fn fetch_json(&self, url: &str) -> Result<Value, TransportError> {
            self.requests.lock().unwrap().push(url.to_string());
            self.documents
                .get(url)
                .cloned()
                .ok_or_else(|| TransportError::Status {
                    url: url.to_string(),
                    status_code: 404,
                    message: "Not Found".to_string(),
                })
        }
    }
}
