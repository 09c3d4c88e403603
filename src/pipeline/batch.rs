// src/pipeline/batch.rs

//! Batch resolution pipeline.
//!
//! Resolves many URLs with bounded concurrency and aggregates the records by
//! domain: `domain -> url -> record | null`.

use std::collections::BTreeMap;
use std::path::Path;

use futures::stream::{self, StreamExt};

use crate::error::Result;
use crate::models::{BatchConfig, ResolvedRecord};
use crate::services::resolve_url;
use crate::utils::JsonFetcher;
use crate::utils::url::host_segment;

/// Records keyed by domain, then by source URL. Unresolved URLs map to `None`.
pub type Aggregate = BTreeMap<String, BTreeMap<String, Option<ResolvedRecord>>>;

/// Summary of a batch run.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub results: Aggregate,
    pub total: usize,
    pub resolved: usize,
    pub unrecognized: usize,
    pub failures: usize,
}

/// Resolve every URL and aggregate the results.
///
/// A failed URL is logged and recorded as `None` unless `fail_fast` is set,
/// in which case the first error aborts the batch.
pub async fn run_batch(
    config: &BatchConfig,
    fetcher: &dyn JsonFetcher,
    urls: &[String],
) -> Result<BatchOutcome> {
    let concurrency = config.max_concurrent.max(1);
    let mut outcome = BatchOutcome {
        total: urls.len(),
        ..BatchOutcome::default()
    };

    let mut resolutions = stream::iter(urls)
        .map(|url| async move { (url, resolve_url(fetcher, url).await) })
        .buffered(concurrency);

    let mut done = 0;
    while let Some((url, result)) = resolutions.next().await {
        done += 1;
        let entry = match result {
            Ok(Some(record)) => {
                outcome.resolved += 1;
                log::debug!("Resolved {} record {}", record.provider(), record.identifier());
                Some(record)
            }
            Ok(None) => {
                outcome.unrecognized += 1;
                log::debug!("Unrecognized URL: {}", url);
                None
            }
            Err(error) => {
                if config.fail_fast {
                    return Err(error);
                }
                outcome.failures += 1;
                match error.provider() {
                    Some(provider) => {
                        log::warn!("Failed to resolve {} URL {}: {}", provider, url, error)
                    }
                    None => log::warn!("Failed to resolve {}: {}", url, error),
                }
                None
            }
        };

        outcome
            .results
            .entry(domain_key(url))
            .or_default()
            .insert(url.clone(), entry);

        if config.progress_every > 0 && done % config.progress_every == 0 {
            log::info!("Resolved {}/{} URLs", done, outcome.total);
        }
    }

    Ok(outcome)
}

fn domain_key(url: &str) -> String {
    host_segment(url).unwrap_or_default().to_string()
}

/// Write the aggregate as pretty-printed JSON.
pub async fn write_results(path: impl AsRef<Path>, results: &Aggregate) -> Result<()> {
    let json = serde_json::to_vec_pretty(results)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
