// src/utils/http.rs

//! HTTP client utilities and the JSON fetch seam.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::{Result, TransportError};
use crate::models::HttpConfig;

/// Fetches a URL and decodes its body as JSON.
///
/// This is the only I/O the resolver performs. Timeouts, TLS and connection
/// reuse belong to the implementation.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> std::result::Result<Value, TransportError>;
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &HttpConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

#[async_trait]
impl JsonFetcher for Client {
    async fn fetch_json(&self, url: &str) -> std::result::Result<Value, TransportError> {
        log::debug!("GET {}", url);
        let response = self.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status_code: status.as_u16(),
                message: truncate(&body, 200),
            });
        }
        serde_json::from_str(&body).map_err(|e| TransportError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

fn truncate(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}
