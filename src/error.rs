// src/error.rs

//! Unified error handling for the resolver.

use std::fmt;

use thiserror::Error;

use crate::models::{Identifier, ProviderTag};

/// Result type alias for resolver operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Host matched a provider but the remainder is not one of its ARKs
    #[error("{} ARK expected, got '{value}'", .provider.display_name())]
    InvalidIdentifier { provider: ProviderTag, value: String },

    /// Fetching the provider document failed
    #[error("Transport error while fetching {provider} {identifier}: {source}")]
    Transport {
        provider: ProviderTag,
        identifier: String,
        #[source]
        source: TransportError,
    },

    /// The provider document did not satisfy a required field
    #[error("Normalization error for {provider}{} at '{field}': {message}", identifier_suffix(.identifier))]
    Normalization {
        provider: ProviderTag,
        identifier: Option<String>,
        field: String,
        message: String,
    },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client construction failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Delimited input could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

fn identifier_suffix(identifier: &Option<String>) -> String {
    identifier
        .as_deref()
        .map(|id| format!(" {id}"))
        .unwrap_or_default()
}

impl AppError {
    /// Create an invalid identifier error.
    pub fn invalid_identifier(provider: ProviderTag, value: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            provider,
            value: value.into(),
        }
    }

    /// Create a normalization error for a document field.
    pub fn normalization(
        provider: ProviderTag,
        field: impl Into<String>,
        message: impl fmt::Display,
    ) -> Self {
        Self::Normalization {
            provider,
            identifier: None,
            field: field.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Attach the identifier being resolved to a normalization error.
    pub fn with_identifier(self, identifier: &Identifier) -> Self {
        match self {
            Self::Normalization {
                provider,
                identifier: None,
                field,
                message,
            } => Self::Normalization {
                provider,
                identifier: Some(identifier.to_string()),
                field,
                message,
            },
            other => other,
        }
    }

    /// The provider this error concerns, if any.
    pub fn provider(&self) -> Option<ProviderTag> {
        match self {
            Self::InvalidIdentifier { provider, .. }
            | Self::Transport { provider, .. }
            | Self::Normalization { provider, .. } => Some(*provider),
            _ => None,
        }
    }
}

/// Failure reported by the JSON fetch collaborator.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Network or protocol failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("{url} returned HTTP {status_code}: {message}")]
    Status {
        url: String,
        status_code: u16,
        message: String,
    },

    /// Body was not valid JSON
    #[error("{url} returned an invalid JSON body: {message}")]
    Decode { url: String, message: String },
}
