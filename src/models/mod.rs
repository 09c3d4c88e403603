// src/models/mod.rs

//! Domain models for the resolver.
//!
//! Provider tags and identifiers, the two normalized record shapes, and the
//! application configuration.

mod config;
mod gallica;
mod irht;
mod provider;

// Re-export all public types
pub use config::{BatchConfig, Config, HttpConfig};
pub use gallica::{DigitizedObjectRecord, MetadataValue};
pub use irht::{ManuscriptRecord, Reproduction};
pub use provider::{Identifier, ProviderTag};

use serde::{Deserialize, Serialize};

/// A normalized record from either provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResolvedRecord {
    Gallica(DigitizedObjectRecord),
    Irht(ManuscriptRecord),
}

impl ResolvedRecord {
    pub fn provider(&self) -> ProviderTag {
        match self {
            ResolvedRecord::Gallica(_) => ProviderTag::Gallica,
            ResolvedRecord::Irht(_) => ProviderTag::Irht,
        }
    }

    /// ARK of the resolved record.
    pub fn identifier(&self) -> &str {
        match self {
            ResolvedRecord::Gallica(record) => &record.identifier,
            ResolvedRecord::Irht(record) => &record.identifier,
        }
    }
}

impl From<DigitizedObjectRecord> for ResolvedRecord {
    fn from(record: DigitizedObjectRecord) -> Self {
        ResolvedRecord::Gallica(record)
    }
}

impl From<ManuscriptRecord> for ResolvedRecord {
    fn from(record: ManuscriptRecord) -> Self {
        ResolvedRecord::Irht(record)
    }
}
