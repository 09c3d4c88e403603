//! Provider tags and validated identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// The two manuscript platforms the resolver knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderTag {
    /// BnF Gallica IIIF service
    Gallica,
    /// IRHT Arca catalogue
    Irht,
}

impl ProviderTag {
    /// Every known provider, in classification order.
    pub const ALL: [ProviderTag; 2] = [ProviderTag::Gallica, ProviderTag::Irht];

    /// Domain public record URLs are served from.
    pub fn domain(&self) -> &'static str {
        match self {
            ProviderTag::Gallica => "gallica.bnf.fr",
            ProviderTag::Irht => "arca.irht.cnrs.fr",
        }
    }

    /// Required ARK prefix of the provider's identifiers.
    pub fn ark_prefix(&self) -> &'static str {
        match self {
            ProviderTag::Gallica => "ark:/12148/",
            ProviderTag::Irht => "ark:/63955/",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderTag::Gallica => "Gallica",
            ProviderTag::Irht => "IRHT",
        }
    }
}

impl fmt::Display for ProviderTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// An ARK that has been checked against its provider's prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    provider: ProviderTag,
    value: String,
}

impl Identifier {
    /// Build an identifier, rejecting values without the provider's ARK prefix.
    pub fn new(provider: ProviderTag, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if !value.starts_with(provider.ark_prefix()) {
            return Err(AppError::invalid_identifier(provider, value));
        }
        Ok(Self { provider, value })
    }

    pub fn provider(&self) -> ProviderTag {
        self.provider
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
