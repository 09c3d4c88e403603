// src/services/gallica.rs

//! Gallica IIIF client and manifest normalizer.
//!
//! Manifest metadata is a list of `{label, value}` pairs with no fixed
//! schema. Each field is found by scanning that list; the first entry in
//! document order that satisfies the field's rule wins, since labels can
//! repeat.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{DigitizedObjectRecord, Identifier, MetadataValue, ProviderTag};
use crate::services::{ManuscriptApi, resolver, shape_error};

const HOST_URL: &str = "https://gallica.bnf.fr/";
const IIIF_BASE: &str = "https://gallica.bnf.fr/iiif/";

const ENSEMBLE_NOTICE_PREFIX: &str = "Notice d'ensemble : ";
// U+2019, as Gallica sends it. Not the same apostrophe as above.
const WORK_NOTICE_PREFIX: &str = "Notice d\u{2019}oeuvre : ";
const CATALOGUE_NOTICE_PREFIX: &str = "Notice du catalogue : ";

/// Client for the Gallica IIIF service.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gallica;

impl Gallica {
    /// Base URL of the IIIF image service for a document.
    pub fn build_images_url(&self, identifier: &Identifier) -> Result<String> {
        let ark = resolver::ensure_provider(identifier, ProviderTag::Gallica)?;
        Ok(format!("{IIIF_BASE}{ark}"))
    }
}

impl ManuscriptApi for Gallica {
    type Record = DigitizedObjectRecord;

    const TAG: ProviderTag = ProviderTag::Gallica;

    fn build_fetch_url(&self, identifier: &Identifier) -> Result<String> {
        Ok(format!("{}/manifest.json", self.build_images_url(identifier)?))
    }

    fn normalize(&self, document: &Value) -> Result<DigitizedObjectRecord> {
        let manifest: RawManifest = serde_path_to_error::deserialize(document)
            .map_err(|e| shape_error(Self::TAG, e))?;

        let related = required(manifest.related, "related")?;
        let metadata = Metadata(required(manifest.metadata, "metadata")?);

        Ok(DigitizedObjectRecord {
            identifier: related
                .strip_prefix(HOST_URL)
                .unwrap_or(related.as_str())
                .to_string(),
            manifest_url: required(manifest.id, "@id")?,
            description: required(manifest.description, "description")?,
            repository: metadata.find_map("Repository", |v| {
                MetadataValue::from_json(v).filter(|value| !value.is_empty())
            }),
            digitised_by: metadata.value("Digitised by"),
            source_images: metadata.value("Source Images"),
            metadata_source: metadata.value("Metadata Source"),
            shelfmark: metadata.value("Shelfmark"),
            title: metadata.value("Title"),
            date: metadata.find_map("Date", single_date),
            language: metadata.value("Language"),
            format: metadata.format()?,
            catalogue_notice: metadata.relation(CATALOGUE_NOTICE_PREFIX),
            work_notice: metadata.relation(WORK_NOTICE_PREFIX),
            ensemble_notice: metadata.relation(ENSEMBLE_NOTICE_PREFIX),
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    related: Option<String>,
    #[serde(rename = "@id")]
    id: Option<String>,
    description: Option<String>,
    metadata: Option<Vec<MetadataEntry>>,
}

#[derive(Debug, Deserialize)]
struct MetadataEntry {
    #[serde(default)]
    label: Value,
    #[serde(default)]
    value: Value,
}

struct Metadata(Vec<MetadataEntry>);

impl Metadata {
    /// First entry labelled `label` whose value `extract` accepts.
    fn find_map<T>(&self, label: &str, extract: impl Fn(&Value) -> Option<T>) -> Option<T> {
        self.0
            .iter()
            .filter(|entry| entry.label.as_str() == Some(label))
            .find_map(|entry| extract(&entry.value))
    }

    /// Value of the first entry labelled `label`, if its shape is recognized.
    fn value(&self, label: &str) -> Option<MetadataValue> {
        self.entry(label).and_then(MetadataValue::from_json)
    }

    fn entry(&self, label: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|entry| entry.label.as_str() == Some(label))
            .map(|entry| &entry.value)
    }

    /// Relation entries carry notices as `"<prefix><reference>"`.
    fn relation(&self, prefix: &str) -> Option<String> {
        self.find_map("Relation", |v| {
            v.as_str()
                .and_then(|s| s.strip_prefix(prefix))
                .map(str::to_string)
        })
    }

    fn format(&self) -> Result<MetadataValue> {
        let raw = self.entry("Format").ok_or_else(|| {
            AppError::normalization(ProviderTag::Gallica, "format", "no Format entry")
        })?;
        MetadataValue::from_json(raw).ok_or_else(|| {
            AppError::normalization(
                ProviderTag::Gallica,
                "format",
                format!("unrecognized Format value: {raw}"),
            )
        })
    }
}

/// Dates given as a list of several values are estimates and are skipped.
fn single_date(value: &Value) -> Option<MetadataValue> {
    MetadataValue::from_json(value).filter(|date| date.as_scalar().is_some() || date.len() == 1)
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| AppError::normalization(ProviderTag::Gallica, field, "missing required field"))
}
