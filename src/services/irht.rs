// src/services/irht.rs

//! IRHT manuscript API client and normalizer.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{Identifier, ManuscriptRecord, ProviderTag, Reproduction};
use crate::services::{ManuscriptApi, resolver, shape_error};

const API_HOST: &str = "https://api.irht.cnrs.fr/";
const MANUSCRIPTS_ENDPOINT: &str = "https://api.irht.cnrs.fr/manuscripts/";
const REPRODUCTIONS_ENDPOINT: &str = "https://api.irht.cnrs.fr/reproductions/";
const NOTICE_BASE: &str = "https://arca.irht.cnrs.fr/";
const FETCH_QUERY: &str = "?mode=medium";

const COMPLETE_SUBJECT: &str = "intégral";
const DEAF_SOURCE: &str = "DEAF";
const DEAF_MARKER: &str = ".php#";

/// Client for the IRHT manuscripts endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct Irht;

impl ManuscriptApi for Irht {
    type Record = ManuscriptRecord;

    const TAG: ProviderTag = ProviderTag::Irht;

    fn build_fetch_url(&self, identifier: &Identifier) -> Result<String> {
        let ark = resolver::ensure_provider(identifier, Self::TAG)?;
        Ok(format!("{MANUSCRIPTS_ENDPOINT}{ark}{FETCH_QUERY}"))
    }

    fn normalize(&self, document: &Value) -> Result<ManuscriptRecord> {
        let raw: RawManuscript = serde_path_to_error::deserialize(document)
            .map_err(|e| shape_error(Self::TAG, e))?;

        let id = required(raw.id, "id")?;
        let href = required(raw.href, "href")?;
        let ark_href = required(raw.ark_href, "ark_href")?;
        let identifier = strip_endpoint(&ark_href, MANUSCRIPTS_ENDPOINT);

        let complete_reproduction = select_complete_reproduction(raw.reproductions.as_deref())
            .map(|(index, reproduction)| reproduction.normalize(index))
            .transpose()?;

        Ok(ManuscriptRecord {
            id,
            href,
            notice_url: format!("{NOTICE_BASE}{identifier}"),
            identifier,
            ark_href,
            shelfmark: raw.shelfmark.and_then(|s| s.identifier),
            support: raw.support,
            content: raw.content,
            dimensions: raw.dimensions,
            nbpage: raw.nbpage.map(TextOrNumber::into_text),
            dating: raw.dating,
            alt_shelfmarks: raw
                .alt_shelfmarks
                .unwrap_or_default()
                .into_iter()
                .filter_map(|s| s.identifier)
                .collect(),
            illustrations: trimmed_names(raw.illustrations),
            languages: trimmed_names(raw.languages),
            related_links: raw
                .related_links
                .unwrap_or_default()
                .iter()
                .map(RawLink::reference)
                .collect(),
            complete_reproduction,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawManuscript {
    id: Option<i64>,
    href: Option<String>,
    ark_href: Option<String>,
    shelfmark: Option<RawShelfmark>,
    support: Option<String>,
    content: Option<String>,
    dimensions: Option<String>,
    nbpage: Option<TextOrNumber>,
    dating: Option<String>,
    alt_shelfmarks: Option<Vec<RawShelfmark>>,
    illustrations: Option<Vec<RawNamed>>,
    languages: Option<Vec<RawNamed>>,
    related_links: Option<Vec<RawLink>>,
    reproductions: Option<Vec<RawReproduction>>,
}

#[derive(Debug, Deserialize)]
struct RawShelfmark {
    identifier: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawNamed {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    title: String,
    href: String,
}

impl RawLink {
    /// `SOURCE:reference`; DEAF links keep only the anchor after `.php#`.
    fn reference(&self) -> String {
        if self.title == DEAF_SOURCE {
            let reference = self
                .href
                .rsplit_once(DEAF_MARKER)
                .map_or(self.href.as_str(), |(_, anchor)| anchor);
            format!("{DEAF_SOURCE}:{reference}")
        } else {
            format!("{}:{}", self.title, self.href)
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawReproduction {
    subject: Option<String>,
    manifest_url: Option<String>,
    ark_href: Option<String>,
}

impl RawReproduction {
    fn is_complete(&self) -> bool {
        self.subject.as_deref() == Some(COMPLETE_SUBJECT)
    }

    fn has_manifest(&self) -> bool {
        self.manifest_url.as_deref().is_some_and(|url| !url.is_empty())
    }

    fn normalize(&self, index: usize) -> Result<Reproduction> {
        let ark_href = self.ark_href.clone().ok_or_else(|| {
            AppError::normalization(
                ProviderTag::Irht,
                format!("reproductions[{index}].ark_href"),
                "missing required field",
            )
        })?;
        Ok(Reproduction {
            identifier: strip_endpoint(&ark_href, REPRODUCTIONS_ENDPOINT),
            ark_href,
            manifest_url: self.manifest_url.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    fn into_text(self) -> String {
        match self {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(number) => number.to_string(),
        }
    }
}

/// Pick the complete reproduction, preferring one that has a IIIF manifest.
///
/// Falls back to the first complete reproduction without a manifest, then to
/// none. Returns the entry with its position in the list.
fn select_complete_reproduction(
    reproductions: Option<&[RawReproduction]>,
) -> Option<(usize, &RawReproduction)> {
    let reproductions = reproductions?;
    let complete = || {
        reproductions
            .iter()
            .enumerate()
            .filter(|(_, reproduction)| reproduction.is_complete())
    };
    complete()
        .find(|(_, reproduction)| reproduction.has_manifest())
        .or_else(|| complete().next())
}

fn strip_endpoint(ark_href: &str, endpoint: &str) -> String {
    ark_href
        .strip_prefix(endpoint)
        .or_else(|| ark_href.strip_prefix(API_HOST))
        .unwrap_or(ark_href)
        .to_string()
}

fn trimmed_names(names: Option<Vec<RawNamed>>) -> Vec<String> {
    names
        .unwrap_or_default()
        .into_iter()
        .map(|named| named.name.trim().to_string())
        .collect()
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| AppError::normalization(ProviderTag::Irht, field, "missing required field"))
}
