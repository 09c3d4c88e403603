//! Gallica digitized object record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A metadata value that Gallica sends either as one string or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Scalar(String),
    List(Vec<String>),
}

impl MetadataValue {
    /// Read a raw metadata value.
    ///
    /// Lists may hold plain strings or IIIF language maps (`{"@value": ...}`).
    /// Returns `None` for any other shape.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Scalar(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(list_item)
                .collect::<Option<Vec<_>>>()
                .map(Self::List),
            _ => None,
        }
    }

    /// True for `""` and `[]`.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }

    /// Number of values carried.
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::List(items) => items.len(),
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }
}

fn list_item(item: &Value) -> Option<String> {
    match item {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("@value").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

/// Normalized metadata of a Gallica IIIF manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitizedObjectRecord {
    /// ARK of the digitized document
    pub identifier: String,
    pub manifest_url: String,
    pub description: String,
    pub repository: Option<MetadataValue>,
    pub digitised_by: Option<MetadataValue>,
    pub source_images: Option<MetadataValue>,
    pub metadata_source: Option<MetadataValue>,
    pub shelfmark: Option<MetadataValue>,
    pub title: Option<MetadataValue>,
    /// Only single-valued dates are kept
    pub date: Option<MetadataValue>,
    pub language: Option<MetadataValue>,
    pub format: MetadataValue,
    pub catalogue_notice: Option<String>,
    pub work_notice: Option<String>,
    pub ensemble_notice: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_strings_and_language_maps() {
        assert_eq!(
            MetadataValue::from_json(&json!("lat")),
            Some(MetadataValue::Scalar("lat".into()))
        );
        assert_eq!(
            MetadataValue::from_json(&json!(["a", {"@value": "b", "@language": "fr"}])),
            Some(MetadataValue::List(vec!["a".into(), "b".into()]))
        );
        assert_eq!(MetadataValue::from_json(&json!(12)), None);
        assert_eq!(MetadataValue::from_json(&json!([{"label": "x"}])), None);
    }

    #[test]
    fn serializes_untagged_with_explicit_nulls() {
        let value = serde_json::to_value(MetadataValue::List(vec!["1300".into()])).unwrap();
        assert_eq!(value, json!(["1300"]));

        let record = DigitizedObjectRecord {
            identifier: "ark:/12148/x".into(),
            manifest_url: "m".into(),
            description: "d".into(),
            repository: None,
            digitised_by: None,
            source_images: None,
            metadata_source: None,
            shelfmark: None,
            title: None,
            date: None,
            language: None,
            format: "f".into(),
            catalogue_notice: None,
            work_notice: None,
            ensemble_notice: None,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["repository"], Value::Null);
        assert!(value.as_object().unwrap().contains_key("ensemble_notice"));
        assert_eq!(value["format"], json!("f"));
    }
}
