//! IRHT manuscript record.

use serde::{Deserialize, Serialize};

/// The complete reproduction chosen for a manuscript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reproduction {
    pub ark_href: String,
    /// ARK of the reproduction
    pub identifier: String,
    pub manifest_url: Option<String>,
}

/// Normalized manuscript description from the IRHT API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManuscriptRecord {
    /// Internal IRHT id
    pub id: i64,
    pub href: String,
    pub ark_href: String,
    /// ARK of the manuscript
    pub identifier: String,
    /// Public Arca page for the manuscript
    pub notice_url: String,
    pub shelfmark: Option<String>,
    pub support: Option<String>,
    pub content: Option<String>,
    pub dimensions: Option<String>,
    pub nbpage: Option<String>,
    pub dating: Option<String>,
    pub alt_shelfmarks: Vec<String>,
    pub illustrations: Vec<String>,
    pub languages: Vec<String>,
    /// `SOURCE:reference` strings
    pub related_links: Vec<String>,
    pub complete_reproduction: Option<Reproduction>,
}
