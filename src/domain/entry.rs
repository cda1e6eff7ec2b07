use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::link::Link;

/// One catalog entry: either a sub-catalog to descend into or a book.
///
/// Entries are plain data. Whether an entry is a navigation or acquisition
/// node is recomputed from `links` on every call and never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

impl Entry {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// Generate a deterministic ID for entries whose source omitted one
    pub fn generate_id(feed_url: &str, entry_key: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(feed_url.as_bytes());
        hasher.update(entry_key.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    pub fn is_navigation(&self) -> bool {
        self.links.iter().any(Link::marks_navigation)
    }

    pub fn is_acquisition(&self) -> bool {
        self.links.iter().any(Link::is_acquisition)
    }

    pub fn acquisition_href(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.is_acquisition())
            .map(|l| l.href.as_str())
            .filter(|href| !href.is_empty())
    }

    pub fn navigation_href(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.is_navigable())
            .map(|l| l.href.as_str())
            .filter(|href| !href.is_empty())
    }

    pub fn kind(&self) -> EntryKind {
        if self.is_navigation() {
            EntryKind::Navigation
        } else if self.is_acquisition() {
            EntryKind::Acquisition
        } else {
            EntryKind::Other
        }
    }
}

/// Classification of an entry, navigation checked first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Navigation,
    Acquisition,
    Other,
}
