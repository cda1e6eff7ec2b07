use serde::{Deserialize, Serialize};

use super::entry::Entry;
use super::link::Link;
use crate::app::{QuireError, Result};

/// A loaded catalog page: title, entries and document-level links.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeedDocument {
    pub title: Option<String>,
    pub entries: Vec<Entry>,
    pub links: Vec<Link>,
}

impl FeedDocument {
    pub fn new(title: Option<&str>, entries: Vec<Entry>) -> Self {
        Self {
            title: title.map(String::from),
            entries,
            links: Vec::new(),
        }
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    pub fn next_page_url(&self) -> Option<String> {
        self.links
            .iter()
            .find(|l| l.is_next_page())
            .map(|l| l.href.clone())
            .filter(|href| !href.is_empty())
    }

    pub fn prev_page_url(&self) -> Option<String> {
        self.links
            .iter()
            .find(|l| l.is_previous_page())
            .map(|l| l.href.clone())
            .filter(|href| !href.is_empty())
    }
}

/// Wire form of a feed as served by the backend.
///
/// `entries` stays optional here so that a response without it can be told
/// apart from an empty list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeed {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub entries: Option<Vec<Entry>>,
    #[serde(default)]
    pub links: Option<Vec<Link>>,
}

impl RawFeed {
    pub fn into_document(self) -> Result<FeedDocument> {
        let entries = self.entries.ok_or(QuireError::EmptyResult)?;
        Ok(FeedDocument {
            title: self.title,
            entries,
            links: self.links.unwrap_or_default(),
        })
    }
}
