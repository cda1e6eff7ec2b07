use feed_rs::model;
use feed_rs::parser;
use html_escape::decode_html_entities;
use url::Url;

use crate::app::{QuireError, Result};
use crate::domain::{Entry, FeedDocument, Link};

const OPDS_IMAGE_REL: &str = "http://opds-spec.org/image";

/// Converts OPDS Atom catalogs into [`FeedDocument`]s.
///
/// Produces the same shape the backend serves: absolute hrefs, a detected
/// cover URL, first author, entity-decoded text.
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, feed_url: &str, body: &[u8]) -> Result<FeedDocument> {
        let feed = parser::parse(body).map_err(|e| QuireError::FeedParse(e.to_string()))?;
        let base = Url::parse(feed_url).ok();

        let entries = feed
            .entries
            .into_iter()
            .map(|entry| self.normalize_entry(feed_url, base.as_ref(), entry))
            .collect();

        Ok(FeedDocument {
            title: feed.title.map(|t| decode_html_entities(&t.content).to_string()),
            entries,
            links: feed
                .links
                .iter()
                .map(|l| convert_link(base.as_ref(), l))
                .collect(),
        })
    }

    fn normalize_entry(&self, feed_url: &str, base: Option<&Url>, entry: model::Entry) -> Entry {
        let links: Vec<Link> = entry.links.iter().map(|l| convert_link(base, l)).collect();

        let id = if entry.id.is_empty() {
            let key = links.first().map(|l| l.href.as_str()).unwrap_or_default();
            Entry::generate_id(feed_url, key)
        } else {
            entry.id
        };

        let summary = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body))
            .map(|s| decode_html_entities(&s).to_string());

        Entry {
            id,
            title: entry
                .title
                .map(|t| decode_html_entities(&t.content).to_string())
                .unwrap_or_default(),
            summary,
            cover_url: find_cover(&links),
            author: entry.authors.first().map(|a| a.name.clone()),
            links,
            updated: entry.updated.or(entry.published),
        }
    }
}

fn convert_link(base: Option<&Url>, link: &model::Link) -> Link {
    Link {
        rel: link.rel.clone().unwrap_or_default(),
        media_type: link.media_type.clone(),
        href: absolutize(base, &link.href),
    }
}

/// Resolve a possibly relative href against the document URL.
fn absolutize(base: Option<&Url>, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    base.and_then(|b| b.join(href).ok())
        .map(String::from)
        .unwrap_or_else(|| href.to_string())
}

fn find_cover(links: &[Link]) -> Option<String> {
    links
        .iter()
        .find(|l| {
            l.media_type.as_deref().is_some_and(|t| t.contains("image"))
                || l.rel.contains("cover")
                || l.rel == OPDS_IMAGE_REL
        })
        .map(|l| l.href.clone())
}
