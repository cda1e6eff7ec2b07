use serde::{Deserialize, Deserializer, Serialize};

/// Relation used by OPDS for a direct acquisition (download) link.
pub const ACQUISITION_REL: &str = "http://opds-spec.org/acquisition";

pub const SUBSECTION_REL: &str = "subsection";

/// A typed hyperlink attached to an entry or to a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub rel: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub href: String,
}

impl Link {
    pub fn new(rel: impl Into<String>, media_type: Option<&str>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            media_type: media_type.map(String::from),
            href: href.into(),
        }
    }

    fn type_contains(&self, marker: &str) -> bool {
        self.media_type
            .as_deref()
            .is_some_and(|t| t.contains(marker))
    }

    /// Link that makes its entry a navigation node.
    pub fn marks_navigation(&self) -> bool {
        self.rel == SUBSECTION_REL
            || (self.type_contains("opds-catalog") && self.type_contains("navigation"))
    }

    /// Link that can be followed to descend into a sub-catalog.
    ///
    /// Looser than [`Link::marks_navigation`]: any catalog media type
    /// qualifies, acquisition feeds included.
    pub fn is_navigable(&self) -> bool {
        self.rel == SUBSECTION_REL || self.type_contains("opds-catalog")
    }

    pub fn is_acquisition(&self) -> bool {
        self.rel == ACQUISITION_REL || self.type_contains("epub")
    }

    // Pagination relations are matched by substring so compound values such
    // as "next http://..." still count.
    pub fn is_next_page(&self) -> bool {
        self.rel.contains("next")
    }

    pub fn is_previous_page(&self) -> bool {
        self.rel.contains("previous") || self.rel.contains("prev")
    }
}

/// The backend serializes missing relations and hrefs as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subsection_marks_navigation() {
        let link = Link::new("subsection", None, "/opds/libraries");
        assert!(link.marks_navigation());
        assert!(link.is_navigable());
        assert!(!link.is_acquisition());
    }

    #[test]
    fn test_navigation_type_needs_both_markers() {
        let nav = Link::new(
            "related",
            Some("application/atom+xml;profile=opds-catalog;kind=navigation"),
            "/a",
        );
        assert!(nav.marks_navigation());

        let acq_feed = Link::new(
            "related",
            Some("application/atom+xml;profile=opds-catalog;kind=acquisition"),
            "/b",
        );
        assert!(!acq_feed.marks_navigation());
        assert!(acq_feed.is_navigable());
    }

    #[test]
    fn test_acquisition_by_rel_or_type() {
        assert!(Link::new(ACQUISITION_REL, None, "/dl").is_acquisition());
        assert!(Link::new("alternate", Some("application/epub+zip"), "/dl").is_acquisition());
        assert!(!Link::new("http://opds-spec.org/acquisition/borrow", None, "/dl").is_acquisition());
    }

    #[test]
    fn test_pagination_rel_substring_match() {
        assert!(Link::new("next", None, "/p2").is_next_page());
        assert!(Link::new("http://opds-spec.org/next", None, "/p2").is_next_page());
        assert!(Link::new("previous", None, "/p0").is_previous_page());
        assert!(Link::new("prev", None, "/p0").is_previous_page());
        assert!(!Link::new("self", None, "/p1").is_next_page());
    }

    #[test]
    fn test_deserialize_null_fields() {
        let link: Link =
            serde_json::from_str(r#"{"rel": null, "type": null, "href": null}"#).unwrap();
        assert_eq!(link.rel, "");
        assert_eq!(link.media_type, None);
        assert_eq!(link.href, "");
    }

    #[test]
    fn test_deserialize_type_field() {
        let link: Link = serde_json::from_str(
            r#"{"rel": "subsection", "type": "application/atom+xml", "href": "/x"}"#,
        )
        .unwrap();
        assert_eq!(link.media_type.as_deref(), Some("application/atom+xml"));
    }
}
