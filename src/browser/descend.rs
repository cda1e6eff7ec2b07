use crate::app::Result;
use crate::domain::{Entry, FeedDocument};
use crate::fetcher::Fetcher;

/// Depth at which auto-descend stops. Server page turns load with this
/// depth so a fetched page is shown as-is.
pub const MAX_AUTO_DEPTH: u8 = 2;

/// Title fragments that mark the hub entry worth following.
const PREFERRED_TITLES: [&str; 3] = ["librar", "biblioteca", "zeepub"];

/// Href to follow automatically from `doc`, if any.
///
/// Only navigation entries are candidates. Among them the first whose title
/// looks like the library hub wins, else the first in document order. An
/// entry without an extractable href stops the descent.
pub fn descend_target(doc: &FeedDocument) -> Option<String> {
    let navigation: Vec<&Entry> = doc.entries.iter().filter(|e| e.is_navigation()).collect();

    let target = navigation
        .iter()
        .find(|e| {
            let title = e.title.to_lowercase();
            PREFERRED_TITLES.iter().any(|marker| title.contains(marker))
        })
        .or_else(|| navigation.first())?;

    target.navigation_href().map(String::from)
}

/// Follow hub pages until real content, at most [`MAX_AUTO_DEPTH`] hops.
///
/// Returns the document to present and the depth it was found at. A failed
/// hop fails the whole load.
pub async fn resolve(
    fetcher: &(dyn Fetcher + Send + Sync),
    mut doc: FeedDocument,
    mut depth: u8,
    uid: Option<&str>,
) -> Result<(FeedDocument, u8)> {
    while depth < MAX_AUTO_DEPTH {
        let Some(href) = descend_target(&doc) else {
            break;
        };
        tracing::debug!("Auto-descending into {} (depth {})", href, depth + 1);
        doc = fetcher.fetch_feed(Some(&href), uid).await?;
        depth += 1;
    }
    Ok((doc, depth))
}

/// Load `url` and run auto-descend from `depth`.
pub async fn load_and_resolve(
    fetcher: &(dyn Fetcher + Send + Sync),
    url: Option<&str>,
    depth: u8,
    uid: Option<&str>,
) -> Result<(FeedDocument, u8)> {
    let doc = fetcher.fetch_feed(url, uid).await?;
    resolve(fetcher, doc, depth, uid).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Link, ACQUISITION_REL};
    use crate::testing::MockFetcher;
    use tokio_test::{assert_err, assert_ok};

    fn nav(title: &str, href: &str) -> Entry {
        Entry::new(href, title).with_link(Link::new("subsection", None, href))
    }

    fn book(title: &str) -> Entry {
        Entry::new(title, title).with_link(Link::new(ACQUISITION_REL, None, "/dl"))
    }

    #[test]
    fn test_prefers_library_title() {
        let doc = FeedDocument::new(
            Some("Root"),
            vec![nav("Recent", "/recent"), nav("All Libraries", "/libraries")],
        );
        assert_eq!(descend_target(&doc).as_deref(), Some("/libraries"));

        let doc = FeedDocument::new(
            Some("Root"),
            vec![nav("Recent", "/recent"), nav("Library", "/library")],
        );
        assert_eq!(descend_target(&doc).as_deref(), Some("/library"));
    }

    #[test]
    fn test_preference_is_case_insensitive() {
        let doc = FeedDocument::new(
            Some("Root"),
            vec![nav("Series", "/series"), nav("ZeePubs [ES]", "/zeepubs")],
        );
        assert_eq!(descend_target(&doc).as_deref(), Some("/zeepubs"));

        let doc = FeedDocument::new(None, vec![nav("Todas las Bibliotecas", "/bib")]);
        assert_eq!(descend_target(&doc).as_deref(), Some("/bib"));
    }

    #[test]
    fn test_falls_back_to_first_navigation_entry() {
        let doc = FeedDocument::new(
            Some("Root"),
            vec![book("Dune"), nav("Authors", "/authors"), nav("Series", "/series")],
        );
        assert_eq!(descend_target(&doc).as_deref(), Some("/authors"));
    }

    #[test]
    fn test_no_target_without_navigation_entries() {
        assert_eq!(descend_target(&FeedDocument::default()), None);
        let doc = FeedDocument::new(Some("Books"), vec![book("Dune")]);
        assert_eq!(descend_target(&doc), None);
    }

    #[test]
    fn test_fails_open_without_href() {
        let broken = Entry::new("x", "Library").with_link(Link::new("subsection", None, ""));
        let doc = FeedDocument::new(None, vec![broken, nav("Other", "/other")]);
        assert_eq!(descend_target(&doc), None);
    }

    #[tokio::test]
    async fn test_resolve_never_passes_depth_two() {
        let mut fetcher = MockFetcher::new();
        for level in 0..5 {
            let doc = FeedDocument::new(
                Some(&format!("Level {}", level)),
                vec![nav("Next level", &format!("/level/{}", level + 1))],
            );
            fetcher.add_feed(Some(&format!("/level/{}", level)), doc);
        }

        let (doc, depth) = assert_ok!(load_and_resolve(&fetcher, Some("/level/0"), 0, None).await);

        assert_eq!(depth, MAX_AUTO_DEPTH);
        assert_eq!(doc.title.as_deref(), Some("Level 2"));
        assert_eq!(fetcher.calls(), vec!["feed:/level/0", "feed:/level/1", "feed:/level/2"]);
    }

    #[tokio::test]
    async fn test_resolve_with_sentinel_depth_does_not_descend() {
        let mut fetcher = MockFetcher::new();
        fetcher.add_feed(
            Some("/feed?page=2"),
            FeedDocument::new(Some("Page 2"), vec![nav("Library", "/lib")]),
        );

        let (doc, depth) = load_and_resolve(&fetcher, Some("/feed?page=2"), MAX_AUTO_DEPTH, None)
            .await
            .unwrap();

        assert_eq!(depth, MAX_AUTO_DEPTH);
        assert_eq!(doc.title.as_deref(), Some("Page 2"));
        assert_eq!(fetcher.calls(), vec!["feed:/feed?page=2"]);
    }

    #[tokio::test]
    async fn test_failed_hop_fails_the_load() {
        let mut fetcher = MockFetcher::new();
        fetcher.add_feed(None, FeedDocument::new(Some("Root"), vec![nav("Library", "/lib")]));
        fetcher.deny_feed(Some("/lib"));

        let err = assert_err!(load_and_resolve(&fetcher, None, 0, None).await);
        assert_eq!(err.kind(), crate::app::ErrorKind::AccessDenied);
    }
}
