use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::form_urlencoded;

use crate::app::{QuireError, Result};
use crate::domain::{AdminConfig, DownloadRequest, FeedDocument};
use crate::fetcher::{check_status, Fetcher};
use crate::normalizer::Normalizer;

/// Placeholder substituted in OpenSearch-style templates.
pub const SEARCH_TERMS: &str = "{searchTerms}";

/// Fetcher that reads an OPDS catalog directly, without the backend.
///
/// There is no privileged mode here and downloads land on disk instead of
/// being forwarded to a chat.
pub struct OpdsFetcher {
    client: Client,
    root_url: String,
    search_template: Option<String>,
    download_dir: PathBuf,
    normalizer: Normalizer,
}

impl OpdsFetcher {
    pub fn new(
        root_url: String,
        search_template: Option<String>,
        download_dir: PathBuf,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("quire/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            root_url,
            search_template,
            download_dir,
            normalizer: Normalizer::new(),
        })
    }

    pub(crate) fn search_url(&self, query: &str) -> Result<String> {
        let template = self
            .search_template
            .as_deref()
            .ok_or_else(|| QuireError::Config("no search_template configured".into()))?;
        let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
        Ok(template.replace(SEARCH_TERMS, &encoded))
    }

    async fn get_document(&self, url: &str) -> Result<FeedDocument> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        check_status(response.status(), url)?;

        let body = response.bytes().await?;
        self.normalizer.normalize(url, &body)
    }
}

/// File name for a downloaded book, derived from its title.
pub(crate) fn book_file_name(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim();
    if stem.is_empty() {
        "book.epub".to_string()
    } else {
        format!("{}.epub", stem)
    }
}

async fn write_book(dir: &Path, title: &str, bytes: &[u8]) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(book_file_name(title));
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}

#[async_trait]
impl Fetcher for OpdsFetcher {
    async fn fetch_feed(&self, url: Option<&str>, _uid: Option<&str>) -> Result<FeedDocument> {
        self.get_document(url.unwrap_or(&self.root_url)).await
    }

    async fn search(&self, query: &str) -> Result<FeedDocument> {
        let url = self.search_url(query)?;
        self.get_document(&url).await
    }

    async fn fetch_admin_config(&self, _uid: Option<&str>) -> Result<AdminConfig> {
        Ok(AdminConfig::default())
    }

    async fn request_download(&self, request: &DownloadRequest) -> Result<()> {
        if let Some(target) = &request.target_chat_id {
            tracing::warn!("Ignoring forward target {} for a local download", target);
        }

        let response = self.client.get(&request.download_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(QuireError::Download(format!(
                "{} returned {}",
                request.download_url, status
            )));
        }

        let bytes = response.bytes().await?;
        let path = write_book(&self.download_dir, &request.title, &bytes).await?;
        tracing::info!("Saved \"{}\" to {}", request.title, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher(template: Option<&str>) -> OpdsFetcher {
        OpdsFetcher::new(
            "https://cat.example.com/opds".to_string(),
            template.map(String::from),
            PathBuf::from("/tmp"),
            5,
        )
        .unwrap()
    }

    #[test]
    fn test_search_url_substitutes_terms() {
        let f = fetcher(Some("https://cat.example.com/opds/search?q={searchTerms}"));
        assert_eq!(
            f.search_url("dune & co").unwrap(),
            "https://cat.example.com/opds/search?q=dune+%26+co"
        );
    }

    #[test]
    fn test_search_without_template_is_config_error() {
        let f = fetcher(None);
        assert!(matches!(f.search_url("dune"), Err(QuireError::Config(_))));
    }

    #[test]
    fn test_book_file_name() {
        assert_eq!(book_file_name("Dune"), "Dune.epub");
        assert_eq!(book_file_name("Dune: Messiah/2"), "Dune_ Messiah_2.epub");
        assert_eq!(book_file_name("  "), "book.epub");
    }

    #[tokio::test]
    async fn test_write_book_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("books");
        let path = write_book(&target, "Dune", b"PK").await.unwrap();
        assert_eq!(path, target.join("Dune.epub"));
        assert_eq!(std::fs::read(path).unwrap(), b"PK");
    }
}
