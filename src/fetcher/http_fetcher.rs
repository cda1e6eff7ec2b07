use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use url::Url;

use crate::app::{QuireError, Result};
use crate::config::BackendConfig;
use crate::domain::{AdminConfig, DownloadRequest, FeedDocument, RawFeed};
use crate::fetcher::{check_status, Fetcher};

/// Fetcher backed by the mini-app's JSON API.
///
/// The host-issued session token is forwarded verbatim on every request; it
/// is never parsed or validated here.
pub struct HttpFetcher {
    client: Client,
    base: Url,
}

impl HttpFetcher {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.session_token {
            let name = HeaderName::from_bytes(config.session_header.as_bytes())
                .map_err(|e| QuireError::Config(format!("invalid session header: {}", e)))?;
            let value = HeaderValue::from_str(token)
                .map_err(|e| QuireError::Config(format!("invalid session token: {}", e)))?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("quire/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base: parse_base(&config.base_url)?,
        })
    }

    pub(crate) fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    pub(crate) fn feed_endpoint(&self, url: Option<&str>, uid: Option<&str>) -> Result<Url> {
        let mut query = Vec::new();
        if let Some(url) = url {
            query.push(("url", url));
        }
        if let Some(uid) = uid {
            query.push(("uid", uid));
        }
        self.endpoint("feed", &query)
    }

    async fn get_feed(&self, endpoint: Url) -> Result<FeedDocument> {
        tracing::debug!("GET {}", endpoint);
        let response = self.client.get(endpoint.clone()).send().await?;
        check_status(response.status(), endpoint.as_str())?;

        let raw: RawFeed = response.json().await?;
        raw.into_document()
    }
}

/// Parse the API base, forcing a trailing slash so endpoint joins append to
/// the path instead of replacing its last segment.
fn parse_base(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_feed(&self, url: Option<&str>, uid: Option<&str>) -> Result<FeedDocument> {
        let endpoint = self.feed_endpoint(url, uid)?;
        self.get_feed(endpoint).await
    }

    async fn search(&self, query: &str) -> Result<FeedDocument> {
        let endpoint = self.endpoint("search", &[("q", query)])?;
        self.get_feed(endpoint).await
    }

    async fn fetch_admin_config(&self, uid: Option<&str>) -> Result<AdminConfig> {
        let query: Vec<(&str, &str)> = uid.map(|uid| ("uid", uid)).into_iter().collect();
        let endpoint = self.endpoint("config", &query)?;

        let response = self.client.get(endpoint.clone()).send().await?;
        check_status(response.status(), endpoint.as_str())?;
        Ok(response.json().await?)
    }

    async fn request_download(&self, request: &DownloadRequest) -> Result<()> {
        let endpoint = self.endpoint("download", &[])?;
        let response = self.client.post(endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuireError::Download(format!("backend returned {}", status)));
        }

        tracing::info!("Download queued for \"{}\"", request.title);
        Ok(())
    }
}
