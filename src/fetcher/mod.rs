pub mod http_fetcher;
pub mod opds_fetcher;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::app::{QuireError, Result};
use crate::domain::{AdminConfig, DownloadRequest, FeedDocument};

/// Source of catalog documents.
///
/// Implementations surface 401/403 as [`QuireError::AccessDenied`], a
/// response without entries as [`QuireError::EmptyResult`] and every other
/// failure as a load failure. They never touch controller state.
#[async_trait]
pub trait Fetcher {
    /// Load a catalog document. `url = None` means the root catalog.
    async fn fetch_feed(&self, url: Option<&str>, uid: Option<&str>) -> Result<FeedDocument>;

    async fn search(&self, query: &str) -> Result<FeedDocument>;

    async fn fetch_admin_config(&self, uid: Option<&str>) -> Result<AdminConfig>;

    async fn request_download(&self, request: &DownloadRequest) -> Result<()>;
}

/// Map a non-success status onto the error taxonomy.
pub(crate) fn check_status(status: StatusCode, url: &str) -> Result<()> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(QuireError::AccessDenied);
    }
    if !status.is_success() {
        return Err(QuireError::LoadFailed(format!("{} returned {}", url, status)));
    }
    Ok(())
}
