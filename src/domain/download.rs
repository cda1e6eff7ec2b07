use serde::Serialize;

/// Body of a download/forward request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadRequest {
    pub title: String,
    pub author: Option<String>,
    pub download_url: String,
    pub cover_url: Option<String>,
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_chat_id: Option<String>,
}
