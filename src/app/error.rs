use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuireError {
    #[error("Access denied: this catalog is restricted for the current user")]
    AccessDenied,

    #[error("Failed to load catalog: {0}")]
    LoadFailed(String),

    #[error("Catalog response contained no entries")]
    EmptyResult,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("{0}")]
    Other(String),
}

/// How a failure is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 401/403 from the catalog. Not retryable without an entitlement change.
    AccessDenied,
    /// Well-formed response without entries.
    EmptyResult,
    /// Everything else.
    LoadFailed,
}

impl QuireError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuireError::AccessDenied => ErrorKind::AccessDenied,
            QuireError::EmptyResult => ErrorKind::EmptyResult,
            _ => ErrorKind::LoadFailed,
        }
    }
}

pub type Result<T> = std::result::Result<T, QuireError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_folds_transport_errors_into_load_failed() {
        assert_eq!(QuireError::AccessDenied.kind(), ErrorKind::AccessDenied);
        assert_eq!(QuireError::EmptyResult.kind(), ErrorKind::EmptyResult);
        assert_eq!(QuireError::LoadFailed("502".into()).kind(), ErrorKind::LoadFailed);
        assert_eq!(QuireError::FeedParse("bad xml".into()).kind(), ErrorKind::LoadFailed);

        let io = std::io::Error::other("reset");
        assert_eq!(QuireError::from(io).kind(), ErrorKind::LoadFailed);
    }
}
