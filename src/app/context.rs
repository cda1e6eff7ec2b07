use std::sync::Arc;

use crate::app::error::{QuireError, Result};
use crate::browser::Browser;
use crate::config::{CatalogMode, Config};
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::opds_fetcher::OpdsFetcher;
use crate::fetcher::Fetcher;
use crate::host::HostChrome;

pub struct AppContext {
    pub config: Config,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = Self::build_fetcher(&config)?;
        Ok(Self { config, fetcher })
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self { config, fetcher }
    }

    fn build_fetcher(config: &Config) -> Result<Arc<dyn Fetcher + Send + Sync>> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = match config.catalog.mode {
            CatalogMode::Backend => {
                tracing::debug!("Using catalog backend at {}", config.backend.base_url);
                Arc::new(HttpFetcher::new(&config.backend)?)
            }
            CatalogMode::Opds => {
                let root_url = config.catalog.root_url.clone().ok_or_else(|| {
                    QuireError::Config("catalog.root_url is required in opds mode".into())
                })?;
                tracing::debug!("Reading OPDS catalog directly from {}", root_url);
                Arc::new(OpdsFetcher::new(
                    root_url,
                    config.catalog.search_template.clone(),
                    config.catalog.effective_download_dir(),
                    config.backend.timeout_secs,
                )?)
            }
        };
        Ok(fetcher)
    }

    pub fn uid(&self) -> Option<String> {
        self.config.session.uid.clone()
    }

    /// Fresh controller bound to `host`.
    pub fn browser(&self, host: Arc<dyn HostChrome + Send + Sync>) -> Browser {
        Browser::new(Arc::clone(&self.fetcher), host, self.uid())
    }
}
