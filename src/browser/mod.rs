//! Catalog browsing controller.
//!
//! Every load is split in three steps so the network part can run without
//! holding the controller:
//!
//! 1. a `request_*` method updates bookkeeping (stack, back button) and
//!    returns a [`LoadRequest`] stamped with a fresh generation ticket;
//! 2. [`LoadRequest::execute`] talks to the fetcher and runs auto-descend;
//! 3. [`Browser::commit`] applies the outcome only if its ticket is still
//!    the latest one issued.
//!
//! A descend holds its breadcrumb aside until its own load commits, so a
//! superseded descend never leaves a frame behind.

pub mod admin;
pub mod descend;
pub mod pagination;
pub mod search;
pub mod stack;
pub mod view;


use std::sync::Arc;

use crate::app::{QuireError, Result};
use crate::domain::{AdminConfig, DownloadRequest, Entry, FeedDocument};
use crate::fetcher::Fetcher;
use crate::host::HostChrome;

pub use admin::DestinationSelector;
pub use descend::MAX_AUTO_DEPTH;
pub use pagination::{PageTurn, Pagination, ITEMS_PER_PAGE};
pub use search::{Debouncer, SearchDebouncer, SEARCH_DEBOUNCE};
pub use stack::{NavigationFrame, NavigationStack};
pub use view::{ViewState, ViewStatus};

pub const MISSING_LINK_MESSAGE: &str = "No download link found for this book.";
pub const STARTING_DOWNLOAD_MESSAGE: &str = "Starting download...";
pub const DOWNLOAD_STARTED_MESSAGE: &str = "Download started. Check the bot chat.";
pub const DOWNLOAD_FAILED_MESSAGE: &str = "Failed to start the download.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadTarget {
    /// Catalog document (`None` = root), auto-descending from `depth`.
    Feed { url: Option<String>, depth: u8 },
    Search { query: String },
}

/// A load that has been issued but not yet executed.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub ticket: u64,
    pub target: LoadTarget,
    uid: Option<String>,
}

impl LoadRequest {
    /// Run the network side of the load. Touches no controller state.
    pub async fn execute(self, fetcher: Arc<dyn Fetcher + Send + Sync>) -> LoadOutcome {
        let (search, result) = match &self.target {
            LoadTarget::Feed { url, depth } => {
                let loaded = descend::load_and_resolve(
                    fetcher.as_ref(),
                    url.as_deref(),
                    *depth,
                    self.uid.as_deref(),
                )
                .await;
                let result = loaded.map(|(doc, reached)| {
                    tracing::debug!("Load {} settled at depth {}", self.ticket, reached);
                    doc
                });
                (false, result)
            }
            LoadTarget::Search { query } => (true, fetcher.search(query).await),
        };

        LoadOutcome {
            ticket: self.ticket,
            search,
            result,
        }
    }
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub ticket: u64,
    pub search: bool,
    pub result: Result<FeedDocument>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    MissingLink,
    Declined,
    Sent,
    Failed,
}

pub struct Browser {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    host: Arc<dyn HostChrome + Send + Sync>,
    uid: Option<String>,
    view: ViewState,
    stack: NavigationStack,
    admin: DestinationSelector,
    generation: u64,
    /// Frame of an in-flight descend and the ticket it belongs to.
    pending: Option<(u64, NavigationFrame)>,
}

impl Browser {
    pub fn new(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        host: Arc<dyn HostChrome + Send + Sync>,
        uid: Option<String>,
    ) -> Self {
        Self {
            fetcher,
            host,
            uid,
            view: ViewState::default(),
            stack: NavigationStack::new(),
            admin: DestinationSelector::default(),
            generation: 0,
            pending: None,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn selector(&self) -> &DestinationSelector {
        &self.admin
    }

    pub fn fetcher(&self) -> Arc<dyn Fetcher + Send + Sync> {
        Arc::clone(&self.fetcher)
    }

    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    pub fn set_admin_config(&mut self, config: AdminConfig) {
        self.admin = DestinationSelector::new(config);
    }

    /// Invalidate every load issued so far, including an in-flight descend.
    fn bump(&mut self) -> u64 {
        self.generation += 1;
        if self.pending.take().is_some() && self.stack.is_empty() {
            self.host.hide_back_button();
        }
        self.generation
    }

    fn issue(&mut self, target: LoadTarget) -> LoadRequest {
        let ticket = self.bump();
        self.view.status = ViewStatus::Loading;
        tracing::info!("Load {} issued: {:?}", ticket, target);
        LoadRequest {
            ticket,
            target,
            uid: self.uid.clone(),
        }
    }

    /// Load the effective root (the admin root while privileged).
    pub fn request_root(&mut self) -> LoadRequest {
        let url = self.admin.effective_root().map(String::from);
        self.issue(LoadTarget::Feed { url, depth: 0 })
    }

    /// Descend into `entry`. Returns `None` (and changes nothing) when the
    /// entry has no navigable href.
    ///
    /// The frame for the current view is pushed when this load commits.
    pub fn request_navigate(&mut self, entry: &Entry) -> Option<LoadRequest> {
        let href = entry.navigation_href()?.to_string();
        let frame = self.view.snapshot();
        let request = self.issue(LoadTarget::Feed {
            url: Some(href),
            depth: 0,
        });
        self.pending = Some((request.ticket, frame));
        self.host.show_back_button();
        Some(request)
    }

    pub fn request_next(&mut self) -> Option<LoadRequest> {
        let turn = self.view.pagination.plan_next(self.view.items.len());
        self.apply_turn(turn)
    }

    pub fn request_previous(&mut self) -> Option<LoadRequest> {
        let turn = self.view.pagination.plan_previous();
        self.apply_turn(turn)
    }

    fn apply_turn(&mut self, turn: PageTurn) -> Option<LoadRequest> {
        match turn {
            PageTurn::Local(page) => {
                self.bump();
                self.view.pagination.current_page = page;
                None
            }
            PageTurn::Remote(url) => Some(self.issue(LoadTarget::Feed {
                url: Some(url),
                depth: MAX_AUTO_DEPTH,
            })),
            PageTurn::None => None,
        }
    }

    /// Drop every breadcrumb and reload the effective root.
    pub fn request_home(&mut self) -> LoadRequest {
        self.stack.clear();
        self.pending = None;
        self.host.hide_back_button();
        self.request_root()
    }

    /// A blank query resets browsing to the root.
    pub fn request_search(&mut self, query: &str) -> LoadRequest {
        let query = query.trim();
        if query.is_empty() {
            return self.request_home();
        }
        self.issue(LoadTarget::Search {
            query: query.to_string(),
        })
    }

    /// Switch normal/privileged browsing. `None` for non-admins.
    pub fn request_toggle_privileged(&mut self) -> Option<LoadRequest> {
        if !self.admin.toggle() {
            return None;
        }
        let mode = if self.admin.is_privileged() { "on" } else { "off" };
        tracing::info!("Privileged browsing {}", mode);
        Some(self.request_home())
    }

    /// Pop one level. Returns false when already at the top.
    ///
    /// With a descend still in flight, back cancels it and stays on the
    /// current level.
    pub fn back(&mut self) -> bool {
        let frame = match self.pending.take() {
            Some((_, frame)) => frame,
            None => match self.stack.pop() {
                Some(frame) => frame,
                None => return false,
            },
        };
        self.bump();
        self.view.restore(frame);
        if self.stack.is_empty() {
            self.host.hide_back_button();
        }
        true
    }

    pub fn select_destination(&mut self, id: &str) -> bool {
        self.admin.select(id)
    }

    /// Apply a finished load. Returns false when a newer action superseded it.
    pub fn commit(&mut self, outcome: LoadOutcome) -> bool {
        if outcome.ticket != self.generation {
            tracing::debug!(
                "Dropping stale load {} (latest is {})",
                outcome.ticket,
                self.generation
            );
            return false;
        }

        if let Some((ticket, frame)) = self.pending.take() {
            if ticket == outcome.ticket {
                self.stack.push(frame);
            }
        }

        match outcome.result {
            Ok(doc) if outcome.search => {
                tracing::info!("Search returned {} entries", doc.entries.len());
                self.view.show_search_results(doc);
            }
            Ok(doc) => {
                tracing::info!("Loaded {} entries", doc.entries.len());
                self.view.show_document(doc);
            }
            Err(err) => {
                match &err {
                    QuireError::EmptyResult => tracing::info!("Catalog returned no entries"),
                    other => tracing::warn!("Load {} failed: {}", outcome.ticket, other),
                }
                self.view.show_error(&err, outcome.search);
            }
        }
        true
    }

    async fn run(&mut self, request: LoadRequest) -> bool {
        let outcome = request.execute(self.fetcher()).await;
        self.commit(outcome)
    }

    /// Fetch the admin config once, then load the root.
    pub async fn start(&mut self) -> bool {
        match self.fetcher.fetch_admin_config(self.uid.as_deref()).await {
            Ok(config) => self.set_admin_config(config),
            Err(e) => {
                tracing::warn!("Failed to load admin config: {}", e);
                self.set_admin_config(AdminConfig::default());
            }
        }
        self.load_root().await
    }

    pub async fn load_root(&mut self) -> bool {
        let request = self.request_root();
        self.run(request).await
    }

    pub async fn navigate(&mut self, entry: &Entry) -> bool {
        match self.request_navigate(entry) {
            Some(request) => self.run(request).await,
            None => false,
        }
    }

    pub async fn next(&mut self) -> bool {
        match self.request_next() {
            Some(request) => self.run(request).await,
            None => false,
        }
    }

    pub async fn previous(&mut self) -> bool {
        match self.request_previous() {
            Some(request) => self.run(request).await,
            None => false,
        }
    }

    pub async fn search(&mut self, query: &str) -> bool {
        let request = self.request_search(query);
        self.run(request).await
    }

    pub async fn toggle_privileged_mode(&mut self) -> bool {
        match self.request_toggle_privileged() {
            Some(request) => self.run(request).await,
            None => false,
        }
    }

    /// Build the download body for `entry`, if it has an acquisition link.
    pub fn prepare_download(&self, entry: &Entry) -> Option<DownloadRequest> {
        let download_url = entry.acquisition_href()?;
        Some(DownloadRequest {
            title: entry.display_title().to_string(),
            author: entry.author.clone(),
            download_url: download_url.to_string(),
            cover_url: entry.cover_url.clone(),
            user_id: self.uid.clone(),
            target_chat_id: self.admin.target_chat_id(),
        })
    }

    /// Confirm with the user and send a download request. Browsing state is
    /// never touched.
    pub async fn download(&self, entry: &Entry) -> DownloadOutcome {
        let Some(request) = self.prepare_download(entry) else {
            self.host.alert(MISSING_LINK_MESSAGE);
            return DownloadOutcome::MissingLink;
        };

        let prompt = format!("Download \"{}\"?", request.title);
        if !self.host.confirm(&prompt).await {
            return DownloadOutcome::Declined;
        }

        self.host.alert(STARTING_DOWNLOAD_MESSAGE);
        match self.fetcher.request_download(&request).await {
            Ok(()) => {
                tracing::info!("Download requested: {}", request.download_url);
                self.host.alert(DOWNLOAD_STARTED_MESSAGE);
                DownloadOutcome::Sent
            }
            Err(e) => {
                tracing::warn!("Download of {} failed: {}", request.download_url, e);
                self.host.alert(DOWNLOAD_FAILED_MESSAGE);
                DownloadOutcome::Failed
            }
        }
    }
}
