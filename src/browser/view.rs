use super::pagination::{total_pages, Pagination};
use super::stack::NavigationFrame;
use crate::app::{ErrorKind, QuireError};
use crate::domain::{Entry, FeedDocument};

pub const DEFAULT_TITLE: &str = "Catalog";
pub const SEARCH_RESULTS_TITLE: &str = "Search results";

/// What the host should show alongside (or instead of) the entry list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Loading,
    Ready,
    /// Access denied for this user
    Restricted,
    Failed(String),
    /// The catalog answered without entries
    Empty,
}

/// The single view-state object shared by every controller action.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub title: String,
    pub items: Vec<Entry>,
    pub pagination: Pagination,
    pub status: ViewStatus,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            items: Vec::new(),
            pagination: Pagination::default(),
            status: ViewStatus::Loading,
        }
    }
}

impl ViewState {
    pub fn visible(&self) -> &[Entry] {
        self.pagination.slice(&self.items)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.items.len())
    }

    pub fn can_go_next(&self) -> bool {
        self.pagination.can_go_next(self.items.len())
    }

    pub fn can_go_previous(&self) -> bool {
        self.pagination.can_go_previous()
    }

    pub fn summary(&self) -> String {
        self.pagination.summary(self.items.len())
    }

    pub(crate) fn snapshot(&self) -> NavigationFrame {
        NavigationFrame {
            items: self.items.clone(),
            title: self.title.clone(),
            pagination: self.pagination.clone(),
        }
    }

    /// Frames carry no status; an empty batch comes back as `Empty`.
    pub(crate) fn restore(&mut self, frame: NavigationFrame) {
        self.items = frame.items;
        self.title = frame.title;
        self.pagination = frame.pagination;
        self.status = if self.items.is_empty() {
            ViewStatus::Empty
        } else {
            ViewStatus::Ready
        };
    }

    /// Replace the batch with a browsed document.
    pub(crate) fn show_document(&mut self, doc: FeedDocument) {
        self.pagination = Pagination::from_document(&doc);
        if let Some(title) = doc.title {
            self.title = title;
        }
        self.items = doc.entries;
        self.status = ViewStatus::Ready;
    }

    /// Replace the batch with search results. Server pagination is left
    /// as it was.
    pub(crate) fn show_search_results(&mut self, doc: FeedDocument) {
        self.items = doc.entries;
        self.pagination.current_page = 1;
        self.title = SEARCH_RESULTS_TITLE.to_string();
        self.status = ViewStatus::Ready;
    }

    /// Record a failed load. Only an empty result touches the batch.
    pub(crate) fn show_error(&mut self, err: &QuireError, search: bool) {
        self.status = match err.kind() {
            ErrorKind::AccessDenied => ViewStatus::Restricted,
            ErrorKind::LoadFailed => ViewStatus::Failed(err.to_string()),
            ErrorKind::EmptyResult => {
                self.items.clear();
                if search {
                    self.pagination.current_page = 1;
                    self.title = SEARCH_RESULTS_TITLE.to_string();
                } else {
                    self.pagination = Pagination::default();
                }
                ViewStatus::Empty
            }
        };
    }
}
