use crate::domain::FeedDocument;

/// Fixed display page size, independent of the catalog's own page size.
pub const ITEMS_PER_PAGE: usize = 20;

pub fn total_pages(item_count: usize) -> usize {
    item_count.div_ceil(ITEMS_PER_PAGE).max(1)
}

/// What a page turn has to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageTurn {
    /// Stay on the loaded batch and show this page.
    Local(usize),
    /// The batch is exhausted; fetch this server page.
    Remote(String),
    None,
}

/// Hybrid cursor: a client-side page over the loaded batch plus the
/// server's next/previous hrefs for when the batch runs out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: usize,
    pub next_page_url: Option<String>,
    pub prev_page_url: Option<String>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            next_page_url: None,
            prev_page_url: None,
        }
    }
}

impl Pagination {
    pub fn from_document(doc: &FeedDocument) -> Self {
        Self {
            current_page: 1,
            next_page_url: doc.next_page_url(),
            prev_page_url: doc.prev_page_url(),
        }
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current_page.saturating_sub(1) * ITEMS_PER_PAGE).min(items.len());
        let end = (start + ITEMS_PER_PAGE).min(items.len());
        &items[start..end]
    }

    pub fn plan_next(&self, item_count: usize) -> PageTurn {
        if self.current_page < total_pages(item_count) {
            PageTurn::Local(self.current_page + 1)
        } else if let Some(url) = &self.next_page_url {
            PageTurn::Remote(url.clone())
        } else {
            PageTurn::None
        }
    }

    pub fn plan_previous(&self) -> PageTurn {
        if self.current_page > 1 {
            PageTurn::Local(self.current_page - 1)
        } else if let Some(url) = &self.prev_page_url {
            PageTurn::Remote(url.clone())
        } else {
            PageTurn::None
        }
    }

    pub fn can_go_next(&self, item_count: usize) -> bool {
        self.plan_next(item_count) != PageTurn::None
    }

    pub fn can_go_previous(&self) -> bool {
        self.plan_previous() != PageTurn::None
    }

    /// One-line position summary, `+` marking a further server page.
    pub fn summary(&self, item_count: usize) -> String {
        let mut line = format!(
            "Page {}/{} • {} items",
            self.current_page,
            total_pages(item_count),
            item_count
        );
        if self.next_page_url.is_some() {
            line.push_str(" • +");
        }
        line
    }
}
