use super::pagination::Pagination;
use crate::domain::Entry;

/// Snapshot of the view taken right before descending into an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationFrame {
    pub items: Vec<Entry>,
    pub title: String,
    pub pagination: Pagination,
}

/// Breadcrumbs for hierarchical back-navigation.
///
/// Frames are only pushed by an explicit descend and are dropped once
/// popped; there is no redo.
#[derive(Debug, Default)]
pub struct NavigationStack {
    frames: Vec<NavigationFrame>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: NavigationFrame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<NavigationFrame> {
        self.frames.pop()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Titles from the outermost frame inwards.
    pub fn trail(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(|f| f.title.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(title: &str, page: usize) -> NavigationFrame {
        NavigationFrame {
            items: vec![Entry::new(format!("{}-1", title), title)],
            title: title.to_string(),
            pagination: Pagination {
                current_page: page,
                next_page_url: Some(format!("/{}?page=2", title)),
                prev_page_url: None,
            },
        }
    }

    #[test]
    fn test_lifo_order() {
        let mut stack = NavigationStack::new();
        stack.push(frame("root", 1));
        stack.push(frame("libraries", 2));

        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.trail().collect::<Vec<_>>(), vec!["root", "libraries"]);
        assert_eq!(stack.pop(), Some(frame("libraries", 2)));
        assert_eq!(stack.pop(), Some(frame("root", 1)));
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut stack = NavigationStack::new();
        stack.push(frame("root", 1));
        stack.clear();
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.pop(), None);
    }
}
