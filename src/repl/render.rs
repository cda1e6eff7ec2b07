use html_escape::decode_html_entities;

use crate::browser::{DestinationSelector, NavigationStack, ViewState, ViewStatus};
use crate::domain::{Entry, EntryKind};

const SUMMARY_WIDTH: usize = 72;

pub fn render_view(
    view: &ViewState,
    stack: &NavigationStack,
    selector: &DestinationSelector,
    back_visible: bool,
) -> String {
    let mut out = String::new();

    let mut header = stack.trail().collect::<Vec<_>>();
    header.push(view.title.as_str());
    out.push_str(&format!("== {} ==\n", header.join(" › ")));

    if selector.is_privileged() {
        out.push_str("[admin catalog]\n");
    }

    match &view.status {
        ViewStatus::Loading => out.push_str("Loading...\n"),
        ViewStatus::Restricted => {
            out.push_str("This catalog is restricted for your account.\n");
        }
        ViewStatus::Failed(message) => out.push_str(&format!("Error: {}\n", message)),
        ViewStatus::Empty => out.push_str("Nothing found.\n"),
        ViewStatus::Ready => {
            out.push_str(&render_entries(view.visible()));
            out.push_str(&view.summary());
            out.push('\n');
        }
    }

    let mut hints = Vec::new();
    if view.can_go_previous() {
        hints.push("p:prev");
    }
    if view.can_go_next() {
        hints.push("n:next");
    }
    if back_visible {
        hints.push("b:back");
    }
    hints.push("?:help");
    out.push_str(&hints.join("  "));
    out.push('\n');
    out
}

/// Numbered listing; numbers are positions on the current page.
pub fn render_entries(entries: &[Entry]) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&entry_line(i + 1, entry));
        out.push('\n');
        if let Some(summary) = entry.summary.as_deref().map(clean_summary) {
            if !summary.is_empty() {
                out.push_str(&format!("      {}\n", summary));
            }
        }
    }
    if entries.is_empty() {
        out.push_str("(no entries)\n");
    }
    out
}

fn entry_line(number: usize, entry: &Entry) -> String {
    let marker = match entry.kind() {
        EntryKind::Navigation => "›",
        EntryKind::Acquisition => "↓",
        EntryKind::Other => " ",
    };
    match &entry.author {
        Some(author) => format!(
            "{:>3}. {} {} ({})",
            number,
            marker,
            entry.display_title(),
            author
        ),
        None => format!("{:>3}. {} {}", number, marker, entry.display_title()),
    }
}

pub fn render_destinations(selector: &DestinationSelector) -> String {
    if !selector.is_enabled() {
        return "Destinations are only available to admins.\n".to_string();
    }
    let selected = selector.selected().map(|d| d.id.as_str());
    let mut out = String::new();
    for destination in selector.destinations() {
        let mark = if Some(destination.id.as_str()) == selected { "*" } else { " " };
        out.push_str(&format!("{} {} ({})\n", mark, destination.name, destination.id));
    }
    out
}

/// Single-line plain-text summary: tags dropped, entities decoded,
/// whitespace collapsed, truncated on a char boundary.
fn clean_summary(html: &str) -> String {
    let mut text = String::new();
    let mut in_tag = false;
    let mut last_was_space = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if in_tag => {}
            c if c.is_whitespace() => {
                if !last_was_space {
                    text.push(' ');
                    last_was_space = true;
                }
            }
            c => {
                text.push(c);
                last_was_space = false;
            }
        }
    }

    let text = decode_html_entities(text.trim()).to_string();
    if text.chars().count() <= SUMMARY_WIDTH {
        return text;
    }
    let mut short: String = text.chars().take(SUMMARY_WIDTH - 1).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::NavigationFrame;
    use crate::domain::{AdminConfig, Destination, FeedDocument, Link, ACQUISITION_REL};

    fn ready_view(count: usize) -> ViewState {
        let mut view = ViewState::default();
        let entries = (0..count)
            .map(|i| {
                Entry::new(format!("b{}", i), format!("Book {}", i))
                    .with_link(Link::new(ACQUISITION_REL, None, "/dl"))
            })
            .collect();
        view.show_document(
            FeedDocument::new(Some("Books"), entries).with_link(Link::new("next", None, "/p2")),
        );
        view
    }

    #[test]
    fn test_clean_summary() {
        assert_eq!(
            clean_summary("<p>Arrakis &amp;\n\n  <b>spice</b></p>"),
            "Arrakis & spice"
        );
        let long = "word ".repeat(40);
        let short = clean_summary(&long);
        assert_eq!(short.chars().count(), SUMMARY_WIDTH);
        assert!(short.ends_with('…'));
    }

    #[test]
    fn test_entry_markers() {
        let nav = Entry::new("n", "Authors").with_link(Link::new("subsection", None, "/a"));
        let mut book = Entry::new("b", "Dune").with_link(Link::new(ACQUISITION_REL, None, "/dl"));
        book.author = Some("Frank Herbert".into());

        assert_eq!(entry_line(1, &nav), "  1. › Authors");
        assert_eq!(entry_line(12, &book), " 12. ↓ Dune (Frank Herbert)");
    }

    #[test]
    fn test_render_view_lists_current_page() {
        let mut view = ready_view(25);
        view.pagination.current_page = 2;
        let mut stack = NavigationStack::new();
        stack.push(NavigationFrame {
            items: Vec::new(),
            title: "Root".into(),
            pagination: Default::default(),
        });

        let out = render_view(&view, &stack, &DestinationSelector::default(), true);
        assert!(out.starts_with("== Root › Books ==\n"));
        assert!(out.contains("  5. ↓ Book 24"));
        assert!(!out.contains("Book 19"));
        assert!(out.contains("Page 2/2 • 25 items • +"));
        assert!(out.contains("p:prev  n:next  b:back  ?:help"));
    }

    #[test]
    fn test_render_restricted() {
        let mut view = ready_view(3);
        view.status = ViewStatus::Restricted;
        let stack = NavigationStack::new();
        let out = render_view(&view, &stack, &DestinationSelector::default(), false);
        assert!(out.contains("restricted"));
        assert!(!out.contains("Book 0"));
    }

    #[test]
    fn test_render_destinations_marks_selection() {
        let selector = DestinationSelector::new(AdminConfig {
            is_admin: true,
            admin_root_url: None,
            destinations: vec![
                Destination {
                    id: "self".into(),
                    name: "Me".into(),
                },
                Destination {
                    id: "-1".into(),
                    name: "Channel".into(),
                },
            ],
        });
        assert_eq!(render_destinations(&selector), "* Me (self)\n  Channel (-1)\n");
        assert!(render_destinations(&DestinationSelector::default()).contains("only available"));
    }
}
