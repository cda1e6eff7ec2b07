use crate::browser::LoadOutcome;

pub enum AppEvent {
    /// A line typed at the prompt
    Line(String),
    /// A query that survived the debounce window
    Search(String),
    /// A spawned load finished
    Loaded(LoadOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextPage,
    PrevPage,
    Back,
    Home,
    /// Open the n-th visible entry (1-based)
    Open(usize),
    Download(usize),
    Search(String),
    ToggleAdmin,
    /// List destinations, or pick one by id
    Destination(Option<String>),
    Help,
    Redraw,
    Unknown(String),
}

impl From<&str> for Action {
    fn from(line: &str) -> Self {
        let line = line.trim();
        if let Some(query) = line.strip_prefix('/') {
            return Action::Search(query.trim().to_string());
        }

        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, Some(arg.trim())),
            None => (line, None),
        };

        match (command, arg) {
            ("", _) => Action::Redraw,
            ("q" | "quit" | "exit", None) => Action::Quit,
            ("n" | "next", None) => Action::NextPage,
            ("p" | "prev" | "previous", None) => Action::PrevPage,
            ("b" | "back", None) => Action::Back,
            ("h" | "home", None) => Action::Home,
            ("?" | "help", None) => Action::Help,
            ("a" | "admin", None) => Action::ToggleAdmin,
            ("dest", id) => Action::Destination(id.map(String::from)),
            ("s" | "search", query) => Action::Search(query.unwrap_or_default().to_string()),
            ("o" | "open", Some(n)) => parse_index(n).map_or_else(|| unknown(line), Action::Open),
            ("d" | "download", Some(n)) => {
                parse_index(n).map_or_else(|| unknown(line), Action::Download)
            }
            (n, None) => parse_index(n).map_or_else(|| unknown(line), Action::Open),
            _ => unknown(line),
        }
    }
}

fn parse_index(value: &str) -> Option<usize> {
    value.parse::<usize>().ok().filter(|n| *n > 0)
}

fn unknown(line: &str) -> Action {
    Action::Unknown(line.to_string())
}

pub const HELP: &str = "\
Commands:
  <n>, o <n>     open entry n (descend or download)
  d <n>          download entry n
  n / p          next / previous page
  b              back
  h              home (clears history)
  /<query>       search (blank query goes home)
  a              toggle admin catalog
  dest [id]      list or pick download destination
  q              quit";
