//! Line-oriented terminal host for the browser.

pub mod event;
pub mod render;

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Mutex};

use crate::app::{AppContext, Result};
use crate::browser::{Browser, LoadOutcome, LoadRequest, SearchDebouncer};
use crate::domain::Entry;
use crate::host::HostChrome;

use self::event::{Action, AppEvent, HELP};

type Lines = Arc<Mutex<mpsc::UnboundedReceiver<String>>>;

/// Host chrome backed by stdin/stdout. Confirmations read the next line
/// typed at the prompt.
pub struct TerminalHost {
    lines: Lines,
    back_visible: AtomicBool,
}

impl TerminalHost {
    fn new(lines: Lines) -> Self {
        Self {
            lines,
            back_visible: AtomicBool::new(false),
        }
    }

    pub fn back_visible(&self) -> bool {
        self.back_visible.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl HostChrome for TerminalHost {
    fn show_back_button(&self) {
        self.back_visible.store(true, Ordering::Relaxed);
    }

    fn hide_back_button(&self) {
        self.back_visible.store(false, Ordering::Relaxed);
    }

    async fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        let _ = std::io::stdout().flush();
        let answer = self.lines.lock().await.recv().await;
        matches!(answer.as_deref().map(str::trim), Some("y" | "Y" | "yes"))
    }

    fn alert(&self, message: &str) {
        println!("! {}", message);
    }

    fn close(&self) {
        println!("Bye.");
    }
}

fn spawn_stdin_reader(tx: mpsc::UnboundedSender<String>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });
}

/// Run the network half of a load on its own task; the outcome comes back
/// through `tx` and is committed by the main loop.
fn dispatch(browser: &Browser, request: LoadRequest, tx: &mpsc::UnboundedSender<LoadOutcome>) {
    let fetcher = browser.fetcher();
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = request.execute(fetcher).await;
        let _ = tx.send(outcome);
    });
}

fn entry_at(browser: &Browser, n: usize) -> Option<Entry> {
    let entry = browser.view().visible().get(n.saturating_sub(1)).cloned();
    if entry.is_none() {
        println!("No entry {} on this page.", n);
    }
    entry
}

fn draw(browser: &Browser, host: &TerminalHost) {
    print!(
        "{}",
        render::render_view(
            browser.view(),
            browser.stack(),
            browser.selector(),
            host.back_visible()
        )
    );
    prompt();
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let (line_tx, line_rx) = mpsc::unbounded_channel();
    spawn_stdin_reader(line_tx);
    let lines: Lines = Arc::new(Mutex::new(line_rx));

    let host = Arc::new(TerminalHost::new(Arc::clone(&lines)));
    let mut browser = ctx.browser(host.clone());
    let (mut debouncer, mut queries) = SearchDebouncer::new(ctx.config.search.debounce());
    let (load_tx, mut loads) = mpsc::unbounded_channel::<LoadOutcome>();

    println!("Connecting...");
    browser.start().await;
    draw(&browser, &host);

    loop {
        let event = {
            let mut lines = lines.lock().await;
            tokio::select! {
                line = lines.recv() => match line {
                    Some(line) => AppEvent::Line(line),
                    None => break,
                },
                Some(query) = queries.recv() => AppEvent::Search(query),
                Some(outcome) = loads.recv() => AppEvent::Loaded(outcome),
            }
        };

        match event {
            AppEvent::Line(line) => {
                let action = Action::from(line.as_str());
                match action {
                    Action::Quit => {
                        host.close();
                        break;
                    }
                    Action::NextPage => match browser.request_next() {
                        Some(request) => dispatch(&browser, request, &load_tx),
                        None => draw(&browser, &host),
                    },
                    Action::PrevPage => match browser.request_previous() {
                        Some(request) => dispatch(&browser, request, &load_tx),
                        None => draw(&browser, &host),
                    },
                    Action::Back => {
                        if !browser.back() {
                            println!("Already at the top.");
                        }
                        draw(&browser, &host);
                    }
                    Action::Home => {
                        let request = browser.request_home();
                        dispatch(&browser, request, &load_tx);
                    }
                    // Anything with a catalog link opens; the rest downloads.
                    Action::Open(n) => match entry_at(&browser, n) {
                        Some(entry) => match browser.request_navigate(&entry) {
                            Some(request) => dispatch(&browser, request, &load_tx),
                            None => {
                                browser.download(&entry).await;
                                prompt();
                            }
                        },
                        None => prompt(),
                    },
                    Action::Download(n) => {
                        if let Some(entry) = entry_at(&browser, n) {
                            browser.download(&entry).await;
                        }
                        prompt();
                    }
                    Action::Search(query) => {
                        debouncer.call(query);
                        prompt();
                    }
                    Action::ToggleAdmin => match browser.request_toggle_privileged() {
                        Some(request) => dispatch(&browser, request, &load_tx),
                        None => {
                            println!("Admin catalog is not available for this account.");
                            prompt();
                        }
                    },
                    Action::Destination(None) => {
                        print!("{}", render::render_destinations(browser.selector()));
                        prompt();
                    }
                    Action::Destination(Some(id)) => {
                        if browser.select_destination(&id) {
                            println!("Downloads now go to {}.", id);
                        } else {
                            println!("Unknown destination: {}", id);
                        }
                        prompt();
                    }
                    Action::Help => {
                        println!("{}", HELP);
                        prompt();
                    }
                    Action::Redraw => draw(&browser, &host),
                    Action::Unknown(line) => {
                        println!("Unknown command: {} (? for help)", line);
                        prompt();
                    }
                }
            }
            AppEvent::Search(query) => {
                let request = browser.request_search(&query);
                dispatch(&browser, request, &load_tx);
            }
            AppEvent::Loaded(outcome) => {
                if browser.commit(outcome) {
                    draw(&browser, &host);
                }
            }
        }
    }

    Ok(())
}
