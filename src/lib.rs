//! # Quire
//!
//! A catalog browser for OPDS libraries that hands books off to a chat.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Normalizer → Browser → Host
//! ```
//!
//! - [`fetcher`]: backend JSON API client, or a direct OPDS reader
//! - [`normalizer`]: converts Atom/OPDS documents into domain models
//! - [`browser`]: the controller (pagination, breadcrumbs, auto-descend,
//!   search, admin destinations)
//! - [`repl`]: line-oriented terminal host
//!
//! ## Quick Start
//!
//! ```bash
//! # Browse through the mini-app backend
//! quire --uid 42 browse
//!
//! # Browse a public OPDS catalog directly
//! quire --direct https://standardebooks.org/feeds/opds
//!
//! # One-shot search
//! quire search "dune"
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct picks the catalog source from
/// the config and hands out [`Browser`](browser::Browser)s.
pub mod app;

/// Browsing controller and its parts.
///
/// - [`Browser`](browser::Browser): request/execute/commit load cycle
/// - [`Pagination`](browser::Pagination): 20-per-page slices plus server links
/// - [`NavigationStack`](browser::NavigationStack): breadcrumbs
/// - [`SearchDebouncer`](browser::SearchDebouncer): trailing-edge debounce
/// - [`DestinationSelector`](browser::DestinationSelector): admin toggle
pub mod browser;

/// Command-line interface using clap.
///
/// - `browse` - interactive session (default)
/// - `feed [url]` - print one catalog page
/// - `search <query>` - print search results
/// - `admin` - show admin status
pub mod cli;

/// Configuration loaded from `~/.config/quire/config.toml`.
pub mod config;

/// Core domain models: links, entries, catalog documents, admin config.
pub mod domain;

/// Catalog sources.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): mini-app backend
/// - [`OpdsFetcher`](fetcher::opds_fetcher::OpdsFetcher): direct OPDS
pub mod fetcher;

/// Chrome the embedding host provides.
pub mod host;

/// Atom/OPDS parsing via feed-rs.
pub mod normalizer;

/// Interactive terminal host.
pub mod repl;

#[cfg(test)]
pub(crate) mod testing;
