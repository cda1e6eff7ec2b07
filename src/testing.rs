//! In-memory doubles for the fetcher and host seams.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::app::{QuireError, Result};
use crate::domain::{AdminConfig, DownloadRequest, FeedDocument};
use crate::fetcher::Fetcher;
use crate::host::HostChrome;

#[derive(Clone)]
enum Canned {
    Doc(FeedDocument),
    Denied,
    Failed,
    NoEntries,
}

impl Canned {
    fn into_result(self) -> Result<FeedDocument> {
        match self {
            Canned::Doc(doc) => Ok(doc),
            Canned::Denied => Err(QuireError::AccessDenied),
            Canned::Failed => Err(QuireError::LoadFailed("connection reset".into())),
            Canned::NoEntries => Err(QuireError::EmptyResult),
        }
    }
}

/// Serves canned documents keyed by href (`None` = root) and records calls.
#[derive(Default)]
pub struct MockFetcher {
    feeds: HashMap<Option<String>, Canned>,
    searches: HashMap<String, Canned>,
    admin: Option<AdminConfig>,
    fail_downloads: bool,
    calls: Mutex<Vec<String>>,
    downloads: Mutex<Vec<DownloadRequest>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_feed(&mut self, url: Option<&str>, doc: FeedDocument) {
        self.feeds.insert(url.map(String::from), Canned::Doc(doc));
    }

    pub fn deny_feed(&mut self, url: Option<&str>) {
        self.feeds.insert(url.map(String::from), Canned::Denied);
    }

    pub fn fail_feed(&mut self, url: Option<&str>) {
        self.feeds.insert(url.map(String::from), Canned::Failed);
    }

    pub fn empty_feed(&mut self, url: Option<&str>) {
        self.feeds.insert(url.map(String::from), Canned::NoEntries);
    }

    pub fn add_search(&mut self, query: &str, doc: FeedDocument) {
        self.searches.insert(query.to_string(), Canned::Doc(doc));
    }

    pub fn set_admin(&mut self, config: AdminConfig) {
        self.admin = Some(config);
    }

    pub fn fail_downloads(&mut self) {
        self.fail_downloads = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn downloads(&self) -> Vec<DownloadRequest> {
        self.downloads.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch_feed(&self, url: Option<&str>, _uid: Option<&str>) -> Result<FeedDocument> {
        self.record(format!("feed:{}", url.unwrap_or("<root>")));
        self.feeds
            .get(&url.map(String::from))
            .cloned()
            .unwrap_or(Canned::Failed)
            .into_result()
    }

    async fn search(&self, query: &str) -> Result<FeedDocument> {
        self.record(format!("search:{}", query));
        self.searches
            .get(query)
            .cloned()
            .unwrap_or(Canned::NoEntries)
            .into_result()
    }

    async fn fetch_admin_config(&self, _uid: Option<&str>) -> Result<AdminConfig> {
        self.record("config".to_string());
        self.admin
            .clone()
            .ok_or_else(|| QuireError::LoadFailed("no config".into()))
    }

    async fn request_download(&self, request: &DownloadRequest) -> Result<()> {
        self.record(format!("download:{}", request.download_url));
        if self.fail_downloads {
            return Err(QuireError::Download("backend returned 500".into()));
        }
        self.downloads.lock().unwrap().push(request.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    ShowBack,
    HideBack,
    Confirm(String),
    Alert(String),
    Close,
}

/// Host that records every chrome call and answers confirmations with a
/// fixed value.
pub struct RecordingHost {
    answer: bool,
    calls: Mutex<Vec<HostCall>>,
}

impl RecordingHost {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<HostCall> {
        self.calls.lock().unwrap().last().cloned()
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl HostChrome for RecordingHost {
    fn show_back_button(&self) {
        self.record(HostCall::ShowBack);
    }

    fn hide_back_button(&self) {
        self.record(HostCall::HideBack);
    }

    async fn confirm(&self, message: &str) -> bool {
        self.record(HostCall::Confirm(message.to_string()));
        self.answer
    }

    fn alert(&self, message: &str) {
        self.record(HostCall::Alert(message.to_string()));
    }

    fn close(&self) {
        self.record(HostCall::Close);
    }
}
