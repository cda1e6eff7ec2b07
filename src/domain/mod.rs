pub mod admin;
pub mod download;
pub mod entry;
pub mod feed;
pub mod link;

pub use admin::{AdminConfig, Destination, SELF_DESTINATION};
pub use download::DownloadRequest;
pub use entry::{Entry, EntryKind};
pub use feed::{FeedDocument, RawFeed};
pub use link::{Link, ACQUISITION_REL, SUBSECTION_REL};
