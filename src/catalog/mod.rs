//! Record catalog: directory indexing and queries.
//!
//! This module provides:
//! - Recursive discovery of record files under a data root
//! - Listing, single-record fetch, and full-scan search

mod entry;
mod record;
mod scanner;
mod service;

pub use entry::{retrieval_path, FileDescriptor, FileEntry, SearchHit, FETCH_ROUTE_PREFIX};
pub use record::{Matcher, SearchMode, SearchRequest};
pub use scanner::{scan_directory, scan_directory_async, ScanOutcome, ScanStats};
pub use service::Catalog;
