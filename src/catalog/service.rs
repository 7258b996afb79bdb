//! Query operations over the data root.

use std::path::{Path, PathBuf};

use futures::{future, stream, StreamExt};
use serde_json::Value;

use super::entry::{FileDescriptor, FileEntry, SearchHit};
use super::record::{Matcher, SearchRequest};
use super::scanner::scan_directory_async;
use crate::error::CatalogError;
use crate::{Config, Result};

const DEFAULT_SUFFIX: &str = ".json";
const DEFAULT_READ_CONCURRENCY: usize = 8;

/// Read-only view of a record directory.
///
/// Holds no cached state; every operation re-walks the filesystem.
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
    suffix: String,
    read_concurrency: usize,
}

impl Catalog {
    /// Create a catalog over `root` with default settings.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            suffix: DEFAULT_SUFFIX.to_string(),
            read_concurrency: DEFAULT_READ_CONCURRENCY,
        }
    }

    /// Create a catalog from validated configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            root: config.data_dir.clone(),
            suffix: config.record_suffix(),
            read_concurrency: config.read_concurrency.max(1),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Enumerate every record file under the root.
    ///
    /// # Errors
    ///
    /// Returns an error only if the background scan task fails.
    pub async fn index(&self) -> Result<Vec<FileEntry>> {
        let outcome = scan_directory_async(&self.root, &self.suffix).await?;
        Ok(outcome.entries)
    }

    /// List descriptors for every record. Never reads file contents.
    ///
    /// # Errors
    ///
    /// Returns an error only if the background scan task fails.
    pub async fn list(&self) -> Result<Vec<FileDescriptor>> {
        let entries = self.index().await?;
        tracing::info!(count = entries.len(), "Listed record files");
        Ok(entries.iter().map(FileEntry::descriptor).collect())
    }

    /// Fetch one record by a `/`-separated path relative to the root.
    ///
    /// The last segment is the file name; anything before it is the folder.
    ///
    /// # Errors
    ///
    /// Same as [`Catalog::fetch`].
    pub async fn fetch_path(&self, path: &str) -> Result<Value> {
        let path = path.trim_matches('/');
        match path.rsplit_once('/') {
            Some((folder, filename)) => self.fetch(Some(folder), Some(filename)).await,
            None => self.fetch(None, Some(path)).await,
        }
    }

    /// Fetch and parse one record.
    ///
    /// With a single segment (either argument) the file is looked up
    /// directly under the root.
    ///
    /// # Errors
    ///
    /// - `CatalogError::InvalidPath` if no segment is given or a segment
    ///   could escape the root
    /// - `CatalogError::NotFound` if the file cannot be read or parsed
    pub async fn fetch(&self, folder: Option<&str>, filename: Option<&str>) -> Result<Value> {
        let relative = resolve_relative(folder, filename)?;
        let path = self.root.join(&relative);

        load_record(&path).await.map_err(|e| {
            tracing::warn!(path = %relative, error = %e, "Failed to load record");
            CatalogError::not_found(relative).into()
        })
    }

    /// Scan every record and return the ones matching `request`.
    ///
    /// Unreadable or malformed files are skipped. Results keep index order.
    ///
    /// # Errors
    ///
    /// Returns an error only if the background scan task fails.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>> {
        let matcher = Matcher::new(request);
        let entries = self.index().await?;
        let scanned = entries.len();

        let hits: Vec<SearchHit> = stream::iter(entries)
            .map(|entry| async move {
                let record = load_record(&entry.absolute_path).await;
                (entry, record)
            })
            .buffered(self.read_concurrency)
            .filter_map(|(entry, record)| {
                let hit = match record {
                    Ok(data) if matcher.matches(&data, &entry.folder) => {
                        Some(SearchHit::new(entry, data))
                    }
                    Ok(_) => None,
                    Err(e) => {
                        tracing::debug!(path = %entry.relative_path, error = %e, "Skipping unreadable record");
                        None
                    }
                };
                future::ready(hit)
            })
            .collect()
            .await;

        tracing::info!(
            mode = matcher.mode().as_str(),
            scanned,
            matched = hits.len(),
            "Search complete"
        );

        Ok(hits)
    }
}

async fn load_record(path: &Path) -> std::io::Result<Value> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Turn request segments into a root-relative path.
fn resolve_relative(
    folder: Option<&str>,
    filename: Option<&str>,
) -> std::result::Result<String, CatalogError> {
    let folder = folder.filter(|f| !f.is_empty());
    let filename = filename.filter(|f| !f.is_empty());

    let relative = match (folder, filename) {
        (Some(folder), Some(filename)) => format!("{folder}/{filename}"),
        (Some(single), None) | (None, Some(single)) => single.to_string(),
        (None, None) => return Err(CatalogError::invalid_path("missing path")),
    };

    if relative.split('/').all(is_safe_segment) {
        Ok(relative)
    } else {
        Err(CatalogError::invalid_path(format!(
            "'{relative}' is not a path under the data root"
        )))
    }
}

fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty() && segment != "." && segment != ".." && !segment.contains(['\\', '\0'])
}
