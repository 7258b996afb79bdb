//! Descriptors produced by the indexer and returned by queries.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

/// Route prefix under which records are fetched.
pub const FETCH_ROUTE_PREFIX: &str = "/api/json";

/// One record file discovered during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// File name with extension.
    pub name: String,
    /// Path on disk.
    pub absolute_path: PathBuf,
    /// Path relative to the data root, `/`-separated.
    pub relative_path: String,
    /// Parent of `relative_path`; empty when the file sits at the root.
    pub folder: String,
}

impl FileEntry {
    /// Build an entry for `path`, which must live under `root`.
    ///
    /// Returns `None` if `path` is not inside `root` or has no file name.
    #[must_use]
    pub fn from_path(root: &Path, path: &Path) -> Option<Self> {
        let relative = path.strip_prefix(root).ok()?;
        let name = relative.file_name()?.to_string_lossy().into_owned();
        let folder = relative.parent().map(slash_path).unwrap_or_default();

        Some(Self {
            name,
            absolute_path: path.to_path_buf(),
            relative_path: slash_path(relative),
            folder,
        })
    }

    /// Lightweight descriptor used by the list operation.
    #[must_use]
    pub fn descriptor(&self) -> FileDescriptor {
        FileDescriptor {
            name: self.name.clone(),
            folder: self.folder.clone(),
            path: retrieval_path(&self.folder, &self.name),
        }
    }
}

/// Entry in the list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDescriptor {
    pub name: String,
    pub folder: String,
    /// Key the record can be fetched under.
    pub path: String,
}

/// A search match with the full parsed record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub file: String,
    pub folder: String,
    pub data: Value,
}

impl SearchHit {
    #[must_use]
    pub fn new(entry: FileEntry, data: Value) -> Self {
        Self {
            file: entry.name,
            folder: entry.folder,
            data,
        }
    }
}

/// Build `<prefix>/<folder>/<name>`, omitting the folder when empty.
#[must_use]
pub fn retrieval_path(folder: &str, name: &str) -> String {
    if folder.is_empty() {
        format!("{FETCH_ROUTE_PREFIX}/{name}")
    } else {
        format!("{FETCH_ROUTE_PREFIX}/{folder}/{name}")
    }
}

fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_in_subfolder() {
        let root = Path::new("/data");
        let entry = FileEntry::from_path(root, Path::new("/data/Characters/a.json")).unwrap();

        assert_eq!(entry.name, "a.json");
        assert_eq!(entry.folder, "Characters");
        assert_eq!(entry.relative_path, "Characters/a.json");
        assert_eq!(entry.absolute_path, PathBuf::from("/data/Characters/a.json"));
    }

    #[test]
    fn test_entry_at_root_has_empty_folder() {
        let entry = FileEntry::from_path(Path::new("/data"), Path::new("/data/top.json")).unwrap();
        assert_eq!(entry.folder, "");
        assert_eq!(entry.relative_path, "top.json");
    }

    #[test]
    fn test_entry_nested_folder() {
        let entry =
            FileEntry::from_path(Path::new("/data"), Path::new("/data/Relics/Sets/x.json")).unwrap();
        assert_eq!(entry.folder, "Relics/Sets");
    }

    #[test]
    fn test_entry_outside_root() {
        assert!(FileEntry::from_path(Path::new("/data"), Path::new("/other/a.json")).is_none());
    }

    #[test]
    fn test_descriptor_paths() {
        let root = Path::new("/data");
        let nested = FileEntry::from_path(root, Path::new("/data/Lightcones/b.json")).unwrap();
        assert_eq!(nested.descriptor().path, "/api/json/Lightcones/b.json");

        let top = FileEntry::from_path(root, Path::new("/data/b.json")).unwrap();
        assert_eq!(top.descriptor().path, "/api/json/b.json");
    }

    #[test]
    fn test_search_hit_serialization() {
        let entry = FileEntry::from_path(Path::new("/d"), Path::new("/d/W/sword.json")).unwrap();
        let hit = SearchHit::new(entry, json!({"Rarity": "5"}));

        let value = serde_json::to_value(&hit).unwrap();
        assert_eq!(
            value,
            json!({"file": "sword.json", "folder": "W", "data": {"Rarity": "5"}})
        );
    }
}
