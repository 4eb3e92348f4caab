//! Local filesystem lister.
//!
//! Blocking `read_dir` calls are offloaded to `tokio::task::spawn_blocking`
//! to avoid blocking the async executor.

use std::io::ErrorKind;
use std::path::Path;

use tracing::warn;

use crate::errors::ListingError;
use crate::files::{DirectoryLister, ListingEntry};

/// Lists directories on the local filesystem.
///
/// Symbolic links are followed, so a link to a directory is reported as a
/// directory; a dangling link is an error rather than a file. Entries keep
/// the order `read_dir` yields them in.
#[derive(Debug, Clone, Default)]
pub struct LocalLister;

impl LocalLister {
    pub fn new() -> Self {
        Self
    }
}

/// List directory contents, filtering out `.` and `..`.
pub fn list_dir_sync(path: &str) -> Result<Vec<ListingEntry>, ListingError> {
    let entries = std::fs::read_dir(Path::new(path)).map_err(|e| map_io_error(path, e))?;

    let mut result = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();

        if name == "." || name == ".." {
            continue;
        }

        // Follows symlinks; a target that cannot be stat'ed fails the listing.
        let entry_path = entry.path();
        let metadata = std::fs::metadata(&entry_path).map_err(|e| {
            let display_path = entry_path.to_string_lossy();
            warn!("Cannot stat {}: {}", display_path, e);
            map_io_error(&display_path, e)
        })?;

        if metadata.is_dir() {
            result.push(ListingEntry::directory(name));
        } else {
            result.push(ListingEntry::file(name));
        }
    }

    Ok(result)
}

fn map_io_error(path: &str, err: std::io::Error) -> ListingError {
    match err.kind() {
        ErrorKind::NotFound => ListingError::NotFound(path.to_string()),
        ErrorKind::PermissionDenied => ListingError::PermissionDenied(path.to_string()),
        _ => ListingError::Io(err),
    }
}

#[async_trait::async_trait]
impl DirectoryLister for LocalLister {
    async fn list_dir(&self, path: &str) -> Result<Vec<ListingEntry>, ListingError> {
        let path = path.to_string();
        tokio::task::spawn_blocking(move || list_dir_sync(&path))
            .await
            .map_err(|e| ListingError::Transport(format!("Task join failed: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::EntryType;

    #[test]
    fn list_dir_sync_empty() {
        let dir = tempfile::tempdir().unwrap();
        let entries = list_dir_sync(dir.path().to_str().unwrap()).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn list_dir_sync_tags_files_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hello.txt"), "world").unwrap();
        std::fs::create_dir(dir.path().join("subdir")).unwrap();

        let entries = list_dir_sync(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(entries.len(), 2);

        let file_entry = entries.iter().find(|e| e.name == "hello.txt").unwrap();
        assert_eq!(file_entry.entry_type, EntryType::File);

        let dir_entry = entries.iter().find(|e| e.name == "subdir").unwrap();
        assert_eq!(dir_entry.entry_type, EntryType::Directory);
    }

    #[test]
    fn list_dir_sync_nonexistent_directory() {
        let result = list_dir_sync("/nonexistent/path/abc123");
        assert!(matches!(result, Err(ListingError::NotFound(p)) if p == "/nonexistent/path/abc123"));
    }

    #[cfg(unix)]
    #[test]
    fn list_dir_sync_follows_directory_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let entries = list_dir_sync(dir.path().to_str().unwrap()).unwrap();
        let link = entries.iter().find(|e| e.name == "link").unwrap();
        assert!(link.is_directory());
    }

    #[cfg(unix)]
    #[test]
    fn list_dir_sync_dangling_symlink_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ok.txt"), "x").unwrap();
        let link = dir.path().join("dangling");
        std::os::unix::fs::symlink(dir.path().join("missing-target"), &link).unwrap();

        let result = list_dir_sync(dir.path().to_str().unwrap());
        let expected = link.to_string_lossy().to_string();
        assert!(matches!(result, Err(ListingError::NotFound(p)) if p == expected));
    }

    #[tokio::test]
    async fn local_lister_lists_async() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();

        let entries = LocalLister::new()
            .list_dir(dir.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(entries, vec![ListingEntry::file("a.txt")]);
    }
}
