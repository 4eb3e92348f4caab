//! Async directory listing capability.
//!
//! A [`DirectoryLister`] stands for an already-authorized connection to one
//! endpoint. The walker only ever calls [`DirectoryLister::list_dir`] and
//! never mutates the lister.

use crate::errors::ListingError;
use crate::files::ListingEntry;

/// Lists the immediate children of a directory.
#[async_trait::async_trait]
pub trait DirectoryLister: Send + Sync {
    /// List directory contents at the given path, in the order the backend
    /// returns them.
    async fn list_dir(&self, path: &str) -> Result<Vec<ListingEntry>, ListingError>;
}
