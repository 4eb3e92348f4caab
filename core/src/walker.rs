//! Depth-first enumeration of every file beneath a root directory.
//!
//! The walk keeps an explicit stack of open directory frames instead of
//! recursing, so arbitrarily deep trees cannot exhaust the call stack. Each
//! frame holds the remaining entries of one listing, which reproduces the
//! pre-order a recursive walk would produce: a subdirectory is fully
//! enumerated before its next sibling is looked at.

use std::ops::ControlFlow;

use tracing::{debug, warn};

use crate::errors::ListingError;
use crate::files::{join_path, DirectoryLister, EntryType, ListingEntry};

/// Tuning knobs for a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Deepest directory level that is still listed. The root is level 0.
    /// `None` walks the whole tree.
    pub max_depth: Option<usize>,
}

impl WalkOptions {
    pub fn with_max_depth(max_depth: Option<usize>) -> Self {
        Self { max_depth }
    }

    fn allows(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth <= max)
    }
}

/// Counters reported once a walk completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Files emitted.
    pub files: usize,
    /// Directories successfully listed, root included.
    pub directories: usize,
    /// Directories not descended into because of `max_depth`.
    pub skipped: usize,
    /// `emit` asked to stop before the tree was exhausted.
    pub stopped: bool,
}

struct Frame {
    path: String,
    depth: usize,
    entries: std::vec::IntoIter<ListingEntry>,
}

async fn open_dir<L>(
    lister: &L,
    path: String,
    depth: usize,
    summary: &mut WalkSummary,
) -> Result<Frame, ListingError>
where
    L: DirectoryLister + ?Sized,
{
    let entries = lister.list_dir(&path).await?;
    debug!("Listed {} ({} entries)", path, entries.len());
    summary.directories += 1;
    Ok(Frame {
        path,
        depth,
        entries: entries.into_iter(),
    })
}

/// Walk the tree under `root`, calling `emit` with the full path of every
/// file as soon as it is discovered.
///
/// The first failing listing aborts the walk and its error is returned.
/// Paths already handed to `emit` stay emitted. When `emit` returns
/// [`ControlFlow::Break`] no further directory is listed and the summary
/// comes back with `stopped` set.
pub async fn walk<L, F>(
    lister: &L,
    root: &str,
    options: &WalkOptions,
    mut emit: F,
) -> Result<WalkSummary, ListingError>
where
    L: DirectoryLister + ?Sized,
    F: FnMut(&str) -> ControlFlow<()>,
{
    let mut summary = WalkSummary::default();
    let mut stack = vec![open_dir(lister, root.to_string(), 0, &mut summary).await?];

    while let Some(frame) = stack.last_mut() {
        let Some(entry) = frame.entries.next() else {
            stack.pop();
            continue;
        };

        let child = join_path(&frame.path, &entry.name);
        match entry.entry_type {
            EntryType::File => {
                summary.files += 1;
                if emit(&child).is_break() {
                    debug!("Walk stopped by caller after {}", child);
                    summary.stopped = true;
                    break;
                }
            }
            EntryType::Directory => {
                let depth = frame.depth + 1;
                if options.allows(depth) {
                    let next = open_dir(lister, child, depth, &mut summary).await?;
                    stack.push(next);
                } else {
                    warn!("Not descending into {} (depth {} exceeds limit)", child, depth);
                    summary.skipped += 1;
                }
            }
        }
    }

    Ok(summary)
}

/// Walk the tree under `root` and return every file path in discovery order.
pub async fn collect_files<L>(
    lister: &L,
    root: &str,
    options: &WalkOptions,
) -> Result<Vec<String>, ListingError>
where
    L: DirectoryLister + ?Sized,
{
    let mut paths = Vec::new();
    walk(lister, root, options, |path| {
        paths.push(path.to_string());
        ControlFlow::Continue(())
    })
    .await?;
    Ok(paths)
}
