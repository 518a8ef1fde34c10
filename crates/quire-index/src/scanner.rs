//! Document discovery by filesystem walking.
//!
//! The Scanner only identifies files that form documents; no content is read
//! at this stage. Reading and record building happen in [`crate::Indexer`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::IndexError;

/// Reference to a discovered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DocumentRef {
    /// Path relative to the scanned root, `/`-separated (e.g., "guide/setup.md").
    pub rel_path: String,
    /// Full path to the document on disk.
    pub path: PathBuf,
}

/// Discovers documents by walking the filesystem.
pub(crate) struct Scanner {
    root: PathBuf,
    suffix: String,
}

impl Scanner {
    /// Create a new Scanner.
    ///
    /// # Arguments
    ///
    /// * `root` - Root directory to scan
    /// * `extension` - Document extension without the leading dot (e.g., "md")
    pub fn new(root: PathBuf, extension: &str) -> Self {
        Self {
            root,
            suffix: format!(".{extension}"),
        }
    }

    /// Scan the tree and return document references sorted by relative path.
    ///
    /// Sorting compares the `/`-separated relative path strings byte by byte,
    /// so the order does not depend on locale or platform.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Scan`] if the root directory cannot be listed.
    /// Unreadable subdirectories are logged and skipped.
    pub fn scan(&self) -> Result<Vec<DocumentRef>, IndexError> {
        let entries = fs::read_dir(&self.root).map_err(|source| IndexError::Scan {
            path: self.root.clone(),
            source,
        })?;

        let mut refs = Vec::new();
        self.collect(&self.root, entries, "", &mut refs);
        refs.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        Ok(refs)
    }

    /// Collect documents from one directory listing, recursing into subdirectories.
    fn collect(
        &self,
        dir: &Path,
        entries: fs::ReadDir,
        rel_prefix: &str,
        refs: &mut Vec<DocumentRef>,
    ) {
        for entry in entries.filter_map(|entry| usable_entry(entry, dir)) {
            let name = entry.file_name().to_string_lossy().into_owned();
            let rel_path = if rel_prefix.is_empty() {
                name.clone()
            } else {
                format!("{rel_prefix}/{name}")
            };
            let path = entry.path();

            // Symlinked directories are not followed.
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                match fs::read_dir(&path) {
                    Ok(children) => self.collect(&path, children, &rel_path, refs),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable directory");
                    }
                }
            } else if name.ends_with(&self.suffix) {
                refs.push(DocumentRef { rel_path, path });
            }
        }
    }
}

/// Unwrap a directory entry, logging and skipping entries that cannot be read.
fn usable_entry(entry: io::Result<fs::DirEntry>, dir: &Path) -> Option<fs::DirEntry> {
    entry
        .inspect_err(|e| {
            tracing::warn!(path = %dir.display(), error = %e, "Skipping unreadable directory entry");
        })
        .ok()
}
