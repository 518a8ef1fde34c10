//! Search index generation for quire documentation sites.
//!
//! Walks a tree of markdown documents and produces one JSON array of
//! `{title, url, content}` records for client-side search and chat context.
//!
//! - Recursive discovery of documents by extension, in byte-wise path order
//! - Title from the first `# ` heading, falling back to the humanized filename
//! - URL derived from the relative path, with `index` pages collapsed
//! - Best-effort reads: an unreadable document is logged and skipped
//! - Atomic write of `content.json` into the site directory
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use quire_index::{build_index, write_index};
//!
//! let report = build_index(Path::new("docs"), "https://example.github.io/notes")?;
//! write_index(&report.records, Path::new("site"))?;
//! ```

mod error;
mod hook;
mod scanner;
mod title;
mod url;
mod writer;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use scanner::Scanner;

pub use error::IndexError;
pub use hook::{BuildContext, HookOutcome, on_post_build};
pub use title::{document_title, title_from_content, title_from_filename};
pub use url::document_url;
pub use writer::{OUTPUT_FILENAME, to_json, write_index};

/// Default document extension.
pub const DEFAULT_EXTENSION: &str = "md";

/// One indexed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Display title.
    pub title: String,
    /// Canonical published URL.
    pub url: String,
    /// Raw document body.
    pub content: String,
}

/// A document that could not be indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    /// Document path on disk.
    pub path: PathBuf,
    /// Underlying error message.
    pub message: String,
}

/// Where one indexed document was published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedPage {
    /// Path relative to the docs root (e.g., "java/basic-types.md").
    pub name: String,
    /// Published URL.
    pub url: String,
}

/// Result of an indexing run.
#[derive(Debug, Default)]
pub struct IndexReport {
    /// Indexed documents, in discovery order.
    pub records: Vec<DocumentRecord>,
    /// One entry per record, in the same order.
    pub pages: Vec<IndexedPage>,
    /// Documents skipped because they could not be read.
    pub failures: Vec<DocumentFailure>,
}

/// Builds a document index from a directory tree.
pub struct Indexer {
    root: PathBuf,
    base_url: String,
    extension: String,
}

impl Indexer {
    /// Create an indexer for `root`, publishing under `base_url`.
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
            extension: DEFAULT_EXTENSION.to_owned(),
        }
    }

    /// Index files with this extension (without the leading dot) instead of `md`.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Scan, read and transform every document under the root.
    ///
    /// Documents are processed sequentially in sorted path order. A document
    /// that cannot be read is recorded in [`IndexReport::failures`] and the run
    /// continues.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Scan`] if the root directory cannot be listed.
    pub fn build(&self) -> Result<IndexReport, IndexError> {
        let refs = Scanner::new(self.root.clone(), &self.extension).scan()?;
        let mut report = IndexReport::default();

        for doc_ref in refs {
            match self.index_document(&doc_ref.rel_path, &doc_ref.path) {
                Ok(record) => {
                    tracing::info!(
                        file = %doc_ref.rel_path,
                        url = %record.url,
                        "Indexed document"
                    );
                    report.pages.push(IndexedPage {
                        name: doc_ref.rel_path,
                        url: record.url.clone(),
                    });
                    report.records.push(record);
                }
                Err(e) => {
                    tracing::warn!(path = %doc_ref.path.display(), error = %e, "Skipping document");
                    report.failures.push(DocumentFailure {
                        path: doc_ref.path,
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    /// Read one document and build its record.
    fn index_document(&self, rel_path: &str, path: &Path) -> Result<DocumentRecord, IndexError> {
        let content = fs::read_to_string(path).map_err(|source| IndexError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(DocumentRecord {
            title: document_title(path, &content),
            url: document_url(rel_path, &self.extension, &self.base_url),
            content,
        })
    }
}

/// Build the index of `.md` documents under `root_dir`.
///
/// # Errors
///
/// Returns [`IndexError::Scan`] if `root_dir` cannot be listed. Per-document
/// read failures are reported in [`IndexReport::failures`] instead.
pub fn build_index(root_dir: &Path, base_url: &str) -> Result<IndexReport, IndexError> {
    Indexer::new(root_dir, base_url).build()
}
