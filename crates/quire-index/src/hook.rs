//! Post-build hook entry point.
//!
//! Runs once after the documentation site has been built: indexes the docs
//! directory and writes `content.json` into the site directory. Nothing here
//! returns an error; failures are logged and reported in [`HookOutcome`].

use std::path::PathBuf;

use crate::{DEFAULT_EXTENSION, IndexedPage, Indexer, write_index};

/// Build settings handed to the hook.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Documentation source directory.
    pub docs_dir: PathBuf,
    /// Build output directory.
    pub site_dir: PathBuf,
    /// Site base URL (may be empty).
    pub site_url: String,
    /// Document extension without the leading dot.
    pub extension: String,
}

impl BuildContext {
    /// Create a context indexing `.md` documents.
    pub fn new(docs_dir: PathBuf, site_dir: PathBuf, site_url: String) -> Self {
        Self {
            docs_dir,
            site_dir,
            site_url,
            extension: DEFAULT_EXTENSION.to_owned(),
        }
    }
}

/// What the hook did.
#[derive(Debug)]
pub enum HookOutcome {
    /// The index was written.
    Written {
        /// Output file path.
        path: PathBuf,
        /// Indexed documents, in output order.
        pages: Vec<IndexedPage>,
        /// Number of documents skipped.
        skipped: usize,
    },
    /// Documents were indexed but the output could not be written.
    WriteFailed {
        /// Intended output file path.
        path: PathBuf,
        /// Documents that were indexed but not written.
        pages: Vec<IndexedPage>,
        /// Error message.
        error: String,
    },
    /// The docs directory could not be scanned; nothing was written.
    ScanFailed {
        /// Error message.
        error: String,
    },
}

impl HookOutcome {
    /// Whether `content.json` was written.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Written { .. })
    }

    /// Number of documents indexed.
    #[must_use]
    pub fn processed(&self) -> usize {
        match self {
            Self::Written { pages, .. } | Self::WriteFailed { pages, .. } => pages.len(),
            Self::ScanFailed { .. } => 0,
        }
    }
}

/// Index `ctx.docs_dir` and write `content.json` into `ctx.site_dir`.
pub fn on_post_build(ctx: &BuildContext) -> HookOutcome {
    tracing::info!(
        docs_dir = %ctx.docs_dir.display(),
        site_dir = %ctx.site_dir.display(),
        "Generating content index"
    );

    let report = match Indexer::new(ctx.docs_dir.clone(), ctx.site_url.clone())
        .with_extension(ctx.extension.clone())
        .build()
    {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "Failed to scan docs directory");
            return HookOutcome::ScanFailed {
                error: e.to_string(),
            };
        }
    };

    match write_index(&report.records, &ctx.site_dir) {
        Ok(path) => {
            tracing::info!(
                path = %path.display(),
                processed = report.pages.len(),
                skipped = report.failures.len(),
                "Generated content index"
            );
            HookOutcome::Written {
                path,
                pages: report.pages,
                skipped: report.failures.len(),
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to write content index");
            HookOutcome::WriteFailed {
                path: ctx.site_dir.join(crate::OUTPUT_FILENAME),
                pages: report.pages,
                error: e.to_string(),
            }
        }
    }
}
