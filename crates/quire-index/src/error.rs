//! Error types for index generation.

use std::path::PathBuf;

/// Error from index generation.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The documentation root could not be listed.
    #[error("failed to scan {}: {source}", path.display())]
    Scan {
        /// Directory that failed to list.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A single document could not be read or decoded as UTF-8.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Document path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The index could not be serialized.
    #[error("failed to serialize index: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The output file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
