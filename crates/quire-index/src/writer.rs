//! Index output.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::DocumentRecord;
use crate::error::IndexError;

/// Output filename inside the site directory.
pub const OUTPUT_FILENAME: &str = "content.json";

/// Serialize the index as indented JSON.
///
/// Non-ASCII text is written verbatim, not escaped.
///
/// # Errors
///
/// Returns [`IndexError::Serialize`] if serialization fails.
pub fn to_json(records: &[DocumentRecord]) -> Result<Vec<u8>, IndexError> {
    Ok(serde_json::to_vec_pretty(records)?)
}

/// Write the index to `content.json` inside `site_dir`.
///
/// The JSON is written to a temporary file in the same directory and renamed
/// into place, so a failed write never leaves a truncated index behind.
/// `site_dir` is created if missing. Returns the output path.
///
/// # Errors
///
/// Returns [`IndexError::Write`] if the directory, temporary file, or rename fails.
pub fn write_index(records: &[DocumentRecord], site_dir: &Path) -> Result<PathBuf, IndexError> {
    let output_path = site_dir.join(OUTPUT_FILENAME);
    let json = to_json(records)?;

    let write_err = |source| IndexError::Write {
        path: output_path.clone(),
        source,
    };

    fs::create_dir_all(site_dir).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(site_dir).map_err(write_err)?;
    tmp.write_all(&json).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    // Temporary files are created owner-only; the index is a public asset.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(write_err)?;
    }

    tmp.persist(&output_path).map_err(|e| write_err(e.error))?;

    Ok(output_path)
}
