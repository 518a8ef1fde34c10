//! Build context from an `mkdocs.yml` site configuration.
//!
//! Only the keys the post-build indexer needs are read; everything else in
//! the file is ignored.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ConfigError;

/// The subset of `mkdocs.yml` the indexer reads.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct MkdocsRaw {
    docs_dir: Option<String>,
    site_dir: Option<String>,
    site_url: Option<String>,
}

/// Resolved MkDocs build settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MkdocsSettings {
    /// Source directory (`docs_dir`, default `docs`).
    pub docs_dir: PathBuf,
    /// Output directory (`site_dir`, default `site`).
    pub site_dir: PathBuf,
    /// Site base URL (`site_url`, default empty).
    pub site_url: String,
}

impl MkdocsSettings {
    /// Load settings from an `mkdocs.yml`, resolving directories relative to
    /// the file's parent directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the file does not exist, or an
    /// I/O or YAML error if it cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let base = path.parent().unwrap_or(Path::new("."));
        Self::parse(&content, base)
    }

    fn parse(content: &str, base: &Path) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not a mapping.
        let raw: MkdocsRaw = if content.trim().is_empty() {
            MkdocsRaw::default()
        } else {
            serde_yaml::from_str(content)?
        };

        Ok(Self {
            docs_dir: base.join(raw.docs_dir.as_deref().unwrap_or("docs")),
            site_dir: base.join(raw.site_dir.as_deref().unwrap_or("site")),
            site_url: raw.site_url.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full() {
        let yaml = r"
site_name: Class Notes
site_url: https://example.github.io/notes/
docs_dir: content
site_dir: public
theme:
  name: material
";
        let settings = MkdocsSettings::parse(yaml, Path::new("/project")).unwrap();
        assert_eq!(
            settings,
            MkdocsSettings {
                docs_dir: PathBuf::from("/project/content"),
                site_dir: PathBuf::from("/project/public"),
                site_url: "https://example.github.io/notes/".to_owned(),
            }
        );
    }

    #[test]
    fn test_parse_defaults() {
        let settings = MkdocsSettings::parse("site_name: Notes\n", Path::new("/p")).unwrap();
        assert_eq!(settings.docs_dir, PathBuf::from("/p/docs"));
        assert_eq!(settings.site_dir, PathBuf::from("/p/site"));
        assert_eq!(settings.site_url, "");
    }

    #[test]
    fn test_parse_empty_file() {
        let settings = MkdocsSettings::parse("", Path::new("/p")).unwrap();
        assert_eq!(settings.docs_dir, PathBuf::from("/p/docs"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = MkdocsSettings::load(Path::new("/nonexistent/mkdocs.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("mkdocs.yml");
        std::fs::write(&path, "site_url: https://x.io\n").unwrap();

        let settings = MkdocsSettings::load(&path).unwrap();
        assert_eq!(settings.docs_dir, temp_dir.path().join("docs"));
        assert_eq!(settings.site_url, "https://x.io");
    }
}
