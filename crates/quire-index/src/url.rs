//! Document URL derivation.

/// Compute the published URL of a document.
///
/// `rel_path` is the `/`-separated path relative to the docs root. The
/// extension is replaced by a trailing slash, a trailing `index` segment is
/// collapsed into its directory, and the result is joined onto `base_url`
/// (trailing slashes trimmed).
///
/// Examples (with base `https://x.io`):
/// - `index.md` -> `https://x.io/`
/// - `guide.md` -> `https://x.io/guide/`
/// - `a/b/index.md` -> `https://x.io/a/b/`
/// - `a/b/page.md` -> `https://x.io/a/b/page/`
pub fn document_url(rel_path: &str, extension: &str, base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    format!("{base}{}", url_path(rel_path, extension))
}

/// Site-relative URL path for a document, always starting and ending with `/`.
fn url_path(rel_path: &str, extension: &str) -> String {
    let without_ext = rel_path
        .strip_suffix(extension)
        .and_then(|p| p.strip_suffix('.'))
        .unwrap_or(rel_path);

    // Only a whole `index` segment collapses; `myindex.md` keeps its name.
    let dir = if without_ext == "index" {
        ""
    } else if let Some(parent) = without_ext.strip_suffix("/index") {
        parent
    } else {
        without_ext
    };

    if dir.is_empty() {
        "/".to_owned()
    } else {
        format!("/{dir}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_url_with_base() {
        let base = "https://x.io";
        assert_eq!(document_url("index.md", "md", base), "https://x.io/");
        assert_eq!(document_url("guide.md", "md", base), "https://x.io/guide/");
        assert_eq!(document_url("a/b/index.md", "md", base), "https://x.io/a/b/");
        assert_eq!(
            document_url("a/b/page.md", "md", base),
            "https://x.io/a/b/page/"
        );
    }

    #[test]
    fn test_document_url_trims_base_trailing_slashes() {
        assert_eq!(
            document_url("java/basics.md", "md", "https://x.io/notes//"),
            "https://x.io/notes/java/basics/"
        );
    }

    #[test]
    fn test_document_url_empty_base() {
        assert_eq!(document_url("index.md", "md", ""), "/");
        assert_eq!(document_url("domain/setup.md", "md", ""), "/domain/setup/");
    }

    #[test]
    fn test_index_collapses_only_whole_segment() {
        assert_eq!(document_url("myindex.md", "md", ""), "/myindex/");
        assert_eq!(document_url("a/reindex.md", "md", ""), "/a/reindex/");
        assert_eq!(document_url("index/index.md", "md", ""), "/index/");
        assert_eq!(document_url("index/page.md", "md", ""), "/index/page/");
    }

    #[test]
    fn test_only_final_extension_is_stripped() {
        assert_eq!(document_url("v1.md.md", "md", ""), "/v1.md/");
        assert_eq!(document_url("notes.mdx/a.md", "md", ""), "/notes.mdx/a/");
    }

    #[test]
    fn test_custom_extension() {
        assert_eq!(
            document_url("guide/index.markdown", "markdown", "https://x.io"),
            "https://x.io/guide/"
        );
    }
}
