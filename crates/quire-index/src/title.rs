//! Document title derivation.

use std::path::Path;

/// Heading marker that identifies a top-level heading line.
const HEADING_MARKER: &str = "# ";

/// Title of a document: its first top-level heading, or the humanized filename.
pub fn document_title(path: &Path, content: &str) -> String {
    title_from_content(content).unwrap_or_else(|| title_from_filename(path))
}

/// Extract the text of the first top-level heading line.
///
/// Lines are scanned top to bottom; a line matches when, after trimming
/// surrounding whitespace, it starts with `"# "`. The remainder is trimmed.
pub fn title_from_content(content: &str) -> Option<String> {
    content
        .split('\n')
        .map(str::trim)
        .find_map(|line| line.strip_prefix(HEADING_MARKER))
        .map(|title| title.trim().to_owned())
}

/// Generate a title from a file path's stem.
///
/// `-` and `_` become spaces, and each word is capitalized with the rest of
/// the word lowercased (`setup-guide` -> `Setup Guide`, `my_API` -> `My Api`).
pub fn title_from_filename(path: &Path) -> String {
    path.file_stem()
        .map(|s| titlecase_from_slug(&s.to_string_lossy()))
        .unwrap_or_default()
}

/// Convert a slug (kebab-case or `snake_case`) to title case.
///
/// Separators map one-to-one onto spaces, so runs of separators keep their width.
fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    let mut at_word_start = true;
    for c in slug.chars() {
        let c = if c == '-' || c == '_' { ' ' } else { c };
        if c.is_whitespace() {
            result.push(c);
            at_word_start = true;
        } else if at_word_start {
            result.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            result.extend(c.to_lowercase());
        }
    }
    result
}
