//! Utility functions for the locator.
//!
//! - Node-style path helpers (`relative`, `extname`)
//! - JS literal embedding (injection-safe)

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::LocatorError;

// ---------------------------------------------------------------------------
// Path Helpers
// ---------------------------------------------------------------------------

/// Dotted extension of a path (`"/a/B.vue"` -> `".vue"`), or `""` when the
/// file name has none. Leading-dot names such as `.eslintrc` have none.
pub fn extname(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Path of `to` relative to `from`, using `..` segments when `to` lies
/// outside `from`. Separators are the platform's own.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    if let Ok(stripped) = to.strip_prefix(from) {
        return stripped.to_path_buf();
    }

    let from_parts: Vec<Component<'_>> = from.components().collect();
    let to_parts: Vec<Component<'_>> = to.components().collect();
    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..from_parts.len() {
        out.push("..");
    }
    for part in &to_parts[common..] {
        out.push(part.as_os_str());
    }
    out
}

// ---------------------------------------------------------------------------
// JS Literal Embedding
// ---------------------------------------------------------------------------

/// Serialize a value as a JS literal that is safe to place inside a
/// `<script>` body: JSON, with `</` and the line separators U+2028/U+2029
/// escaped.
pub fn to_js_literal<T: Serialize + ?Sized>(value: &T) -> Result<String, LocatorError> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace("</", "<\\/")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
}

/// Escape a string for safe embedding inside a JS double-quoted string literal.
pub fn escape_js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '<' => out.push_str("\\u003c"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}

/// Escape a value for a double-quoted HTML attribute.
pub fn escape_html_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extname() {
        assert_eq!(extname(Path::new("/proj/src/App.vue")), ".vue");
        assert_eq!(extname(Path::new("/proj/src/index.d.ts")), ".ts");
        assert_eq!(extname(Path::new("/proj/Makefile")), "");
        assert_eq!(extname(Path::new("/proj/.eslintrc")), "");
    }

    #[test]
    fn test_relative_path_inside_root() {
        let rel = relative_path(Path::new("/proj"), Path::new("/proj/src/Button.vue"));
        assert_eq!(rel, Path::new("src").join("Button.vue"));
    }

    #[test]
    fn test_relative_path_outside_root() {
        let rel = relative_path(
            Path::new("/proj/app"),
            Path::new("/proj/node_modules/lib/x.js"),
        );
        assert_eq!(
            rel,
            Path::new("..").join("node_modules").join("lib").join("x.js")
        );
    }

    #[test]
    fn test_relative_path_same_dir() {
        assert_eq!(relative_path(Path::new("/proj"), Path::new("/proj")), PathBuf::new());
    }

    #[test]
    fn test_to_js_literal_escapes_script_close() {
        let lit = to_js_literal("a</script>b").unwrap();
        assert_eq!(lit, r#""a<\/script>b""#);
    }

    #[test]
    fn test_to_js_literal_line_separators() {
        let lit = to_js_literal("a\u{2028}b").unwrap();
        assert_eq!(lit, r#""a\u2028b""#);
    }

    #[test]
    fn test_escape_js_string() {
        assert_eq!(escape_js_string(r#"he said "hi""#), r#"he said \"hi\""#);
        assert_eq!(escape_js_string("line1\nline2"), "line1\\nline2");
        assert_eq!(escape_js_string("C:\\proj"), "C:\\\\proj");
    }

    #[test]
    fn test_escape_html_attr() {
        assert_eq!(escape_html_attr(r#"/a"b.js"#), "/a&quot;b.js");
    }
}
