//! Editor launch URIs.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::Editor;

/// URI that asks `editor` to open `path`, or `None` when the editor has no
/// known scheme.
pub fn editor_uri(editor: &Editor, path: &str) -> Option<String> {
    match editor {
        Editor::VsCode => Some(format!("vscode://file{path}")),
        Editor::WebStorm => Some(format!("webstorm://open?file={}", webstorm_path(path))),
        Editor::Other(_) => None,
    }
}

/// Drop a leading `X:` drive segment and turn backslashes into slashes.
fn webstorm_path(path: &str) -> String {
    lazy_static! {
        static ref DRIVE_RE: Regex = Regex::new(r"^[A-Z]:").unwrap();
    }
    DRIVE_RE.replace(path, "").replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vscode_uses_raw_path() {
        assert_eq!(
            editor_uri(&Editor::VsCode, "/Users/a/App.vue").as_deref(),
            Some("vscode://file/Users/a/App.vue")
        );
    }

    #[test]
    fn webstorm_normalizes_windows_path() {
        assert_eq!(
            editor_uri(&Editor::WebStorm, "C:\\proj\\App.vue").as_deref(),
            Some("webstorm://open?file=/proj/App.vue")
        );
    }

    #[test]
    fn webstorm_keeps_posix_path() {
        assert_eq!(
            editor_uri(&Editor::WebStorm, "/proj/src/App.vue").as_deref(),
            Some("webstorm://open?file=/proj/src/App.vue")
        );
    }

    #[test]
    fn unknown_editor_has_no_uri() {
        assert_eq!(editor_uri(&Editor::Other("atom".into()), "/p/A.vue"), None);
    }
}
