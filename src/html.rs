//! Asset Injector.
//!
//! Adds the `<script src>` reference to the emitted runtime into generated
//! page markup, immediately before a closing anchor (`</body>` by default).

use crate::utils;

/// Marker attribute identifying the injected reference.
pub const SCRIPT_MARKER_ATTR: &str = "data-component-locator";

/// Insert one `<script src="{src}">` before the first `anchor`.
///
/// Markup that already references `src` is returned unchanged. Without the
/// anchor the tag is appended at the end.
pub fn inject_script_reference(html: &str, src: &str, anchor: &str) -> String {
    let escaped_src = utils::escape_html_attr(src);
    if html.contains(&format!("src=\"{escaped_src}\"")) {
        return html.to_string();
    }

    let script_tag = format!("<script src=\"{escaped_src}\" {SCRIPT_MARKER_ATTR}></script>");
    if html.contains(anchor) {
        return html.replacen(anchor, &format!("{script_tag}{anchor}"), 1);
    }
    format!("{html}{script_tag}")
}

/// Whether a generated file name is page markup the injector applies to.
pub fn is_markup_asset(file_name: &str) -> bool {
    file_name.ends_with(".html") || file_name.ends_with(".htm")
}
