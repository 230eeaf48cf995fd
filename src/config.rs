//! Plugin configuration.
//!
//! Options are supplied once at plugin construction and never change for
//! the lifetime of the process. They decide what the index builder admits
//! and how the runtime agent behaves (trigger condition, editor URI).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{BuildMode, LocatorError};

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// Editor that receives the "open file" request.
///
/// Any string deserializes. Unknown names are kept as [`Editor::Other`] and
/// only rejected when a launch is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Editor {
    #[default]
    VsCode,
    WebStorm,
    Other(String),
}

impl Editor {
    pub fn as_str(&self) -> &str {
        match self {
            Editor::VsCode => "vscode",
            Editor::WebStorm => "webstorm",
            Editor::Other(name) => name,
        }
    }
}

impl From<String> for Editor {
    fn from(name: String) -> Self {
        match name.as_str() {
            // An empty identifier falls back to the default editor.
            "" | "vscode" => Editor::VsCode,
            "webstorm" => Editor::WebStorm,
            _ => Editor::Other(name),
        }
    }
}

impl From<&str> for Editor {
    fn from(name: &str) -> Self {
        Editor::from(name.to_string())
    }
}

impl From<Editor> for String {
    fn from(editor: Editor) -> Self {
        editor.as_str().to_string()
    }
}

impl fmt::Display for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Trigger Key
// ---------------------------------------------------------------------------

/// Modifier key(s) that turn a click into a locate request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TriggerKey {
    /// Control modifier only.
    Ctrl,
    /// Command / meta modifier only.
    Cmd,
    /// Either modifier.
    #[default]
    Both,
}

impl TriggerKey {
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerKey::Ctrl => "ctrl",
            TriggerKey::Cmd => "cmd",
            TriggerKey::Both => "both",
        }
    }

    /// Evaluate the trigger condition against the modifier state of a click.
    pub fn is_satisfied(self, ctrl_key: bool, meta_key: bool) -> bool {
        match self {
            TriggerKey::Ctrl => ctrl_key,
            TriggerKey::Cmd => meta_key,
            TriggerKey::Both => ctrl_key || meta_key,
        }
    }
}

impl From<String> for TriggerKey {
    fn from(name: String) -> Self {
        match name.as_str() {
            "ctrl" => TriggerKey::Ctrl,
            "cmd" => TriggerKey::Cmd,
            _ => TriggerKey::Both,
        }
    }
}

impl From<TriggerKey> for String {
    fn from(key: TriggerKey) -> Self {
        key.as_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// LocatorOptions
// ---------------------------------------------------------------------------

pub const DEFAULT_ASSET_FILE_NAME: &str = "component-locator.js";
pub const DEFAULT_MARKUP_ANCHOR: &str = "</body>";
pub const DEFAULT_HOT_UPDATE_GLOBAL: &str = "webpackHotUpdate";

/// Construction-time options of the locator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocatorOptions {
    pub editor: Editor,
    /// Extensions (with leading dot) of modules admitted into the index.
    pub component_extensions: Vec<String>,
    pub trigger_key: TriggerKey,
    /// Prefix the root-relative module path must start with.
    pub src_dir: String,
    /// Enable outside of development builds.
    pub force_enable: bool,
    /// File name of the emitted runtime script.
    pub asset_file_name: String,
    /// Public prefix of the `<script src>` reference.
    pub public_path: String,
    /// Closing markup the reference is inserted before.
    pub markup_anchor: String,
    /// Global hot-update notifier wrapped by the runtime, if present.
    pub hot_update_global: String,
    /// Keep the runtime's console diagnostics.
    pub verbose: bool,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            editor: Editor::VsCode,
            component_extensions: [".vue", ".js", ".ts", ".jsx", ".tsx"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            trigger_key: TriggerKey::Both,
            src_dir: "src".into(),
            force_enable: false,
            asset_file_name: DEFAULT_ASSET_FILE_NAME.into(),
            public_path: "/".into(),
            markup_anchor: DEFAULT_MARKUP_ANCHOR.into(),
            hot_update_global: DEFAULT_HOT_UPDATE_GLOBAL.into(),
            verbose: true,
        }
    }
}

impl LocatorOptions {
    /// Whether the locator does anything at all for a build in `mode`.
    ///
    /// Outside of development the whole mechanism is inert unless forced.
    pub fn is_active(&self, mode: BuildMode) -> bool {
        mode == BuildMode::Dev || self.force_enable
    }

    /// Check the option values that would otherwise silently never match.
    pub fn validate(&self) -> Result<(), LocatorError> {
        if let Some(ext) = self
            .component_extensions
            .iter()
            .find(|ext| !ext.starts_with('.') || ext.len() < 2)
        {
            return Err(LocatorError::InvalidOptions(format!(
                "component extension '{ext}' must start with '.' (e.g. '.vue')"
            )));
        }
        if self.asset_file_name.trim().is_empty() {
            return Err(LocatorError::InvalidOptions(
                "assetFileName must be a non-empty file name".into(),
            ));
        }
        if self.markup_anchor.is_empty() {
            return Err(LocatorError::InvalidOptions(
                "markupAnchor must be non-empty".into(),
            ));
        }
        Ok(())
    }

    /// Whether a dotted extension (as produced by `utils::extname`) is admitted.
    pub fn admits_extension(&self, ext: &str) -> bool {
        self.component_extensions.iter().any(|e| e == ext)
    }

    /// The `src` attribute used to reference the emitted script from markup.
    pub fn script_src(&self) -> String {
        let prefix = self.public_path.trim_end_matches('/');
        format!("{}/{}", prefix, self.asset_file_name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
