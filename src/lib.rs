//! # Component Locator
//!
//! Click a rendered UI element while holding the trigger key and jump to
//! the source file that defines it.
//!
//! Two halves:
//! - **Build time**: after each completed build, index the compiled modules
//!   by their project-relative path and synthesize a self-contained runtime
//!   script that embeds the index (`index`, `script`).
//! - **Run time**: the script resolves a clicked element back to its
//!   component source via framework introspection and opens it through the
//!   editor's URI scheme (`runtime` models the same behaviour).
//!
//! The locator never activates outside development builds unless
//! `forceEnable` is set.

pub mod bundler;
pub mod config;
pub mod html;
pub mod index;
pub mod logging;
pub mod plugin;
pub mod runtime;
pub mod script;
pub mod utils;

#[cfg(feature = "napi")]
pub mod napi_bridge;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use config::{Editor, LocatorOptions, TriggerKey};
pub use index::{build_component_index, ComponentIndex, ModuleRecord, ProjectContext};
pub use plugin::asset_store::{AssetRegistry, AssetStore};
pub use plugin::LocatorPlugin;
pub use script::{synthesize_script, EmittedScript};

// ---------------------------------------------------------------------------
// Build Mode
// ---------------------------------------------------------------------------

/// The host build mode. Only `Dev` activates the locator by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Development: the locator is active.
    #[serde(alias = "development")]
    Dev,
    /// Production: inert unless forced.
    #[serde(alias = "production", alias = "none")]
    Prod,
    /// Static Site Generation: inert unless forced.
    SSG,
}

// ---------------------------------------------------------------------------
// Diagnostic
// ---------------------------------------------------------------------------

/// A structured diagnostic emitted while building the locator asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    pub context: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
}

// ---------------------------------------------------------------------------
// LocatorError
// ---------------------------------------------------------------------------

/// Build-side failures. Runtime misses are outcomes, not errors.
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Build failed: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// BuildInput / LocatorArtifact
// ---------------------------------------------------------------------------

/// What the host hands over when a build completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildInput {
    /// Compiled module records of the build.
    pub modules: Vec<ModuleRecord>,
    /// Build root directory (the project root).
    pub root: PathBuf,
    pub mode: BuildMode,
}

/// Everything produced for one completed build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatorArtifact {
    pub index: ComponentIndex,
    pub context: ProjectContext,
    /// The runtime script to emit.
    pub asset: EmittedScript,
    /// `src` to reference the asset from page markup.
    pub script_src: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl LocatorArtifact {
    /// Apply the markup injection for this artifact to a generated page.
    pub fn inject_into(&self, page: &str, opts: &LocatorOptions) -> String {
        html::inject_script_reference(page, &self.script_src, &opts.markup_anchor)
    }

    /// Write the runtime asset under `out_dir`. Returns the written path.
    pub async fn write_to_disk(&self, out_dir: &Path) -> Result<PathBuf, LocatorError> {
        tokio::fs::create_dir_all(out_dir).await?;
        let asset_path = out_dir.join(&self.asset.file_name);
        tokio::fs::write(&asset_path, &self.asset.source).await?;
        Ok(asset_path)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the build-time half for one completed build.
///
/// Returns `Ok(None)` when the locator is inactive for `input.mode`; in that
/// case nothing is indexed, emitted or injected.
pub fn locate_build(
    input: &BuildInput,
    opts: &LocatorOptions,
) -> Result<Option<LocatorArtifact>, LocatorError> {
    if !opts.is_active(input.mode) {
        tracing::debug!(mode = ?input.mode, "component locator inactive");
        return Ok(None);
    }
    opts.validate()?;

    let mut diagnostics = Vec::new();

    let index = build_component_index(&input.modules, &input.root, opts);
    let context = ProjectContext::from_path(&input.root);

    if index.is_empty() {
        diagnostics.push(Diagnostic {
            level: DiagnosticLevel::Warning,
            message: format!(
                "No component modules under '{}' matched {:?}",
                opts.src_dir, opts.component_extensions
            ),
            context: Some(context.as_str().to_string()),
        });
    }

    let asset = script::emit_script(&index, &context, opts)?;

    diagnostics.push(Diagnostic {
        level: DiagnosticLevel::Info,
        message: format!(
            "Component locator: {} components indexed, {} bytes emitted as {}",
            index.len(),
            asset.size(),
            asset.file_name
        ),
        context: None,
    });

    tracing::info!(
        components = index.len(),
        bytes = asset.size(),
        asset = %asset.file_name,
        "component locator asset synthesized"
    );

    Ok(Some(LocatorArtifact {
        index,
        context,
        asset,
        script_src: opts.script_src(),
        diagnostics,
    }))
}
