//! LocatorPlugin - Rolldown Plugin that emits the component locator runtime
//!
//! Implements the Rolldown Plugin trait to:
//! 1. Record every module that goes through `transform`
//! 2. Build the component index once the bundle is generated
//! 3. Emit the runtime script as an asset in `generate_bundle`
//! 4. Mirror outputs into an optional in-memory store and inject the
//!    script reference into stored pages
//!
//! Outside development builds (and without `forceEnable`) the plugin is
//! inert: it registers no hooks.

pub mod asset_store;

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use arcstr::ArcStr;
use dashmap::DashMap;
use rolldown_common::{EmittedAsset, Output, StrOrBytes};
use rolldown_plugin::{
    HookGenerateBundleArgs, HookTransformArgs, HookUsage, Plugin, PluginContext,
    SharedTransformPluginContext,
};

use crate::config::LocatorOptions;
use crate::index::ModuleRecord;
use crate::{locate_build, BuildInput, BuildMode, LocatorArtifact, LocatorError};

use asset_store::{AssetRegistry, AssetStore};

/// The Component Locator Plugin for Rolldown
#[derive(Debug)]
pub struct LocatorPlugin {
    options: LocatorOptions,
    /// Build root (project root) the index is made relative to.
    root: PathBuf,
    mode: BuildMode,
    /// Module records seen during the build, keyed by module id.
    modules: Arc<DashMap<String, ModuleRecord>>,
    /// In-memory asset store for Dev Server (optional)
    store: Option<Arc<AssetStore>>,
    /// Artifact of the most recent generated bundle.
    latest: Arc<RwLock<Option<LocatorArtifact>>>,
}

impl LocatorPlugin {
    pub fn new(root: impl Into<PathBuf>, options: LocatorOptions) -> Result<Self, LocatorError> {
        options.validate()?;
        Ok(Self {
            options,
            root: root.into(),
            mode: BuildMode::Prod,
            modules: Arc::new(DashMap::new()),
            store: None,
            latest: Arc::new(RwLock::new(None)),
        })
    }

    pub fn with_mode(mut self, mode: BuildMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_store(mut self, store: Arc<AssetStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn is_active(&self) -> bool {
        self.options.is_active(self.mode)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Record a module reported by the host.
    pub fn record_module(&self, id: &str) {
        self.modules
            .insert(id.to_string(), ModuleRecord::from_module_id(id));
    }

    /// Snapshot of the recorded modules as build input, sorted by id.
    pub fn build_input(&self) -> BuildInput {
        let mut modules: Vec<ModuleRecord> =
            self.modules.iter().map(|r| r.value().clone()).collect();
        modules.sort_by(|a, b| a.id.cmp(&b.id));
        BuildInput {
            modules,
            root: self.root.clone(),
            mode: self.mode,
        }
    }

    /// Artifact produced by the latest `generate_bundle`.
    pub fn latest_artifact(&self) -> Option<LocatorArtifact> {
        self.latest.read().ok().and_then(|latest| latest.clone())
    }

    fn store_latest(&self, artifact: LocatorArtifact) -> anyhow::Result<()> {
        let mut latest = self
            .latest
            .write()
            .map_err(|_| anyhow::anyhow!("component locator: artifact lock poisoned"))?;
        *latest = Some(artifact);
        Ok(())
    }
}

impl Plugin for LocatorPlugin {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("component-locator")
    }

    fn register_hook_usage(&self) -> HookUsage {
        if self.is_active() {
            HookUsage::Transform | HookUsage::GenerateBundle
        } else {
            HookUsage::empty()
        }
    }

    /// Record the module; the code is passed through untouched.
    fn transform(
        &self,
        _ctx: SharedTransformPluginContext,
        args: &HookTransformArgs<'_>,
    ) -> impl std::future::Future<Output = rolldown_plugin::HookTransformReturn> + Send {
        if self.is_active() {
            let id = args.id.to_string();
            self.record_module(&id);
        }
        async move { Ok(None) }
    }

    /// Build the index and emit the runtime asset
    async fn generate_bundle(
        &self,
        ctx: &PluginContext,
        args: &mut HookGenerateBundleArgs<'_>,
    ) -> rolldown_plugin::HookNoopReturn {
        let input = self.build_input();
        let Some(artifact) = locate_build(&input, &self.options)
            .map_err(|e| anyhow::anyhow!("component locator: {}", e))?
        else {
            return Ok(());
        };

        // 1. Populate Store (if present)
        if let Some(store) = &self.store {
            for output in args.bundle.iter() {
                match output {
                    Output::Asset(a) => {
                        let source = match &a.source {
                            StrOrBytes::Str(s) => s.to_string(),
                            StrOrBytes::Bytes(b) => String::from_utf8_lossy(b).to_string(),
                        };
                        store.emit(&a.filename, source);
                    }
                    Output::Chunk(c) => {
                        store.emit(&c.filename, c.code.clone());
                    }
                }
            }
            store.emit(&artifact.asset.file_name, artifact.asset.source.clone());
            let pages = store.inject_markup(&artifact.script_src, &self.options.markup_anchor);
            tracing::debug!(pages, "script reference injected into stored pages");
        }

        // 2. Emit the runtime asset
        let asset = EmittedAsset {
            name: None,
            file_name: Some(ArcStr::from(artifact.asset.file_name.as_str())),
            original_file_name: None,
            source: artifact.asset.source.clone().into_bytes().into(),
        };
        ctx.emit_file(asset, None, None)?;

        self.store_latest(artifact)?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
