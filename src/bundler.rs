//! Rolldown Bundler Configuration
//!
//! Helpers that create a Rolldown bundler with the locator plugin attached
//! and the build root set, so that module ids are absolute paths under the
//! same root the index is made relative to.

use std::path::PathBuf;
use std::sync::Arc;

use rolldown::{Bundler, BundlerBuilder, BundlerOptions, InputItem};

use crate::config::LocatorOptions;
use crate::plugin::asset_store::AssetStore;
use crate::plugin::LocatorPlugin;
use crate::{BuildMode, LocatorError};

/// Create a Rolldown bundler for `entry` with the locator plugin.
pub fn create_locator_bundler(
    entry: &str,
    root: impl Into<PathBuf>,
    mode: BuildMode,
    options: LocatorOptions,
) -> Result<Bundler, LocatorError> {
    let root = root.into();
    let plugin = LocatorPlugin::new(root.clone(), options)?.with_mode(mode);
    build(entry, root, plugin, false)
}

/// Create a Rolldown bundler for Dev Mode (InMemory store + sourcemaps).
pub fn create_dev_bundler(
    entry: &str,
    root: impl Into<PathBuf>,
    options: LocatorOptions,
    store: Arc<AssetStore>,
) -> Result<Bundler, LocatorError> {
    let root = root.into();
    let plugin = LocatorPlugin::new(root.clone(), options)?
        .with_mode(BuildMode::Dev)
        .with_store(store);
    build(entry, root, plugin, true)
}

fn build(
    entry: &str,
    root: PathBuf,
    plugin: LocatorPlugin,
    sourcemaps: bool,
) -> Result<Bundler, LocatorError> {
    let options = BundlerOptions {
        input: Some(vec![InputItem {
            name: Some("index".into()),
            import: entry.into(),
        }]),
        cwd: Some(root),
        format: Some(rolldown_common::OutputFormat::Esm),
        platform: Some(rolldown_common::Platform::Browser),
        sourcemap: if sourcemaps {
            Some(rolldown_common::SourceMapType::File)
        } else {
            None
        },
        ..Default::default()
    };

    BundlerBuilder::default()
        .with_options(options)
        .with_plugins(vec![Arc::new(plugin)])
        .build()
        .map_err(|e| LocatorError::Build(format!("Rolldown init failed: {:?}", e)))
}
