//! In-memory asset registry.
//!
//! Holds emitted assets (the locator runtime, and in dev-server setups every
//! bundle output) keyed by normalized path, so they can be served from
//! memory and page markup can be patched in place.

use std::sync::Arc;

use dashmap::DashMap;

use crate::html;

/// The host's emitted-asset interface: named text assets with a byte size.
pub trait AssetRegistry {
    /// Register (or replace) an asset.
    fn emit(&self, name: &str, source: String);
    /// Source text of an asset.
    fn source(&self, name: &str) -> Option<String>;
    /// Byte length of an asset.
    fn size(&self, name: &str) -> Option<usize> {
        self.source(name).map(|s| s.len())
    }
}

/// Thread-safe in-memory asset store.
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    /// Normalized path (starts with /) -> content
    assets: Arc<DashMap<String, String>>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update asset content. The path is normalized to start with `/`.
    pub fn update(&self, path: impl Into<String>, content: String) {
        self.assets.insert(normalize(path.into()), content);
    }

    /// Retrieve asset content.
    pub fn get(&self, path: &str) -> Option<String> {
        self.assets
            .get(normalize(path.to_string()).as_str())
            .map(|r| r.value().clone())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.assets.contains_key(normalize(path.to_string()).as_str())
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// All stored paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.assets.iter().map(|r| r.key().clone()).collect();
        paths.sort();
        paths
    }

    /// Inject the script reference into every stored markup asset.
    /// Returns how many pages changed.
    pub fn inject_markup(&self, script_src: &str, anchor: &str) -> usize {
        let mut changed = 0;
        for mut entry in self.assets.iter_mut() {
            if !html::is_markup_asset(entry.key()) {
                continue;
            }
            let patched = html::inject_script_reference(entry.value(), script_src, anchor);
            if patched != *entry.value() {
                *entry.value_mut() = patched;
                changed += 1;
            }
        }
        changed
    }
}

impl AssetRegistry for AssetStore {
    fn emit(&self, name: &str, source: String) {
        self.update(name, source);
    }

    fn source(&self, name: &str) -> Option<String> {
        self.get(name)
    }
}

fn normalize(path: String) -> String {
    if path.starts_with('/') {
        path
    } else {
        format!("/{}", path)
    }
}
