//! Index Builder.
//!
//! Turns the module records of one completed build into a
//! [`ComponentIndex`]: source-relative path -> absolute resource path.
//! The index is an immutable snapshot; the next build produces a new one.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::LocatorOptions;
use crate::utils;

// ---------------------------------------------------------------------------
// ModuleRecord
// ---------------------------------------------------------------------------

/// A compiled module as reported by the host build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Host module id.
    pub id: String,
    /// Absolute on-disk path backing the module. Virtual modules have none.
    pub resource: Option<PathBuf>,
}

impl ModuleRecord {
    /// Record for a module backed by a file.
    pub fn from_resource(resource: impl Into<PathBuf>) -> Self {
        let resource = resource.into();
        Self {
            id: resource.to_string_lossy().into_owned(),
            resource: Some(resource),
        }
    }

    /// Record for a host module id. Ids with a `\0` prefix or a query string
    /// are virtual and carry no resource.
    pub fn from_module_id(id: &str) -> Self {
        let resource = if id.starts_with('\0') || id.contains('?') {
            None
        } else {
            Some(PathBuf::from(id))
        };
        Self {
            id: id.to_string(),
            resource,
        }
    }
}

// ---------------------------------------------------------------------------
// ComponentIndex
// ---------------------------------------------------------------------------

/// Source-relative path -> absolute resource path.
///
/// Ordered so the embedded literal is byte-stable across identical builds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentIndex(BTreeMap<String, String>);

impl ComponentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, key: String, resource: String) {
        self.0.insert(key, resource);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ComponentIndex {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// ProjectContext
// ---------------------------------------------------------------------------

/// Absolute project root at build time.
///
/// Only used to turn an absolute file path observed at runtime into an
/// index key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectContext(String);

impl ProjectContext {
    pub fn new(root: impl Into<String>) -> Self {
        Self(root.into())
    }

    pub fn from_path(root: &Path) -> Self {
        Self(root.to_string_lossy().into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Index key for a file path reported by a framework instance: the root
    /// prefix is stripped, then at most one leading `/` or `\`.
    pub fn index_key<'a>(&self, file: &'a str) -> &'a str {
        let rest = if self.0.is_empty() {
            file
        } else {
            file.strip_prefix(self.0.as_str()).unwrap_or(file)
        };
        rest.strip_prefix(['/', '\\']).unwrap_or(rest)
    }
}

// ---------------------------------------------------------------------------
// Index Builder
// ---------------------------------------------------------------------------

/// Build the component index for one completed build.
///
/// A module is admitted when its resource has an extension listed in
/// `componentExtensions` and its root-relative path starts with `srcDir`.
/// The prefix test is a plain string test, so `srcDir = "src"` also admits
/// `src-legacy/...`.
pub fn build_component_index<'a, I>(modules: I, root: &Path, opts: &LocatorOptions) -> ComponentIndex
where
    I: IntoIterator<Item = &'a ModuleRecord>,
{
    let mut index = ComponentIndex::new();

    for module in modules {
        let Some(resource) = module.resource.as_deref() else {
            continue;
        };

        if !opts.admits_extension(&utils::extname(resource)) {
            continue;
        }

        let relative = utils::relative_path(root, resource);
        let relative = relative.to_string_lossy();
        if !relative.starts_with(opts.src_dir.as_str()) {
            continue;
        }

        index.insert(
            relative.into_owned(),
            resource.to_string_lossy().into_owned(),
        );
    }

    tracing::debug!(
        root = %root.display(),
        components = index.len(),
        "component index built"
    );

    index
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
