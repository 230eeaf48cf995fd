//! Node.js bindings for JS build hosts.
//!
//! JSON strings in, JSON strings out, so a JS plugin shim can forward its
//! module list and options without mirroring every type.

use std::path::PathBuf;

use napi_derive::napi;

use crate::{
    build_component_index, html, locate_build, script, BuildInput, BuildMode, ComponentIndex,
    LocatorOptions, ModuleRecord, ProjectContext,
};

fn parse_options(options_json: &str) -> napi::Result<LocatorOptions> {
    if options_json.trim().is_empty() {
        return Ok(LocatorOptions::default());
    }
    serde_json::from_str(options_json)
        .map_err(|e| napi::Error::from_reason(format!("Options parse error: {}", e)))
}

fn parse_modules(modules_json: &str) -> napi::Result<Vec<ModuleRecord>> {
    let ids: Vec<String> = serde_json::from_str(modules_json)
        .map_err(|e| napi::Error::from_reason(format!("Modules parse error: {}", e)))?;
    Ok(ids.iter().map(|id| ModuleRecord::from_module_id(id)).collect())
}

/// `modules_json`: array of resource paths. Returns the index as a JSON object.
#[napi]
pub fn build_component_index_native(
    modules_json: String,
    root: String,
    options_json: String,
) -> napi::Result<String> {
    let options = parse_options(&options_json)?;
    let modules = parse_modules(&modules_json)?;
    let index = build_component_index(&modules, &PathBuf::from(root), &options);
    serde_json::to_string(&index)
        .map_err(|e| napi::Error::from_reason(format!("Serialize error: {}", e)))
}

/// Render the runtime script for an index produced by
/// `build_component_index_native`.
#[napi]
pub fn synthesize_script_native(
    index_json: String,
    root: String,
    options_json: String,
) -> napi::Result<String> {
    let options = parse_options(&options_json)?;
    let index: ComponentIndex = serde_json::from_str(&index_json)
        .map_err(|e| napi::Error::from_reason(format!("Index parse error: {}", e)))?;
    script::synthesize_script(&index, &ProjectContext::new(root), &options)
        .map_err(|e| napi::Error::from_reason(e.to_string()))
}

/// Whole build-time half. Returns `null` (as JSON) when inactive for `mode`.
#[napi]
pub fn locate_build_native(
    modules_json: String,
    root: String,
    mode: String,
    options_json: String,
) -> napi::Result<String> {
    let options = parse_options(&options_json)?;
    let mode: BuildMode = serde_json::from_value(serde_json::Value::String(mode))
        .map_err(|e| napi::Error::from_reason(format!("Mode parse error: {}", e)))?;
    let input = BuildInput {
        modules: parse_modules(&modules_json)?,
        root: PathBuf::from(root),
        mode,
    };
    let artifact =
        locate_build(&input, &options).map_err(|e| napi::Error::from_reason(e.to_string()))?;
    serde_json::to_string(&artifact)
        .map_err(|e| napi::Error::from_reason(format!("Serialize error: {}", e)))
}

#[napi]
pub fn inject_script_native(markup: String, script_src: String, anchor: String) -> String {
    html::inject_script_reference(&markup, &script_src, &anchor)
}
