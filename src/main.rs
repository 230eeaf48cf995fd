use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use serde::{Deserialize, Serialize};

use component_locator::logging::{init_logging, LogConfig};
use component_locator::{locate_build, BuildInput, BuildMode, Diagnostic, LocatorOptions, ModuleRecord};

/// Payload read from stdin, sent by a non-Rust build host after a build.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LocatorInput {
    /// Build root directory.
    root: PathBuf,
    mode: BuildMode,
    /// Absolute resource paths of the compiled modules.
    modules: Vec<String>,
    #[serde(default)]
    options: LocatorOptions,
    /// Generated page markup to inject the script reference into.
    #[serde(default)]
    html: Option<String>,
}

#[derive(Debug, Serialize)]
struct LocatorSummary {
    active: bool,
    components: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    asset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    script_src: Option<String>,
    diagnostics: Vec<Diagnostic>,
}

fn main() {
    if let Err(err) = init_logging(LogConfig::from_env()) {
        eprintln!("[component-locator] logging disabled: {}", err);
    }
    if let Err(err) = run() {
        eprintln!("[component-locator] {}", err);
        process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let out_dir = parse_out_dir()?;

    let mut stdin_payload = String::new();
    io::stdin()
        .read_to_string(&mut stdin_payload)
        .map_err(|e| format!("failed to read stdin: {e}"))?;

    if stdin_payload.trim().is_empty() {
        return Err("stdin payload is empty".into());
    }

    let payload: LocatorInput =
        serde_json::from_str(&stdin_payload).map_err(|e| format!("invalid input JSON: {e}"))?;
    validate_payload(&payload)?;

    let input = BuildInput {
        modules: payload
            .modules
            .iter()
            .map(|m| ModuleRecord::from_module_id(m))
            .collect(),
        root: payload.root.clone(),
        mode: payload.mode,
    };

    let artifact = locate_build(&input, &payload.options).map_err(|e| e.to_string())?;

    fs::create_dir_all(&out_dir)
        .map_err(|e| format!("failed to create output dir '{}': {e}", out_dir.display()))?;

    let summary = match artifact {
        Some(artifact) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .map_err(|e| format!("failed to start runtime: {e}"))?;
            let asset_path = runtime
                .block_on(artifact.write_to_disk(&out_dir))
                .map_err(|e| format!("failed to write locator asset: {e}"))?;

            if let Some(html) = &payload.html {
                let patched = artifact.inject_into(html, &payload.options);
                write_file(&out_dir.join("index.html"), &patched)?;
            }

            LocatorSummary {
                active: true,
                components: artifact.index.len(),
                asset: Some(asset_path.display().to_string()),
                script_src: Some(artifact.script_src),
                diagnostics: artifact.diagnostics,
            }
        }
        None => {
            // Inert: pages pass through untouched.
            if let Some(html) = &payload.html {
                write_file(&out_dir.join("index.html"), html)?;
            }
            LocatorSummary {
                active: false,
                components: 0,
                asset: None,
                script_src: None,
                diagnostics: Vec::new(),
            }
        }
    };

    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| format!("failed to serialize summary: {e}"))?;
    println!("{json}");

    Ok(())
}

fn parse_out_dir() -> Result<PathBuf, String> {
    let mut out_dir: Option<PathBuf> = None;
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out-dir" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --out-dir".to_string())?;
                out_dir = Some(PathBuf::from(value));
            }
            _ => {
                return Err(format!(
                    "unknown argument '{arg}'. usage: component-locator --out-dir <path>"
                ));
            }
        }
    }

    out_dir.ok_or_else(|| "required flag missing: --out-dir <path>".to_string())
}

fn validate_payload(payload: &LocatorInput) -> Result<(), String> {
    if payload.root.as_os_str().is_empty() {
        return Err("input.root must be a non-empty path".into());
    }
    if !payload.root.is_absolute() {
        return Err(format!(
            "input.root must be absolute, got '{}'",
            payload.root.display()
        ));
    }
    if let Some(module) = payload.modules.iter().find(|m| m.trim().is_empty()) {
        return Err(format!("input.modules contains an empty entry: {module:?}"));
    }
    payload.options.validate().map_err(|e| e.to_string())
}

fn write_file(path: &Path, content: &str) -> Result<(), String> {
    fs::write(path, content).map_err(|e| format!("failed to write '{}': {e}", path.display()))
}
