//! Index Builder tests: admission filters and key shape.

use std::path::{Path, PathBuf};

use component_locator::{build_component_index, LocatorOptions, ModuleRecord};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn root() -> PathBuf {
    PathBuf::from("/proj")
}

fn modules(paths: &[&str]) -> Vec<ModuleRecord> {
    paths.iter().map(|p| ModuleRecord::from_resource(*p)).collect()
}

fn key(parts: &[&str]) -> String {
    parts
        .iter()
        .collect::<PathBuf>()
        .to_string_lossy()
        .into_owned()
}

// ===========================================================================
// Admission
// ===========================================================================

/// Every module passing both filters yields exactly one entry keyed by its
/// root-relative path.
#[test]
fn admitted_modules_get_one_entry_each() {
    let records = modules(&[
        "/proj/src/App.vue",
        "/proj/src/components/Button.vue",
        "/proj/src/main.ts",
        "/proj/src/views/Home.tsx",
    ]);
    let index = build_component_index(&records, &root(), &LocatorOptions::default());

    assert_eq!(index.len(), 4);
    assert_eq!(index.get(&key(&["src", "App.vue"])), Some("/proj/src/App.vue"));
    assert_eq!(
        index.get(&key(&["src", "components", "Button.vue"])),
        Some("/proj/src/components/Button.vue")
    );
    assert_eq!(index.get(&key(&["src", "main.ts"])), Some("/proj/src/main.ts"));
    assert_eq!(
        index.get(&key(&["src", "views", "Home.tsx"])),
        Some("/proj/src/views/Home.tsx")
    );
}

/// Modules failing the extension filter produce nothing.
#[test]
fn unlisted_extensions_are_rejected() {
    let records = modules(&[
        "/proj/src/style.css",
        "/proj/src/logo.svg",
        "/proj/src/data.json",
        "/proj/src/README",
    ]);
    let index = build_component_index(&records, &root(), &LocatorOptions::default());
    assert!(index.is_empty());
}

/// Modules outside the source prefix produce nothing.
#[test]
fn modules_outside_src_dir_are_rejected() {
    let records = modules(&[
        "/proj/node_modules/vue/dist/vue.runtime.esm.js",
        "/proj/tests/App.spec.ts",
        "/elsewhere/src/Shared.vue",
    ]);
    let index = build_component_index(&records, &root(), &LocatorOptions::default());
    assert!(index.is_empty(), "unexpected entries: {:?}", index);
}

/// The prefix test is a plain string test: a sibling directory sharing the
/// prefix is admitted too.
#[test]
fn src_dir_prefix_admits_sibling_directory() {
    let records = modules(&["/proj/src-legacy/Old.vue"]);
    let index = build_component_index(&records, &root(), &LocatorOptions::default());
    assert_eq!(
        index.get(&key(&["src-legacy", "Old.vue"])),
        Some("/proj/src-legacy/Old.vue")
    );
}

#[test]
fn custom_extensions_and_src_dir() {
    let opts = LocatorOptions {
        component_extensions: vec![".svelte".into()],
        src_dir: "app".into(),
        ..Default::default()
    };
    let records = modules(&[
        "/proj/app/Counter.svelte",
        "/proj/app/Counter.vue",
        "/proj/src/Other.svelte",
    ]);
    let index = build_component_index(&records, &root(), &opts);
    assert_eq!(index.len(), 1);
    assert!(index.contains_key(&key(&["app", "Counter.svelte"])));
}

/// Virtual modules carry no resource and are skipped.
#[test]
fn virtual_modules_are_skipped() {
    let records = vec![
        ModuleRecord::from_module_id("\0rolldown/runtime.js"),
        ModuleRecord::from_module_id("/proj/src/App.vue?vue&type=style&index=0&lang.css"),
        ModuleRecord::from_module_id("/proj/src/App.vue"),
    ];
    let index = build_component_index(&records, &root(), &LocatorOptions::default());
    assert_eq!(index.len(), 1);
}

/// The builder reads records without changing them.
#[test]
fn records_are_not_mutated() {
    let records = modules(&["/proj/src/App.vue", "/proj/lib/x.js"]);
    let before = records.clone();
    let _ = build_component_index(&records, &root(), &LocatorOptions::default());
    assert_eq!(records, before);
}

/// Each build produces an independent snapshot.
#[test]
fn later_build_supersedes_earlier_index() {
    let first = build_component_index(
        &modules(&["/proj/src/A.vue"]),
        &root(),
        &LocatorOptions::default(),
    );
    let second = build_component_index(
        &modules(&["/proj/src/B.vue"]),
        &root(),
        &LocatorOptions::default(),
    );
    assert!(first.contains_key(&key(&["src", "A.vue"])));
    assert!(!second.contains_key(&key(&["src", "A.vue"])));
    assert!(second.contains_key(&key(&["src", "B.vue"])));
}

#[test]
fn end_to_end_index_shape() {
    let index = build_component_index(
        &modules(&["/proj/src/Button.vue"]),
        Path::new("/proj"),
        &LocatorOptions::default(),
    );
    let json = serde_json::to_string(&index).unwrap();
    if cfg!(windows) {
        assert!(json.contains("Button.vue"));
    } else {
        assert_eq!(json, r#"{"src/Button.vue":"/proj/src/Button.vue"}"#);
    }
}
