//! Runtime Agent tests: resolution climb, trigger condition, editor launch.

use std::rc::Rc;

use component_locator::runtime::{
    editor_uri, resolve, ClickEvent, ClickOutcome, ComponentInstance, Element, LocatorController,
    RecordingHost, Resolution,
};
use component_locator::{ComponentIndex, Editor, LocatorOptions, ProjectContext, TriggerKey};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn context() -> ProjectContext {
    ProjectContext::new("/proj")
}

fn index() -> ComponentIndex {
    [
        ("src/App.vue", "/proj/src/App.vue"),
        ("src/Button.vue", "/proj/src/Button.vue"),
        ("src/Card.vue", "/proj/src/Card.vue"),
    ]
    .into_iter()
    .collect()
}

fn installed(opts: LocatorOptions) -> LocatorController<RecordingHost> {
    let mut controller = LocatorController::new(RecordingHost::new(), index(), context(), &opts);
    controller.initialize();
    controller
}

fn button_in_app() -> Rc<Element> {
    let app_instance = ComponentInstance::defined_in("/proj/src/App.vue");
    let button_instance = ComponentInstance::child_of(&app_instance, Some("/proj/src/Button.vue"));
    let body = Element::new("body").into_rc();
    let app = Element::new("div")
        .with_parent(&body)
        .with_component(&app_instance)
        .into_rc();
    Element::new("button")
        .with_parent(&app)
        .with_component(&button_instance)
        .into_rc()
}

// ===========================================================================
// Resolution
// ===========================================================================

/// Instance chain: the walk stops at the first instance exposing a file,
/// not a deeper ancestor.
#[test]
fn instance_chain_stops_at_nearest_file() {
    let app = ComponentInstance::defined_in("/proj/src/App.vue");
    let card = ComponentInstance::child_of(&app, Some("/proj/src/Card.vue"));
    let slot = ComponentInstance::child_of(&card, None);
    let el = Element::new("span").with_component(&slot).into_rc();

    assert_eq!(
        resolve(&el, &index(), &context()),
        Resolution::Found("/proj/src/Card.vue".into())
    );
}

/// Options shape: the element's own file is used; its DOM ancestors are
/// not consulted.
#[test]
fn options_file_resolves_on_the_element_itself() {
    let parent = Element::new("div")
        .with_options_file("/proj/src/App.vue")
        .into_rc();
    let el = Element::new("button")
        .with_parent(&parent)
        .with_options_file("/proj/src/Button.vue")
        .into_rc();

    assert_eq!(
        resolve(&el, &index(), &context()),
        Resolution::Found("/proj/src/Button.vue".into())
    );
}

/// Elements without attachment points are climbed past.
#[test]
fn climbs_to_nearest_resolving_ancestor() {
    let card = Element::new("section")
        .with_options_file("/proj/src/Card.vue")
        .into_rc();
    let inner = Element::new("div").with_parent(&card).into_rc();
    let leaf = Element::new("em").with_parent(&inner).into_rc();

    assert_eq!(
        resolve(&leaf, &index(), &context()),
        Resolution::Found("/proj/src/Card.vue".into())
    );
}

/// A file without an index entry is a miss for that element; the climb
/// continues.
#[test]
fn index_miss_continues_climbing() {
    let app = Element::new("div")
        .with_options_file("/proj/src/App.vue")
        .into_rc();
    let vendor_instance = ComponentInstance::defined_in("/proj/node_modules/ui/Tooltip.vue");
    let tooltip = Element::new("div")
        .with_parent(&app)
        .with_component(&vendor_instance)
        .into_rc();

    assert_eq!(
        resolve(&tooltip, &index(), &context()),
        Resolution::Found("/proj/src/App.vue".into())
    );
}

#[test]
fn no_attachment_anywhere_is_exhausted() {
    let body = Element::new("body").into_rc();
    let p = Element::new("p").with_parent(&body).into_rc();
    assert_eq!(resolve(&p, &index(), &context()), Resolution::Exhausted);
}

#[test]
fn windows_style_file_strips_one_backslash() {
    let index: ComponentIndex = [("src\\App.vue", "C:\\proj\\src\\App.vue")]
        .into_iter()
        .collect();
    let el = Element::new("div")
        .with_options_file("C:\\proj\\src\\App.vue")
        .into_rc();
    assert_eq!(
        resolve(&el, &index, &ProjectContext::new("C:\\proj")),
        Resolution::Found("C:\\proj\\src\\App.vue".into())
    );
}

// ===========================================================================
// Trigger Condition
// ===========================================================================

#[test]
fn ctrl_trigger_ignores_meta_only_click() {
    let mut controller = installed(LocatorOptions {
        trigger_key: TriggerKey::Ctrl,
        ..Default::default()
    });
    let target = button_in_app();

    let mut meta_click = ClickEvent::new(&target).with_meta();
    assert_eq!(controller.handle_click(&mut meta_click), ClickOutcome::PassedThrough);
    assert!(!meta_click.is_default_prevented());

    let mut ctrl_click = ClickEvent::new(&target).with_ctrl();
    assert!(matches!(
        controller.handle_click(&mut ctrl_click),
        ClickOutcome::Launched { .. }
    ));
}

#[test]
fn cmd_trigger_ignores_ctrl_only_click() {
    let mut controller = installed(LocatorOptions {
        trigger_key: TriggerKey::Cmd,
        ..Default::default()
    });
    let target = button_in_app();

    let mut ctrl_click = ClickEvent::new(&target).with_ctrl();
    assert_eq!(controller.handle_click(&mut ctrl_click), ClickOutcome::PassedThrough);

    let mut meta_click = ClickEvent::new(&target).with_meta();
    assert!(matches!(
        controller.handle_click(&mut meta_click),
        ClickOutcome::Launched { .. }
    ));
}

#[test]
fn both_trigger_accepts_either_modifier() {
    let mut controller = installed(LocatorOptions::default());
    let target = button_in_app();

    for mut event in [
        ClickEvent::new(&target).with_ctrl(),
        ClickEvent::new(&target).with_meta(),
    ] {
        assert!(matches!(
            controller.handle_click(&mut event),
            ClickOutcome::Launched { .. }
        ));
        assert!(event.is_default_prevented());
        assert!(event.is_propagation_stopped());
    }
    assert_eq!(controller.host().navigations.len(), 2);
}

// ===========================================================================
// Editor Launch
// ===========================================================================

#[test]
fn vscode_uri() {
    assert_eq!(
        editor_uri(&Editor::VsCode, "/Users/a/App.vue").as_deref(),
        Some("vscode://file/Users/a/App.vue")
    );
}

#[test]
fn webstorm_uri_from_windows_path() {
    assert_eq!(
        editor_uri(&Editor::WebStorm, "C:\\proj\\App.vue").as_deref(),
        Some("webstorm://open?file=/proj/App.vue")
    );
}

#[test]
fn launch_navigates_document_location() {
    let mut controller = installed(LocatorOptions {
        editor: Editor::WebStorm,
        ..Default::default()
    });
    let target = button_in_app();
    let mut event = ClickEvent::new(&target).with_ctrl();

    assert_eq!(
        controller.handle_click(&mut event),
        ClickOutcome::Launched {
            path: "/proj/src/Button.vue".into(),
            uri: "webstorm://open?file=/proj/src/Button.vue".into(),
        }
    );
    assert_eq!(
        controller.host().navigations,
        vec!["webstorm://open?file=/proj/src/Button.vue".to_string()]
    );
}

#[test]
fn unsupported_editor_is_absorbed() {
    let mut controller = installed(LocatorOptions {
        editor: Editor::Other("emacs".into()),
        ..Default::default()
    });
    let target = button_in_app();
    let mut event = ClickEvent::new(&target).with_meta();

    assert!(matches!(
        controller.handle_click(&mut event),
        ClickOutcome::UnsupportedEditor { .. }
    ));
    assert!(controller.host().navigations.is_empty());
}
