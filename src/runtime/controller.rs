//! Click resolution state machine and the lifecycle controller that owns
//! the runtime binding.
//!
//! Per click: Idle -> (trigger?) -> Resolving(element) -> Found | climb to
//! parent -> ... -> Exhausted. A Found path goes to the editor launch.
//!
//! Listener lifecycle: Uninstalled -> Installed -> Uninstalled. The
//! controller always cleans up before installing, so at most one listener
//! is attached at any time.

use std::rc::Rc;
use std::sync::Arc;

use crate::config::{Editor, LocatorOptions, TriggerKey};
use crate::index::{ComponentIndex, ProjectContext};

use super::dom::Element;
use super::editor::editor_uri;
use super::host::{BrowserHost, ListenerId};
use super::strategy::IntrospectionStrategy;

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Outcome of resolving a single element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementResolution {
    /// Mapped absolute path.
    Found(String),
    /// No attachment point, no file, or the file has no index entry.
    NotFound,
}

/// Terminal outcome of a DOM climb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(String),
    Exhausted,
}

/// Resolve one element without climbing.
///
/// A file found by a strategy that has no index entry is a miss for this
/// element; lower-priority strategies are not consulted for it.
pub fn resolve_element(
    element: &Element,
    index: &ComponentIndex,
    context: &ProjectContext,
) -> ElementResolution {
    let Some((strategy, file)) = IntrospectionStrategy::probe(element) else {
        return ElementResolution::NotFound;
    };

    let key = context.index_key(file);
    match index.get(key) {
        Some(path) => {
            tracing::debug!(strategy = strategy.name(), file, key, path, "component resolved");
            ElementResolution::Found(path.to_string())
        }
        None => {
            tracing::debug!(strategy = strategy.name(), file, key, "file not in component index");
            ElementResolution::NotFound
        }
    }
}

/// Resolve `target`, climbing parent elements until one resolves.
pub fn resolve(
    target: &Rc<Element>,
    index: &ComponentIndex,
    context: &ProjectContext,
) -> Resolution {
    let mut element = Some(target);
    while let Some(current) = element {
        if let ElementResolution::Found(path) = resolve_element(current, index, context) {
            return Resolution::Found(path);
        }
        element = current.parent_element();
    }
    tracing::debug!(tag = %target.tag, "no component path found");
    Resolution::Exhausted
}

// ---------------------------------------------------------------------------
// Click Events
// ---------------------------------------------------------------------------

/// A click delivered to the document listener.
#[derive(Debug)]
pub struct ClickEvent {
    pub target: Rc<Element>,
    pub ctrl_key: bool,
    pub meta_key: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl ClickEvent {
    pub fn new(target: &Rc<Element>) -> Self {
        Self {
            target: Rc::clone(target),
            ctrl_key: false,
            meta_key: false,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta_key = true;
        self
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// What the listener did with a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// No listener installed, or the trigger condition did not hold.
    PassedThrough,
    /// Suppressed, but no element in the ancestry resolved.
    Exhausted,
    /// Suppressed and the editor URI was assigned to the location.
    Launched { path: String, uri: String },
    /// Suppressed and resolved, but the editor has no URI scheme.
    UnsupportedEditor { path: String, editor: String },
}

// ---------------------------------------------------------------------------
// Lifecycle Controller
// ---------------------------------------------------------------------------

/// Process-wide state while the locator is installed.
#[derive(Debug, Clone)]
pub struct RuntimeBinding {
    pub index: Arc<ComponentIndex>,
    pub context: ProjectContext,
    pub listener: ListenerId,
}

/// Owner of the single runtime binding.
pub struct LocatorController<H: BrowserHost> {
    host: H,
    index: Arc<ComponentIndex>,
    context: ProjectContext,
    trigger: TriggerKey,
    editor: Editor,
    binding: Option<RuntimeBinding>,
    next_listener: ListenerId,
}

impl<H: BrowserHost> LocatorController<H> {
    pub fn new(
        host: H,
        index: ComponentIndex,
        context: ProjectContext,
        opts: &LocatorOptions,
    ) -> Self {
        Self {
            host,
            index: Arc::new(index),
            context,
            trigger: opts.trigger_key,
            editor: opts.editor.clone(),
            binding: None,
            next_listener: 1,
        }
    }

    /// Reset, then install the click listener and publish the snapshot.
    pub fn initialize(&mut self) {
        self.cleanup();

        let listener = self.next_listener;
        self.next_listener += 1;

        self.host.publish(&self.index, &self.context);
        self.host.add_click_listener(listener);
        self.binding = Some(RuntimeBinding {
            index: Arc::clone(&self.index),
            context: self.context.clone(),
            listener,
        });

        tracing::debug!(
            listener,
            components = self.index.len(),
            context = self.context.as_str(),
            "component locator initialized"
        );
    }

    /// Remove the listener and the published state. No-op when clean.
    pub fn cleanup(&mut self) {
        let Some(binding) = self.binding.take() else {
            return;
        };
        self.host.remove_click_listener(binding.listener);
        self.host.unpublish();
        tracing::debug!(listener = binding.listener, "component locator cleaned up");
    }

    /// Tear down and rebuild after a hot update.
    pub fn reinitialize(&mut self) {
        self.initialize();
    }

    /// Replace the snapshot with a newer build's and reinitialize.
    pub fn reinitialize_with(&mut self, index: ComponentIndex, context: ProjectContext) {
        self.index = Arc::new(index);
        self.context = context;
        self.initialize();
    }

    pub fn is_installed(&self) -> bool {
        self.binding.is_some()
    }

    pub fn binding(&self) -> Option<&RuntimeBinding> {
        self.binding.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Deliver a click to the installed listener.
    pub fn handle_click(&mut self, event: &mut ClickEvent) -> ClickOutcome {
        let Some(binding) = self.binding.as_ref() else {
            return ClickOutcome::PassedThrough;
        };
        if !self.trigger.is_satisfied(event.ctrl_key, event.meta_key) {
            return ClickOutcome::PassedThrough;
        }

        event.prevent_default();
        event.stop_propagation();

        match resolve(&event.target, &binding.index, &binding.context) {
            Resolution::Found(path) => self.launch(path),
            Resolution::Exhausted => ClickOutcome::Exhausted,
        }
    }

    /// Navigate to the editor URI for `path`.
    pub fn launch(&mut self, path: String) -> ClickOutcome {
        match editor_uri(&self.editor, &path) {
            Some(uri) => {
                tracing::info!(editor = %self.editor, %uri, "opening file in editor");
                self.host.assign_location(&uri);
                ClickOutcome::Launched { path, uri }
            }
            None => {
                tracing::warn!(editor = %self.editor, "unsupported editor");
                ClickOutcome::UnsupportedEditor {
                    path,
                    editor: self.editor.to_string(),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Hot Update Decorator
// ---------------------------------------------------------------------------

/// Wraps a pre-existing hot-update notifier: the original runs first, then
/// the controller is reinitialized.
pub struct HotUpdateHook<F: FnMut()> {
    original: Option<F>,
}

impl<F: FnMut()> HotUpdateHook<F> {
    pub fn wrap(original: Option<F>) -> Self {
        Self { original }
    }

    pub fn has_original(&self) -> bool {
        self.original.is_some()
    }

    pub fn notify<H: BrowserHost>(&mut self, controller: &mut LocatorController<H>) {
        if let Some(original) = self.original.as_mut() {
            original();
        }
        controller.reinitialize();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
