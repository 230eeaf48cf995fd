//! Runtime Agent + Lifecycle Controller.
//!
//! Host-agnostic model of what the synthesized browser script does:
//! resolve a clicked element back to its defining source file through
//! framework introspection, then hand the file to an editor via its URI
//! scheme. The browser rendition lives in [`crate::script`]; this module is
//! the reference behaviour it follows and the seam non-browser hosts drive.

pub mod controller;
pub mod dom;
pub mod editor;
pub mod host;
pub mod strategy;

pub use controller::{
    resolve, resolve_element, ClickEvent, ClickOutcome, ElementResolution, HotUpdateHook,
    LocatorController, Resolution, RuntimeBinding,
};
pub use dom::{ComponentInstance, Element, OptionsInstance};
pub use editor::editor_uri;
pub use host::{BrowserHost, ListenerId, RecordingHost};
pub use strategy::IntrospectionStrategy;
