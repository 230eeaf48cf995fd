//! Browser host seam.
//!
//! Everything the runtime does to the outside world goes through
//! [`BrowserHost`]: listener registration on the document, publication of
//! the process-wide globals, and navigation.

use std::sync::Arc;

use crate::index::{ComponentIndex, ProjectContext};

/// Identity of an installed click listener.
pub type ListenerId = u64;

pub trait BrowserHost {
    fn add_click_listener(&mut self, listener: ListenerId);
    fn remove_click_listener(&mut self, listener: ListenerId);
    /// Publish the active index and project root as globals.
    fn publish(&mut self, index: &Arc<ComponentIndex>, context: &ProjectContext);
    /// Remove the published globals.
    fn unpublish(&mut self);
    /// Navigate the document location. Fire-and-forget.
    fn assign_location(&mut self, uri: &str);
}

/// Host that records every side effect. Used by headless drivers and tests.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub listeners: Vec<ListenerId>,
    pub published: Option<(Arc<ComponentIndex>, ProjectContext)>,
    pub navigations: Vec<String>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl BrowserHost for RecordingHost {
    fn add_click_listener(&mut self, listener: ListenerId) {
        // addEventListener ignores an identical registration
        if !self.listeners.contains(&listener) {
            self.listeners.push(listener);
        }
    }

    fn remove_click_listener(&mut self, listener: ListenerId) {
        self.listeners.retain(|l| *l != listener);
    }

    fn publish(&mut self, index: &Arc<ComponentIndex>, context: &ProjectContext) {
        self.published = Some((Arc::clone(index), context.clone()));
    }

    fn unpublish(&mut self) {
        self.published = None;
    }

    fn assign_location(&mut self, uri: &str) {
        self.navigations.push(uri.to_string());
    }
}
