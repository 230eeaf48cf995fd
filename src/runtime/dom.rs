//! Element and component-instance model.
//!
//! Elements link to their parent element; component instances link to
//! their parent instance. Both chains are shared, single-threaded trees.

use std::rc::Rc;

/// A live component instance of the instance-chain framework shape.
///
/// `file` is the component definition's source path, when the build
/// recorded one. Instances without it are skipped while walking upward.
#[derive(Debug, Default)]
pub struct ComponentInstance {
    pub file: Option<String>,
    pub parent: Option<Rc<ComponentInstance>>,
}

impl ComponentInstance {
    /// Root instance defined in `file`.
    pub fn defined_in(file: &str) -> Rc<Self> {
        Rc::new(Self {
            file: Some(file.to_string()),
            parent: None,
        })
    }

    /// Root instance with no recorded definition file.
    pub fn anonymous() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Child of `parent`, optionally defined in `file`.
    pub fn child_of(parent: &Rc<Self>, file: Option<&str>) -> Rc<Self> {
        Rc::new(Self {
            file: file.map(str::to_string),
            parent: Some(Rc::clone(parent)),
        })
    }
}

/// A component instance of the options framework shape: a single level,
/// no ancestry.
#[derive(Debug, Default, Clone)]
pub struct OptionsInstance {
    pub file: Option<String>,
}

/// A DOM element with its optional framework attachment points.
#[derive(Debug, Default)]
pub struct Element {
    pub tag: String,
    parent: Option<Rc<Element>>,
    /// Instance-chain attachment point.
    pub component: Option<Rc<ComponentInstance>>,
    /// Options attachment point.
    pub options: Option<OptionsInstance>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent: &Rc<Element>) -> Self {
        self.parent = Some(Rc::clone(parent));
        self
    }

    pub fn with_component(mut self, instance: &Rc<ComponentInstance>) -> Self {
        self.component = Some(Rc::clone(instance));
        self
    }

    pub fn with_options_file(mut self, file: &str) -> Self {
        self.options = Some(OptionsInstance {
            file: Some(file.to_string()),
        });
        self
    }

    pub fn into_rc(self) -> Rc<Self> {
        Rc::new(self)
    }

    pub fn parent_element(&self) -> Option<&Rc<Element>> {
        self.parent.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_link_parents() {
        let root = Element::new("body").into_rc();
        let child = Element::new("div").with_parent(&root).into_rc();
        assert_eq!(child.parent_element().map(|p| p.tag.as_str()), Some("body"));
        assert!(root.parent_element().is_none());

        let app = ComponentInstance::defined_in("/p/src/App.vue");
        let inner = ComponentInstance::child_of(&app, None);
        assert!(inner.file.is_none());
        assert_eq!(
            inner.parent.as_ref().and_then(|p| p.file.as_deref()),
            Some("/p/src/App.vue")
        );
    }
}
