//! Introspection strategies.
//!
//! A closed set of framework-specific procedures for extracting a
//! component's defining source file from a live element. Strategies are
//! tried in [`IntrospectionStrategy::PRIORITY`] order; the first one that
//! yields a file wins. Supporting another framework shape means adding a
//! variant here.

use super::dom::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntrospectionStrategy {
    /// Version-3 shape: the element points at a component instance; walk the
    /// instance's parent chain until one exposes its definition file.
    InstanceChain,
    /// Version-2 shape: the element points at an instance whose options carry
    /// the definition file. No ancestry walk.
    OptionsFile,
}

impl IntrospectionStrategy {
    pub const PRIORITY: [IntrospectionStrategy; 2] = [
        IntrospectionStrategy::InstanceChain,
        IntrospectionStrategy::OptionsFile,
    ];

    pub fn name(self) -> &'static str {
        match self {
            IntrospectionStrategy::InstanceChain => "instance-chain",
            IntrospectionStrategy::OptionsFile => "options-file",
        }
    }

    /// The definition file this strategy finds on `element`, if any.
    pub fn source_file(self, element: &Element) -> Option<&str> {
        match self {
            IntrospectionStrategy::InstanceChain => {
                let mut current = element.component.as_deref();
                while let Some(instance) = current {
                    if let Some(file) = non_empty(instance.file.as_deref()) {
                        return Some(file);
                    }
                    current = instance.parent.as_deref();
                }
                None
            }
            IntrospectionStrategy::OptionsFile => element
                .options
                .as_ref()
                .and_then(|options| non_empty(options.file.as_deref())),
        }
    }

    /// First file found on `element` in priority order, with the strategy
    /// that found it.
    pub fn probe(element: &Element) -> Option<(IntrospectionStrategy, &str)> {
        Self::PRIORITY
            .iter()
            .find_map(|strategy| strategy.source_file(element).map(|file| (*strategy, file)))
    }
}

fn non_empty(file: Option<&str>) -> Option<&str> {
    file.filter(|f| !f.is_empty())
}
