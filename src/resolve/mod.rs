//! Resolvers: component instance → tag, classes, style, attributes.
//!
//! A [`Resolver`] walks the pre-sorted plans of a component's cached
//! [`ComponentDescriptor`](crate::rules::ComponentDescriptor), reads property
//! values through [`Reflect`](crate::component::Reflect), and produces a
//! [`Presentation`]. Resolution is a pure function of the descriptor, the
//! instance's current values, and the [`ResolverConfig`].
//!
//! Precedence, lowest to highest:
//!
//! ```text
//! declared attribute rules < class / style < unmatched attributes
//! ```

mod attribute;
mod class;

use crate::attributes::{Attributes, ClassList};
use crate::component::Component;
use crate::config::ResolverConfig;
use crate::error::Result;

/// Everything a component's root element is rendered with.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub tag: String,
    pub classes: ClassList,
    pub style: String,
    /// Final attribute map, `class` and `style` included.
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    /// A resolver using `config`.
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// The formatting options in use.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Tag declared by the type, its nearest base, or its first capability;
    /// otherwise the configured default.
    pub fn resolve_tag_name(&self, component: &dyn Component) -> String {
        component
            .descriptor()
            .tag()
            .map_or_else(|| self.config.default_tag.clone(), str::to_owned)
    }

    /// Resolve tag, classes, style, and the final attribute map in one pass.
    pub fn resolve(&self, component: &dyn Component) -> Result<Presentation> {
        let classes = self.resolve_classes(component)?;
        let style = self.resolve_style(component)?;
        let declared = self.resolve_declared_attributes(component)?;
        let attributes = self.assemble(declared, &classes, &style, component);
        Ok(Presentation {
            tag: self.resolve_tag_name(component),
            classes,
            style,
            attributes,
        })
    }

    /// The final attribute map: declared rules, then `class` and `style`,
    /// then the unmatched attributes, which win every conflict.
    pub fn resolve_attributes(&self, component: &dyn Component) -> Result<Attributes> {
        let classes = self.resolve_classes(component)?;
        let style = self.resolve_style(component)?;
        let declared = self.resolve_declared_attributes(component)?;
        Ok(self.assemble(declared, &classes, &style, component))
    }

    fn assemble(
        &self,
        mut attributes: Attributes,
        classes: &ClassList,
        style: &str,
        component: &dyn Component,
    ) -> Attributes {
        if !classes.is_empty() || self.config.emit_empty_class {
            attributes.insert("class", classes.join(&self.config.class_separator));
        }
        if !style.is_empty() {
            attributes.insert("style", style);
        }
        if let Some(unmatched) = component.unmatched_attributes() {
            attributes.merge(unmatched);
        }
        tracing::trace!(
            component = component.type_handle().name,
            attributes = attributes.len(),
            "resolved attributes"
        );
        attributes
    }
}
