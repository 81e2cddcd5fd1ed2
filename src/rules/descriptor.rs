//! Merged per-type descriptors and their process-wide cache.
//!
//! [`ComponentDescriptor::build`] folds a [`TypeInfo`] (plus its bases and
//! capabilities) into flat rule tables and pre-sorted resolution plans. The
//! result depends only on static metadata, so it is built at most once per
//! type and shared through [`DescriptorCache`].

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::component::{Capability, ComponentType, TypeHandle};

use super::metadata::{CapabilityInfo, ParentRequirement, PropertyInfo, TypeInfo};
use super::order::{RuleOrder, RuleOrigin};
use super::rule::{AttributeRule, BooleanClassRule, ClassRule, NullClassRule, Rule, StyleRule};

// ---------------------------------------------------------------------------
// PropertyDescriptor
// ---------------------------------------------------------------------------

/// The effective rules of one property after the capability/base/type overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: &'static str,
    /// Capability or type whose declaration won the overlay.
    pub declared_by: &'static str,
    pub class: Option<ClassRule>,
    pub boolean: Option<BooleanClassRule>,
    pub null: Option<NullClassRule>,
    pub style: Option<StyleRule>,
    pub attribute: Option<AttributeRule>,
}

impl PropertyDescriptor {
    fn compile(info: &PropertyInfo, declared_by: &'static str) -> Self {
        let mut compiled = Self {
            name: info.name,
            declared_by,
            class: None,
            boolean: None,
            null: None,
            style: None,
            attribute: None,
        };
        for rule in &info.rules {
            match rule {
                Rule::Class(r) => compiled.class = Some(r.clone()),
                Rule::BooleanClass(r) => compiled.boolean = Some(r.clone()),
                Rule::NullClass(r) => compiled.null = Some(r.clone()),
                Rule::Style(r) => compiled.style = Some(r.clone()),
                Rule::Attribute(r) => compiled.attribute = Some(r.clone()),
            }
        }
        compiled
    }

    /// Whether the property's class rule switches its class output off.
    pub fn class_disabled(&self) -> bool {
        self.class.as_ref().is_some_and(|c| c.disabled)
    }

    fn class_order(&self) -> i32 {
        self.class.as_ref().map_or(0, |c| c.order)
    }
}

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

/// What a plan step resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Index into the whole-type rule table of the plan's kind.
    Type(usize),
    /// Index into [`ComponentDescriptor::properties`].
    Property(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanEntry {
    pub order: RuleOrder,
    pub target: Target,
}

/// A whole-type rule with the name of the type or capability declaring it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WholeTypeRule<R> {
    pub declared_by: &'static str,
    pub rule: R,
}

// ---------------------------------------------------------------------------
// ComponentDescriptor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDescriptor {
    handle: TypeHandle,
    tag: Option<String>,
    capabilities: Vec<&'static str>,
    parents: Vec<ParentRequirement>,
    type_classes: Vec<WholeTypeRule<ClassRule>>,
    type_styles: Vec<WholeTypeRule<StyleRule>>,
    type_attributes: Vec<WholeTypeRule<AttributeRule>>,
    properties: Vec<PropertyDescriptor>,
    class_plan: Vec<PlanEntry>,
    style_plan: Vec<PlanEntry>,
    attribute_plan: Vec<PlanEntry>,
}

impl ComponentDescriptor {
    /// Merge declared metadata into a descriptor.
    pub fn build(info: &TypeInfo) -> Self {
        let capabilities = collect_capabilities(info);

        let mut type_classes = Vec::new();
        let mut type_styles = Vec::new();
        let mut type_attributes: Vec<WholeTypeRule<AttributeRule>> = Vec::new();
        let mut class_plan = Vec::new();
        let mut style_plan = Vec::new();
        let mut attribute_plan = Vec::new();

        // Whole-type rules from capabilities, in declaration order.
        let mut class_contributors = Vec::new();
        for cap in &capabilities {
            for rule in &cap.rules {
                match rule {
                    Rule::Class(r) if !r.disabled => {
                        let index = type_classes.len();
                        class_plan.push(PlanEntry {
                            order: RuleOrder::new(r.order, RuleOrigin::Capability, index as u32),
                            target: Target::Type(index),
                        });
                        type_classes.push(WholeTypeRule {
                            declared_by: cap.name,
                            rule: r.clone(),
                        });
                        if !class_contributors.contains(&cap.name) {
                            class_contributors.push(cap.name);
                        }
                    }
                    Rule::Style(r) if !r.disabled => {
                        let index = type_styles.len();
                        style_plan.push(PlanEntry {
                            order: RuleOrder::new(r.order, RuleOrigin::Capability, index as u32),
                            target: Target::Type(index),
                        });
                        type_styles.push(WholeTypeRule {
                            declared_by: cap.name,
                            rule: r.clone(),
                        });
                    }
                    Rule::Attribute(r) => {
                        overlay_attribute(&mut type_attributes, cap.name, r);
                    }
                    Rule::Class(_) | Rule::Style(_) => {}
                    Rule::BooleanClass(_) | Rule::NullClass(_) => {
                        tracing::trace!(
                            capability = cap.name,
                            "value rule declared at capability level has no property and is ignored"
                        );
                    }
                }
            }
        }
        if class_contributors.len() > 1 {
            tracing::warn!(
                component = info.name(),
                capabilities = ?class_contributors,
                "several capabilities declare whole-type class rules; resolving in declaration order"
            );
        }

        // Whole-type rules from the type and its bases.
        for (declared_by, rule) in class_chain(info) {
            let index = type_classes.len();
            class_plan.push(PlanEntry {
                order: RuleOrder::new(rule.order, RuleOrigin::Type, index as u32),
                target: Target::Type(index),
            });
            type_classes.push(WholeTypeRule { declared_by, rule });
        }
        if let Some((declared_by, rule)) = style_chain(info) {
            let index = type_styles.len();
            style_plan.push(PlanEntry {
                order: RuleOrder::new(rule.order, RuleOrigin::Type, index as u32),
                target: Target::Type(index),
            });
            type_styles.push(WholeTypeRule { declared_by, rule });
        }
        let bases: Vec<&TypeInfo> = info.bases().collect();
        for ty in bases.iter().rev().copied().chain(std::iter::once(info)) {
            for rule in &ty.rules {
                if let Rule::Attribute(r) = rule {
                    overlay_attribute(&mut type_attributes, ty.name(), r);
                }
            }
        }
        for (index, attr) in type_attributes.iter().enumerate() {
            let origin = if capabilities.iter().any(|c| c.name == attr.declared_by) {
                RuleOrigin::Capability
            } else {
                RuleOrigin::Type
            };
            attribute_plan.push(PlanEntry {
                order: RuleOrder::new(attr.rule.order, origin, index as u32),
                target: Target::Type(index),
            });
        }

        // Property rules: capability defaults, then bases, then the type itself.
        let mut merged: Vec<(&'static str, &PropertyInfo)> = Vec::new();
        for cap in &capabilities {
            for property in &cap.properties {
                overlay_property(&mut merged, cap.name, property);
            }
        }
        for base in bases.iter().rev() {
            for property in &base.properties {
                overlay_property(&mut merged, base.name(), property);
            }
        }
        for property in &info.properties {
            overlay_property(&mut merged, info.name(), property);
        }
        let properties: Vec<PropertyDescriptor> = merged
            .into_iter()
            .map(|(declared_by, p)| PropertyDescriptor::compile(p, declared_by))
            .collect();

        for (index, property) in properties.iter().enumerate() {
            let position = index as u32;
            // Every property is planned: one with no class rule can still
            // carry rule-provider tokens.
            if !property.class_disabled() {
                class_plan.push(PlanEntry {
                    order: RuleOrder::new(property.class_order(), RuleOrigin::Property, position),
                    target: Target::Property(index),
                });
            }
            if let Some(style) = property.style.as_ref().filter(|s| !s.disabled) {
                style_plan.push(PlanEntry {
                    order: RuleOrder::new(style.order, RuleOrigin::Property, position),
                    target: Target::Property(index),
                });
            }
            if let Some(attr) = &property.attribute {
                attribute_plan.push(PlanEntry {
                    order: RuleOrder::new(attr.order, RuleOrigin::Property, position),
                    target: Target::Property(index),
                });
            }
        }

        class_plan.sort_by_key(|e| e.order);
        style_plan.sort_by_key(|e| e.order);
        attribute_plan.sort_by_key(|e| e.order);

        let tag = info
            .tag
            .clone()
            .or_else(|| info.bases().find_map(|b| b.tag.clone()))
            .or_else(|| capabilities.iter().find_map(|c| c.tag.clone()));

        let mut parents = info.parents.clone();
        for base in info.bases() {
            for requirement in &base.parents {
                if !parents.iter().any(|p| p.parent == requirement.parent) {
                    parents.push(*requirement);
                }
            }
        }

        Self {
            handle: info.handle,
            tag,
            capabilities: capabilities.iter().map(|c| c.name).collect(),
            parents,
            type_classes,
            type_styles,
            type_attributes,
            properties,
            class_plan,
            style_plan,
            attribute_plan,
        }
    }

    /// Handle of the described type.
    pub fn handle(&self) -> TypeHandle {
        self.handle
    }

    /// Display name of the described type.
    pub fn type_name(&self) -> &'static str {
        self.handle.name
    }

    /// Tag declared by the type, its nearest base, or its first capability.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Capability names, bases' first, in declaration order.
    pub fn capabilities(&self) -> &[&'static str] {
        &self.capabilities
    }

    pub fn has_capability<C: Capability>(&self) -> bool {
        self.capabilities.contains(&C::NAME)
    }

    /// Parent requirements of the type and its bases.
    pub fn parents(&self) -> &[ParentRequirement] {
        &self.parents
    }

    /// Merged properties in planning order.
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// The merged property called `name`.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn type_classes(&self) -> &[WholeTypeRule<ClassRule>] {
        &self.type_classes
    }

    pub fn type_styles(&self) -> &[WholeTypeRule<StyleRule>] {
        &self.type_styles
    }

    pub fn type_attributes(&self) -> &[WholeTypeRule<AttributeRule>] {
        &self.type_attributes
    }

    /// Class sources in emission order.
    pub fn class_plan(&self) -> &[PlanEntry] {
        &self.class_plan
    }

    /// Style sources in emission order.
    pub fn style_plan(&self) -> &[PlanEntry] {
        &self.style_plan
    }

    /// Attribute sources in emission order.
    pub fn attribute_plan(&self) -> &[PlanEntry] {
        &self.attribute_plan
    }
}

/// Capabilities of the root-most base first, then each derived type's own,
/// de-duplicated by name at first occurrence.
fn collect_capabilities(info: &TypeInfo) -> Vec<&CapabilityInfo> {
    let mut chain: Vec<&TypeInfo> = info.bases().collect();
    chain.reverse();
    chain.push(info);

    let mut capabilities: Vec<&CapabilityInfo> = Vec::new();
    for ty in chain {
        for cap in &ty.capabilities {
            if !capabilities.iter().any(|c| c.name == cap.name) {
                capabilities.push(cap);
            }
        }
    }
    capabilities
}

/// The type's own class rule, preceded by its base chain when it asks to
/// concatenate. A type with no class rule inherits its base's.
fn class_chain(info: &TypeInfo) -> Vec<(&'static str, ClassRule)> {
    let own = info.rules.iter().find_map(|r| match r {
        Rule::Class(c) => Some(c),
        _ => None,
    });
    match own {
        Some(rule) if rule.disabled => Vec::new(),
        Some(rule) => {
            let mut chain = if rule.concat_with_base {
                info.base.as_deref().map(class_chain).unwrap_or_default()
            } else {
                Vec::new()
            };
            chain.push((info.name(), rule.clone()));
            chain
        }
        None => info.base.as_deref().map(class_chain).unwrap_or_default(),
    }
}

fn style_chain(info: &TypeInfo) -> Option<(&'static str, StyleRule)> {
    let own = info.rules.iter().find_map(|r| match r {
        Rule::Style(s) => Some(s),
        _ => None,
    });
    match own {
        Some(rule) if rule.disabled => None,
        Some(rule) => Some((info.name(), rule.clone())),
        None => info.base.as_deref().and_then(style_chain),
    }
}

/// Replace a same-named attribute rule in place, or append.
fn overlay_attribute(
    rules: &mut Vec<WholeTypeRule<AttributeRule>>,
    declared_by: &'static str,
    rule: &AttributeRule,
) {
    let entry = WholeTypeRule {
        declared_by,
        rule: rule.clone(),
    };
    match rules.iter_mut().find(|r| r.rule.name == rule.name) {
        Some(slot) => *slot = entry,
        None => rules.push(entry),
    }
}

/// Replace a same-named property in place, or append.
fn overlay_property<'a>(
    merged: &mut Vec<(&'static str, &'a PropertyInfo)>,
    declared_by: &'static str,
    property: &'a PropertyInfo,
) {
    match merged.iter_mut().find(|(_, p)| p.name == property.name) {
        // a bare declaration only makes the property readable
        Some(_) if property.rules.is_empty() => {}
        Some(slot) => *slot = (declared_by, property),
        None => merged.push((declared_by, property)),
    }
}

// ---------------------------------------------------------------------------
// DescriptorCache
// ---------------------------------------------------------------------------

/// Per-type descriptor cache.
///
/// Reads take a shared lock. A miss takes the exclusive lock, re-checks, then
/// builds and publishes, so concurrent first accessors wait for the single
/// build instead of observing a partial descriptor.
#[derive(Debug, Default)]
pub struct DescriptorCache {
    entries: RwLock<HashMap<TypeId, Arc<ComponentDescriptor>>>,
}

impl DescriptorCache {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache.
    pub fn global() -> &'static DescriptorCache {
        static CACHE: OnceLock<DescriptorCache> = OnceLock::new();
        CACHE.get_or_init(DescriptorCache::new)
    }

    /// The cached descriptor of `T`, built on first request.
    pub fn get_or_build<T: ComponentType>(&self) -> Arc<ComponentDescriptor> {
        let id = TypeId::of::<T>();
        if let Some(descriptor) = self.entries.read().get(&id) {
            return Arc::clone(descriptor);
        }

        let mut entries = self.entries.write();
        if let Some(descriptor) = entries.get(&id) {
            return Arc::clone(descriptor);
        }
        let descriptor = Arc::new(ComponentDescriptor::build(&T::type_info()));
        tracing::debug!(
            component = descriptor.type_name(),
            properties = descriptor.properties().len(),
            capabilities = descriptor.capabilities().len(),
            "built component descriptor"
        );
        entries.insert(id, Arc::clone(&descriptor));
        descriptor
    }

    /// Whether `T` has been built already.
    pub fn contains<T: ComponentType>(&self) -> bool {
        self.entries.read().contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Descriptor for `T` from the global cache.
pub fn descriptor_of<T: ComponentType>() -> Arc<ComponentDescriptor> {
    DescriptorCache::global().get_or_build::<T>()
}
