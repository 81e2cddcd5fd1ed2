//! Declared metadata: what a type, capability, or property says about itself.
//!
//! These structs are the raw, unmerged declarations. `#[derive(Reflect)]`
//! generates them; they can equally be built by hand. The merge into a
//! [`ComponentDescriptor`](super::descriptor::ComponentDescriptor) happens once
//! per type.

use crate::component::{Capability, ComponentType, TypeHandle};

use super::rule::{AttributeRule, BooleanClassRule, ClassRule, NullClassRule, Rule, StyleRule};

// ---------------------------------------------------------------------------
// PropertyInfo
// ---------------------------------------------------------------------------

/// Rules declared on a single property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: &'static str,
    pub rules: Vec<Rule>,
}

impl PropertyInfo {
    /// A property with no rules yet.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    /// Add a rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn class(self, rule: ClassRule) -> Self {
        self.rule(Rule::Class(rule))
    }

    pub fn boolean_class(self, rule: BooleanClassRule) -> Self {
        self.rule(Rule::BooleanClass(rule))
    }

    pub fn null_class(self, rule: NullClassRule) -> Self {
        self.rule(Rule::NullClass(rule))
    }

    pub fn style(self, rule: StyleRule) -> Self {
        self.rule(Rule::Style(rule))
    }

    pub fn attribute(self, rule: AttributeRule) -> Self {
        self.rule(Rule::Attribute(rule))
    }
}

// ---------------------------------------------------------------------------
// CapabilityInfo
// ---------------------------------------------------------------------------

/// Default rules carried by a capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityInfo {
    pub name: &'static str,
    pub tag: Option<String>,
    /// Whole-type rules.
    pub rules: Vec<Rule>,
    pub properties: Vec<PropertyInfo>,
}

impl CapabilityInfo {
    /// A capability with no defaults yet.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            tag: None,
            rules: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Default tag for carriers of this capability.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Add a whole-type rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add a property default.
    pub fn property(mut self, property: PropertyInfo) -> Self {
        self.properties.push(property);
        self
    }
}

// ---------------------------------------------------------------------------
// ParentRequirement
// ---------------------------------------------------------------------------

/// "This component must be nested inside `parent`."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentRequirement {
    pub parent: TypeHandle,
    /// When set, rendering without the ancestor is allowed.
    pub optional: bool,
}

// ---------------------------------------------------------------------------
// TypeInfo
// ---------------------------------------------------------------------------

/// Everything a component type declares about its presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub handle: TypeHandle,
    pub tag: Option<String>,
    /// Whole-type rules.
    pub rules: Vec<Rule>,
    pub base: Option<Box<TypeInfo>>,
    /// Capabilities in declaration order.
    pub capabilities: Vec<CapabilityInfo>,
    pub parents: Vec<ParentRequirement>,
    /// Property rules in field declaration order.
    pub properties: Vec<PropertyInfo>,
}

impl TypeInfo {
    /// Declarations for `handle`, all empty.
    pub fn new(handle: TypeHandle) -> Self {
        Self {
            handle,
            tag: None,
            rules: Vec::new(),
            base: None,
            capabilities: Vec::new(),
            parents: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Empty declarations for `T`.
    pub fn of<T: ComponentType>() -> Self {
        Self::new(TypeHandle::of::<T>())
    }

    /// Display name of the declared type.
    pub fn name(&self) -> &'static str {
        self.handle.name
    }

    /// Set the element tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Add a whole-type rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add a whole-type class rule.
    pub fn class(self, rule: ClassRule) -> Self {
        self.rule(Rule::Class(rule))
    }

    /// Inherit `B`'s declarations.
    pub fn base<B: ComponentType>(mut self) -> Self {
        self.base = Some(Box::new(B::type_info()));
        self
    }

    /// Carry `C`'s defaults.
    pub fn capability<C: Capability>(mut self) -> Self {
        self.capabilities.push(C::info());
        self
    }

    /// Require rendering inside `P`.
    pub fn parent<P: ComponentType>(mut self, optional: bool) -> Self {
        self.parents.push(ParentRequirement {
            parent: TypeHandle::of::<P>(),
            optional,
        });
        self
    }

    /// Declare a property.
    pub fn property(mut self, property: PropertyInfo) -> Self {
        self.properties.push(property);
        self
    }

    /// Base types from the immediate base up to the root-most one.
    pub fn bases(&self) -> impl Iterator<Item = &TypeInfo> {
        std::iter::successors(self.base.as_deref(), |info| info.base.as_deref())
    }
}
