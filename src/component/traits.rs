//! Component traits: static type metadata, instance reflection, rendering.
//!
//! - [`ComponentType`] is implemented once per type and yields its declared
//!   [`TypeInfo`].
//! - [`Reflect`] exposes an instance's property values and its cached
//!   descriptor. `#[derive(Reflect)]` implements both of the above.
//! - [`Component`] is the object-safe trait the pipeline drives; its only
//!   required surface is `Reflect`.

use std::any::{Any, TypeId};
use std::sync::Arc;

use crate::attributes::Attributes;
use crate::rules::{CapabilityInfo, ComponentDescriptor, TypeInfo};
use crate::tree::{RenderFragment, TreeConsumer};
use crate::value::Value;

// ---------------------------------------------------------------------------
// TypeHandle
// ---------------------------------------------------------------------------

/// Identity and display name of a component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeHandle {
    pub id: TypeId,
    pub name: &'static str,
}

impl TypeHandle {
    /// Handle of `T`.
    pub fn of<T: ComponentType>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: T::type_name(),
        }
    }

    /// Whether this handle names `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

// ---------------------------------------------------------------------------
// ComponentType / Capability
// ---------------------------------------------------------------------------

/// Static metadata of a component type.
pub trait ComponentType: 'static {
    /// Short type name used in diagnostics (`"Button"`).
    fn type_name() -> &'static str;

    /// The type's declared rules. Called at most once per type by the
    /// descriptor cache.
    fn type_info() -> TypeInfo;
}

/// A feature a component opts into, carrying default rules.
///
/// Implemented on a marker type and listed in
/// `#[component(capabilities(...))]`.
pub trait Capability: 'static {
    const NAME: &'static str;

    fn info() -> CapabilityInfo;
}

// ---------------------------------------------------------------------------
// Reflect
// ---------------------------------------------------------------------------

/// Instance-level reflection used by the resolvers.
pub trait Reflect: Any {
    /// The merged, cached descriptor of this instance's type.
    fn descriptor(&self) -> Arc<ComponentDescriptor>;

    fn type_handle(&self) -> TypeHandle;

    /// Current value of a property, or `None` if the type has no such property.
    fn property(&self, name: &str) -> Option<Value>;

    /// Catch-all attributes supplied by the user. Merged last, always winning.
    fn unmatched_attributes(&self) -> Option<&Attributes> {
        None
    }

    /// Extra class string appended after all rule tokens.
    fn additional_class(&self) -> Option<&str> {
        None
    }

    /// Extra style string appended after all rule fragments.
    fn additional_style(&self) -> Option<&str> {
        None
    }

    /// Nested content supplied by the parent.
    fn child_content(&self) -> Option<RenderFragment> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// A renderable component.
///
/// The pipeline opens the component's root element with its resolved tag and
/// attributes, runs the content interceptors, then calls
/// [`build_content`](Component::build_content) for the body.
pub trait Component: Reflect {
    fn build_content(&self, sink: &mut dyn TreeConsumer) {
        let _ = sink;
    }
}

impl dyn Component {
    /// Downcast to a concrete component type.
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}
