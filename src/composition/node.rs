//! Composition node types: ComponentId, ComponentEntry, AncestorLink.

use slotmap::new_key_type;

use crate::component::TypeHandle;

new_key_type! {
    /// Identifier of a mounted component instance. Copy, lightweight (u64).
    pub struct ComponentId;
}

/// A mounted component instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentEntry {
    pub ty: TypeHandle,
    /// The component this one was rendered inside, as captured by the host.
    pub enclosing: Option<ComponentId>,
}

impl ComponentEntry {
    /// An entry for `ty` rendered inside `enclosing`.
    pub fn new(ty: TypeHandle, enclosing: Option<ComponentId>) -> Self {
        Self { ty, enclosing }
    }
}

/// Outcome of one parent requirement: the resolved ancestor, or `None` for an
/// optional requirement rendered without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AncestorLink {
    pub parent: TypeHandle,
    pub ancestor: Option<ComponentId>,
}
