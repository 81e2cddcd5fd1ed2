//! Composition arena: mount, unmount, ancestor lookup, child registration.

use std::any::TypeId;

use slotmap::{SecondaryMap, SlotMap};

use crate::component::{ComponentType, TypeHandle};

use super::node::{AncestorLink, ComponentEntry, ComponentId};

/// Mounted instances backed by a slotmap arena.
///
/// Enclosing links point from a component to the one it was rendered in.
/// Child registrations point the other way and are append-only; they hold no
/// ownership, so enumeration skips children that have since been unmounted.
#[derive(Debug, Default)]
pub struct Composition {
    nodes: SlotMap<ComponentId, ComponentEntry>,
    links: SecondaryMap<ComponentId, Vec<AncestorLink>>,
    children: SecondaryMap<ComponentId, Vec<ComponentId>>,
}

impl Composition {
    /// An empty composition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount an instance of `ty` rendered inside `enclosing`.
    ///
    /// An enclosing id that is no longer mounted is treated as absent.
    pub fn mount(&mut self, ty: TypeHandle, enclosing: Option<ComponentId>) -> ComponentId {
        let enclosing = enclosing.filter(|id| self.nodes.contains_key(*id));
        let id = self.nodes.insert(ComponentEntry::new(ty, enclosing));
        tracing::trace!(component = ty.name, ?id, ?enclosing, "mounted");
        id
    }

    /// Unmount one instance. Registered children stay mounted.
    pub fn unmount(&mut self, id: ComponentId) -> Option<ComponentEntry> {
        let entry = self.nodes.remove(id)?;
        self.links.remove(id);
        self.children.remove(id);
        tracing::trace!(component = entry.ty.name, ?id, "unmounted");
        Some(entry)
    }

    /// The entry of a mounted instance.
    pub fn get(&self, id: ComponentId) -> Option<&ComponentEntry> {
        self.nodes.get(id)
    }

    /// Whether `id` is still mounted.
    pub fn contains(&self, id: ComponentId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of mounted instances.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Mounted enclosing components, nearest first.
    pub fn ancestors(&self, id: ComponentId) -> impl Iterator<Item = ComponentId> + '_ {
        let first = self.nodes.get(id).and_then(|e| e.enclosing);
        std::iter::successors(first, move |current| {
            self.nodes.get(*current).and_then(|e| e.enclosing)
        })
        .take_while(move |current| self.nodes.contains_key(*current))
    }

    /// Nearest enclosing component whose type is `parent`.
    pub fn captured_ancestor(&self, id: ComponentId, parent: TypeId) -> Option<ComponentId> {
        self.ancestors(id)
            .find(|ancestor| self.nodes.get(*ancestor).is_some_and(|e| e.ty.id == parent))
    }

    /// Record `child` under `ancestor`. Repeated registration is a no-op.
    pub fn register_child(&mut self, ancestor: ComponentId, child: ComponentId) {
        if !self.nodes.contains_key(ancestor) {
            return;
        }
        let Some(children) = self.children.entry(ancestor) else {
            return;
        };
        let children = children.or_default();
        if !children.contains(&child) {
            children.push(child);
        }
    }

    /// Record how one parent requirement of `child` was resolved.
    pub fn link(&mut self, child: ComponentId, link: AncestorLink) {
        let Some(entry) = self.links.entry(child) else {
            return;
        };
        let links = entry.or_default();
        match links.iter_mut().find(|l| l.parent == link.parent) {
            Some(slot) => *slot = link,
            None => links.push(link),
        }
    }

    /// Every recorded parent resolution of `id`.
    pub fn links(&self, id: ComponentId) -> &[AncestorLink] {
        self.links.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// The resolved ancestor of type `P`, if `id` declared that requirement
    /// and the ancestor was present.
    pub fn ancestor_of<P: ComponentType>(&self, id: ComponentId) -> Option<ComponentId> {
        self.links(id)
            .iter()
            .find(|l| l.parent.is::<P>())
            .and_then(|l| l.ancestor)
    }

    /// Registered children still mounted, in registration order.
    pub fn children_of(&self, id: ComponentId) -> Vec<ComponentId> {
        self.children
            .get(id)
            .map(|children| {
                children
                    .iter()
                    .copied()
                    .filter(|c| self.nodes.contains_key(*c))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Registered children of type `T` still mounted.
    pub fn children_of_type<T: ComponentType>(&self, id: ComponentId) -> Vec<ComponentId> {
        self.children_of(id)
            .into_iter()
            .filter(|c| self.nodes.get(*c).is_some_and(|e| e.ty.is::<T>()))
            .collect()
    }
}
