//! Composition: mounted component instances and their soft ancestor links.
//!
//! Every instance the pipeline mounts gets a [`ComponentId`] in a slotmap
//! arena. The host supplies each instance's enclosing component at mount time;
//! the nesting validator then resolves parent requirements against that chain
//! and registers the child with its ancestor. Registration is for enumeration
//! only: unmounting either side never unmounts the other.

pub mod node;
pub mod tree;

pub use node::{AncestorLink, ComponentEntry, ComponentId};
pub use tree::Composition;
