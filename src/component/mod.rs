//! Component system: type metadata, reflection, capabilities.

pub mod capabilities;
pub mod traits;

pub use capabilities::{HasActive, HasChildContent, HasDisabled, HasForm, HasOnClick};
pub use traits::{Capability, Component, ComponentType, Reflect, TypeHandle};
