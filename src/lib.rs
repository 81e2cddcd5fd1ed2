//! # vesture
//!
//! Declarative presentation rules for UI components, resolved into tags,
//! classes, styles, and attributes, plus a fluent builder for the render tree
//! those components emit into.
//!
//! A component declares its presentation on its type and fields with
//! `#[derive(Reflect)]`; the rules are folded once per type into a cached
//! descriptor, and resolved against each instance's current values at render
//! time. The host framework supplies the [`tree::TreeConsumer`] the output
//! goes to.
//!
//! ## Core Systems
//!
//! - **[`rules`]**: Rule sum type, type/capability/property metadata, merged descriptors and their cache
//! - **[`resolve`]**: Class, style, attribute, and tag-name resolution
//! - **[`fluent`]**: Key/rule state for fluent class-token providers
//! - **[`component`]**: Component traits, type handles, built-in capabilities
//! - **[`composition`]**: Slotmap arena of mounted instances with soft ancestor links
//! - **[`pipeline`]**: Lifecycle state machine, interceptor chain, render driver
//! - **[`tree`]**: Tree-consumer sink, content fragments, fluent tree builder
//! - **[`testing`]**: Markup writer and rendering helpers for assertions
//!
//! ## Example
//!
//! ```ignore
//! use vesture::prelude::*;
//!
//! #[derive(Labeled)]
//! enum Color {
//!     Primary,
//!     #[label("danger")]
//!     Red,
//! }
//!
//! #[derive(Reflect)]
//! #[component(tag = "button", class = "btn", capabilities(HasDisabled))]
//! struct Button {
//!     #[class("btn-{0}")]
//!     color: Color,
//!     disabled: bool,
//!     #[unmatched]
//!     attributes: Attributes,
//! }
//!
//! impl Component for Button {}
//! ```

// Foundation
pub mod attributes;
pub mod config;
pub mod error;
pub mod value;

// Metadata and resolution
pub mod component;
pub mod fluent;
pub mod resolve;
pub mod rules;

// Composition and rendering
pub mod composition;
pub mod pipeline;
pub mod tree;

// Testing
pub mod testing;

// Lets the derives' `::vesture::` paths resolve inside this crate.
extern crate self as vesture;

pub use error::{Error, Result};

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use vesture_macros::{Labeled, Reflect};

/// Everything a component definition usually needs.
pub mod prelude {
    pub use crate::attributes::{Attributes, ClassList};
    pub use crate::component::{
        Capability, Component, ComponentType, HasActive, HasChildContent, HasDisabled, HasForm,
        HasOnClick, Reflect, TypeHandle,
    };
    pub use crate::config::ResolverConfig;
    pub use crate::error::{Error, Result};
    pub use crate::fluent::{FluentRuleProvider, RuleState};
    pub use crate::pipeline::{Interceptor, Pipeline};
    pub use crate::resolve::Resolver;
    pub use crate::tree::{fragment, RenderFragment, TreeConsumer, TreeConsumerExt};
    pub use crate::value::{Callback, EnumLabel, ToValue, Value};

    #[cfg(feature = "macros")]
    pub use vesture_macros::{Labeled, Reflect};
}
