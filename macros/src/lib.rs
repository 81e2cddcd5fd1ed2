//! Proc macros for vesture: `#[derive(Reflect)]` component metadata and
//! `#[derive(Labeled)]` enum values.
//!
//! This crate is not meant to be used directly. Enable the `macros` feature on `vesture`.

use proc_macro::TokenStream;

mod args;
mod labeled_derive;
mod reflect_derive;

/// Derive component metadata and property access.
///
/// Generates `ComponentType` (the declared type info) and `Reflect` (property
/// values by name and the marker accessors) for a struct with named fields.
///
/// # Type attributes
///
/// `#[component(...)]` accepts:
///
/// - `tag = "button"`: element tag
/// - `class = "btn"` or `class("btn", order = 1, concat, disabled)`: whole-type class rule
/// - `style = "display:flex"` or `style("...", order = 1)`: whole-type style rule
/// - `attribute("role", value = "tab")`: whole-type attribute rule
/// - `base = Button`: metadata base type
/// - `capabilities(HasDisabled, HasActive)`: capability markers
/// - `parent(Tabs)` or `parent(Tabs, optional)`: required enclosing component
///
/// # Field attributes
///
/// - `#[class]`, `#[class("btn-{0}", order = 1, disabled)]`
/// - `#[boolean_class("on")]`, `#[boolean_class("on", "off")]`
/// - `#[null_class("none")]`
/// - `#[style("width:{0}px")]`
/// - `#[attribute]`, `#[attribute("aria-label", value = "{0}", order = 1)]`
/// - `#[unmatched]`: the `Attributes` bag merged over resolved attributes
/// - `#[child_content]`: the `RenderFragment` rendered as content
/// - `#[additional_class]`, `#[additional_style]`: free-form class and style text
/// - `#[skip]`: not readable as a property
///
/// Fields without an attribute are declared bare: readable by name, with no
/// rules of their own. A bare field never replaces a capability's rules for the
/// same property, and contributes class tokens only when its value is a
/// rule provider.
///
/// # Example
///
/// ```ignore
/// #[derive(Reflect)]
/// #[component(tag = "button", class = "btn", capabilities(HasDisabled))]
/// struct Button {
///     #[class("btn-{0}")]
///     color: Color,
///     disabled: bool,
///     #[unmatched]
///     attributes: Attributes,
/// }
/// ```
#[proc_macro_derive(
    Reflect,
    attributes(
        component,
        class,
        boolean_class,
        null_class,
        style,
        attribute,
        unmatched,
        child_content,
        additional_class,
        additional_style,
        skip
    )
)]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    reflect_derive::reflect_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Derive `ToValue` for a unit-variant enum.
///
/// ```ignore
/// #[derive(Labeled)]
/// enum Color {
///     Primary,
///     #[label("danger")]
///     Red,
/// }
/// ```
#[proc_macro_derive(Labeled, attributes(label))]
pub fn derive_labeled(input: TokenStream) -> TokenStream {
    labeled_derive::labeled_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
