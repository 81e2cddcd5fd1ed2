//! Test helpers: render components and fragments to markup.
//!
//! Use [`render_to_html`] to push a component through a default pipeline and
//! get its markup back, or [`HtmlWriter`] directly as the sink of any builder
//! or pipeline call.

pub mod html;

pub use html::{build_html, fragment_to_html, render_instance, render_to_html, HtmlWriter};
