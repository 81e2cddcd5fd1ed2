//! Content fragments and reference captures.

use std::fmt;
use std::rc::Rc;

use super::consumer::TreeConsumer;

// ---------------------------------------------------------------------------
// RenderFragment
// ---------------------------------------------------------------------------

/// Deferred content: a function that writes into whatever sink it is given.
///
/// Nesting fragments inside fragments is how component trees compose.
#[derive(Clone)]
pub struct RenderFragment(Rc<dyn Fn(&mut dyn TreeConsumer)>);

impl RenderFragment {
    /// Wrap a render function.
    pub fn new(f: impl Fn(&mut dyn TreeConsumer) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Write the fragment into `sink`.
    pub fn render(&self, sink: &mut dyn TreeConsumer) {
        (self.0)(sink)
    }
}

impl fmt::Debug for RenderFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RenderFragment(..)")
    }
}

/// Shorthand for [`RenderFragment::new`].
pub fn fragment(f: impl Fn(&mut dyn TreeConsumer) + 'static) -> RenderFragment {
    RenderFragment::new(f)
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Content {
    /// Escaped text.
    Text(String),
    /// Raw markup, emitted verbatim.
    Markup(String),
    Fragment(RenderFragment),
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_owned())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<RenderFragment> for Content {
    fn from(fragment: RenderFragment) -> Self {
        Content::Fragment(fragment)
    }
}

// ---------------------------------------------------------------------------
// References
// ---------------------------------------------------------------------------

/// Handle to an emitted node, assigned by the tree consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementRef(pub u64);

/// Callback receiving the reference of the node it was attached to.
#[derive(Clone)]
pub struct ReferenceCapture(Rc<dyn Fn(ElementRef)>);

impl ReferenceCapture {
    /// Wrap a capture callback.
    pub fn new(f: impl Fn(ElementRef) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Hand `reference` to the callback.
    pub fn capture(&self, reference: ElementRef) {
        (self.0)(reference)
    }
}

impl fmt::Debug for ReferenceCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ReferenceCapture(..)")
    }
}
