//! The tree-consumer sink and a recording implementation.
//!
//! A [`TreeConsumer`] receives primitive operations in order: open a node,
//! optionally key it, capture a reference, add attributes, add content, close.
//! The host framework supplies its own implementation; [`RenderTree`] records
//! operations as [`Frame`]s and is what the tests assert against.

use crate::component::TypeHandle;
use crate::value::Value;

use super::content::{Content, ElementRef, ReferenceCapture};

/// Primitive sink the builder and the pipeline emit into.
pub trait TreeConsumer {
    fn open_element(&mut self, name: &str, sequence: u32);

    fn open_component(&mut self, ty: TypeHandle, sequence: u32);

    fn add_attribute(&mut self, sequence: u32, name: &str, value: Value);

    fn add_content(&mut self, sequence: u32, content: Content);

    fn set_key(&mut self, key: Value);

    fn capture_reference(&mut self, sequence: u32, capture: ReferenceCapture);

    fn close_element(&mut self);

    fn close_component(&mut self);
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// One recorded operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Element { sequence: u32, name: String },
    Component { sequence: u32, ty: TypeHandle },
    Attribute { sequence: u32, name: String, value: Value },
    Text { sequence: u32, text: String },
    Markup { sequence: u32, markup: String },
    /// Start of an inlined [`RenderFragment`](super::RenderFragment).
    Region { sequence: u32 },
    RegionEnd,
    Key(Value),
    Reference { sequence: u32, reference: ElementRef },
    CloseElement,
    CloseComponent,
}

// ---------------------------------------------------------------------------
// RenderTree
// ---------------------------------------------------------------------------

/// Records operations, inlining fragments between `Region`/`RegionEnd`.
///
/// Reference captures fire immediately with sequentially numbered
/// [`ElementRef`]s.
#[derive(Debug, Default)]
pub struct RenderTree {
    frames: Vec<Frame>,
    next_reference: u64,
}

impl RenderTree {
    /// An empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded frames in emission order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Take the recorded frames.
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Attribute frames in emission order, as `(name, value)`.
    pub fn attributes(&self) -> Vec<(&str, &Value)> {
        self.frames
            .iter()
            .filter_map(|f| match f {
                Frame::Attribute { name, value, .. } => Some((name.as_str(), value)),
                _ => None,
            })
            .collect()
    }
}

impl TreeConsumer for RenderTree {
    fn open_element(&mut self, name: &str, sequence: u32) {
        self.frames.push(Frame::Element {
            sequence,
            name: name.to_owned(),
        });
    }

    fn open_component(&mut self, ty: TypeHandle, sequence: u32) {
        self.frames.push(Frame::Component { sequence, ty });
    }

    fn add_attribute(&mut self, sequence: u32, name: &str, value: Value) {
        self.frames.push(Frame::Attribute {
            sequence,
            name: name.to_owned(),
            value,
        });
    }

    fn add_content(&mut self, sequence: u32, content: Content) {
        match content {
            Content::Text(text) => self.frames.push(Frame::Text { sequence, text }),
            Content::Markup(markup) => self.frames.push(Frame::Markup { sequence, markup }),
            Content::Fragment(fragment) => {
                self.frames.push(Frame::Region { sequence });
                fragment.render(self);
                self.frames.push(Frame::RegionEnd);
            }
        }
    }

    fn set_key(&mut self, key: Value) {
        self.frames.push(Frame::Key(key));
    }

    fn capture_reference(&mut self, sequence: u32, capture: ReferenceCapture) {
        let reference = ElementRef(self.next_reference);
        self.next_reference += 1;
        self.frames.push(Frame::Reference {
            sequence,
            reference,
        });
        capture.capture(reference);
    }

    fn close_element(&mut self) {
        self.frames.push(Frame::CloseElement);
    }

    fn close_component(&mut self) {
        self.frames.push(Frame::CloseComponent);
    }
}
