//! Fluent tree builder.
//!
//! A [`TreeBuilder`] holds one pending node between "open" and
//! [`close`](TreeBuilder::close). Chained calls only record into the pending
//! node; nothing reaches the sink until `close`, which emits the node in a
//! fixed order:
//!
//! ```text
//! open → key → reference → attributes (merged) → contents → close
//! ```
//!
//! Attributes set more than once are merged: if every value for a name is a
//! string they are concatenated in call order, otherwise the last value wins.
//! A builder opened with a false condition records nothing and emits nothing.

use crate::attributes::Attributes;
use crate::component::{ComponentType, TypeHandle};
use crate::value::Value;

use super::consumer::TreeConsumer;
use super::content::{Content, ElementRef, ReferenceCapture, RenderFragment};

/// What a pending node opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(String),
    Component(TypeHandle),
}

#[derive(Debug)]
struct PendingNode {
    kind: NodeKind,
    sequence: u32,
    attributes: Vec<(String, Vec<Value>)>,
    key: Option<Value>,
    contents: Vec<Content>,
    capture: Option<ReferenceCapture>,
}

impl PendingNode {
    fn push_attribute(&mut self, name: String, value: Value) {
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.attributes.push((name, vec![value])),
        }
    }
}

/// Concatenate when every write was a string, otherwise keep the last write.
fn merge_values(values: Vec<Value>) -> Option<Value> {
    if values.iter().all(Value::is_string) {
        Some(Value::Str(values.iter().filter_map(Value::as_str).collect()))
    } else {
        values.into_iter().last()
    }
}

// ---------------------------------------------------------------------------
// TreeBuilder
// ---------------------------------------------------------------------------

#[must_use = "nothing is emitted until `close()` is called"]
pub struct TreeBuilder<'a, S: TreeConsumer + ?Sized> {
    sink: &'a mut S,
    node: Option<PendingNode>,
}

impl<'a, S: TreeConsumer + ?Sized> TreeBuilder<'a, S> {
    /// Open a node. With `condition == false` the builder is inert.
    pub fn open(sink: &'a mut S, kind: NodeKind, sequence: u32, condition: bool) -> Self {
        let node = condition.then(|| PendingNode {
            kind,
            sequence,
            attributes: Vec::new(),
            key: None,
            contents: Vec::new(),
            capture: None,
        });
        Self { sink, node }
    }

    /// Whether this builder will emit anything on close.
    pub fn is_active(&self) -> bool {
        self.node.is_some()
    }

    /// Record an attribute. Repeated names merge on close.
    pub fn attribute(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attribute_if(name, value, true)
    }

    /// [`attribute`](Self::attribute), skipped when `condition` is false.
    pub fn attribute_if(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
        condition: bool,
    ) -> Self {
        if let Some(node) = self.node.as_mut().filter(|_| condition) {
            node.push_attribute(name.into(), value.into());
        }
        self
    }

    /// Record every entry of a resolved attribute map.
    pub fn attributes(mut self, attributes: Attributes) -> Self {
        if let Some(node) = self.node.as_mut() {
            for (name, value) in attributes {
                node.push_attribute(name, value);
            }
        }
        self
    }

    /// Append `class` followed by a space to the `class` attribute.
    pub fn class(self, class: impl AsRef<str>) -> Self {
        self.class_if(class, true)
    }

    /// Conditional [`class`](Self::class).
    pub fn class_if(self, class: impl AsRef<str>, condition: bool) -> Self {
        let value = format!("{} ", class.as_ref());
        self.attribute_if("class", value, condition)
    }

    /// Append `style` followed by `;` to the `style` attribute.
    pub fn style(self, style: impl AsRef<str>) -> Self {
        self.style_if(style, true)
    }

    /// Conditional [`style`](Self::style).
    pub fn style_if(self, style: impl AsRef<str>, condition: bool) -> Self {
        let value = format!("{};", style.as_ref());
        self.attribute_if("style", value, condition)
    }

    /// Set the node's key. A later call replaces an earlier one.
    pub fn key(mut self, key: impl Into<Value>) -> Self {
        if let Some(node) = self.node.as_mut() {
            node.key = Some(key.into());
        }
        self
    }

    /// Capture the emitted node's reference.
    pub fn reference(mut self, capture: impl Fn(ElementRef) + 'static) -> Self {
        if let Some(node) = self.node.as_mut() {
            node.capture = Some(ReferenceCapture::new(capture));
        }
        self
    }

    /// Append a content item, emitted after the attributes.
    pub fn content(self, content: impl Into<Content>) -> Self {
        self.content_if(content, true)
    }

    /// Conditional [`content`](Self::content).
    pub fn content_if(mut self, content: impl Into<Content>, condition: bool) -> Self {
        if let Some(node) = self.node.as_mut().filter(|_| condition) {
            node.contents.push(content.into());
        }
        self
    }

    /// Append escaped text.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.content(Content::Text(text.into()))
    }

    /// Append raw markup, emitted without escaping.
    pub fn markup(self, markup: impl Into<String>) -> Self {
        self.content(Content::Markup(markup.into()))
    }

    /// Nested content built by `f` against whichever sink renders it.
    pub fn children(self, f: impl Fn(&mut dyn TreeConsumer) + 'static) -> Self {
        self.content(Content::Fragment(RenderFragment::new(f)))
    }

    /// Emit the node. Each emitted operation after the open takes the next
    /// sequence number.
    pub fn close(self) {
        let TreeBuilder { sink, node } = self;
        let Some(node) = node else {
            return;
        };

        match &node.kind {
            NodeKind::Element(name) => sink.open_element(name, node.sequence),
            NodeKind::Component(ty) => sink.open_component(*ty, node.sequence),
        }
        if let Some(key) = node.key {
            sink.set_key(key);
        }

        // Sequence numbers saturate at `u32::MAX` instead of overflowing.
        let mut sequence = node.sequence;
        let mut next = || {
            sequence = sequence.saturating_add(1);
            sequence
        };
        if let Some(capture) = node.capture {
            sink.capture_reference(next(), capture);
        }
        for (name, values) in node.attributes {
            if let Some(value) = merge_values(values) {
                sink.add_attribute(next(), &name, value);
            }
        }
        for content in node.contents {
            sink.add_content(next(), content);
        }

        match node.kind {
            NodeKind::Element(_) => sink.close_element(),
            NodeKind::Component(_) => sink.close_component(),
        }
    }
}

// ---------------------------------------------------------------------------
// TreeConsumerExt
// ---------------------------------------------------------------------------

/// Builder entry points on any [`TreeConsumer`], including `dyn TreeConsumer`.
pub trait TreeConsumerExt: TreeConsumer {
    /// Open an element at `sequence`. Operations emitted after the open
    /// number upwards from it and stop at `u32::MAX`.
    fn element(&mut self, name: impl Into<String>, sequence: u32) -> TreeBuilder<'_, Self> {
        TreeBuilder::open(self, NodeKind::Element(name.into()), sequence, true)
    }

    fn element_if(
        &mut self,
        name: impl Into<String>,
        sequence: u32,
        condition: bool,
    ) -> TreeBuilder<'_, Self> {
        TreeBuilder::open(self, NodeKind::Element(name.into()), sequence, condition)
    }

    fn component<T: ComponentType>(&mut self, sequence: u32) -> TreeBuilder<'_, Self> {
        TreeBuilder::open(self, NodeKind::Component(TypeHandle::of::<T>()), sequence, true)
    }

    fn component_if<T: ComponentType>(
        &mut self,
        sequence: u32,
        condition: bool,
    ) -> TreeBuilder<'_, Self> {
        TreeBuilder::open(
            self,
            NodeKind::Component(TypeHandle::of::<T>()),
            sequence,
            condition,
        )
    }
}

impl<S: TreeConsumer + ?Sized> TreeConsumerExt for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::TypeInfo;
    use crate::tree::consumer::{Frame, RenderTree};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Panel;
    impl ComponentType for Panel {
        fn type_name() -> &'static str {
            "Panel"
        }
        fn type_info() -> TypeInfo {
            TypeInfo::of::<Self>()
        }
    }

    #[test]
    fn string_attributes_concatenate_in_call_order() {
        let mut tree = RenderTree::new();
        tree.element("div", 0)
            .attribute("class", "x ")
            .attribute("class", "y ")
            .close();
        assert_eq!(tree.attributes(), vec![("class", &Value::from("x y "))]);
    }

    #[test]
    fn non_string_write_makes_last_write_win() {
        let mut tree = RenderTree::new();
        tree.element("div", 0)
            .attribute("disabled", true)
            .attribute("disabled", false)
            .close();
        assert_eq!(tree.attributes(), vec![("disabled", &Value::Bool(false))]);

        let mut tree = RenderTree::new();
        tree.element("div", 0)
            .attribute("title", "a")
            .attribute("title", 3)
            .attribute("title", "b")
            .close();
        assert_eq!(tree.attributes(), vec![("title", &Value::from("b"))]);
    }

    #[test]
    fn false_condition_emits_nothing() {
        let mut tree = RenderTree::new();
        let builder = tree.element_if("span", 0, false);
        assert!(!builder.is_active());
        builder.attribute("id", "z").text("hidden").close();
        assert!(tree.is_empty());
    }

    #[test]
    fn conditional_attribute_and_content() {
        let mut tree = RenderTree::new();
        tree.element("p", 0)
            .attribute_if("hidden", true, false)
            .attribute_if("id", "shown", true)
            .content_if("skipped", false)
            .text("kept")
            .close();
        assert_eq!(
            tree.into_frames(),
            vec![
                Frame::Element { sequence: 0, name: "p".into() },
                Frame::Attribute { sequence: 1, name: "id".into(), value: Value::from("shown") },
                Frame::Text { sequence: 2, text: "kept".into() },
                Frame::CloseElement,
            ]
        );
    }

    #[test]
    fn close_emits_reference_then_attributes_then_content() {
        let captured = Rc::new(Cell::new(None));
        let slot = captured.clone();
        let mut tree = RenderTree::new();
        tree.element("input", 10)
            .text("ignored by html, recorded here")
            .attribute("type", "text")
            .reference(move |r| slot.set(Some(r)))
            .key("row-1")
            .close();
        assert_eq!(
            tree.into_frames(),
            vec![
                Frame::Element { sequence: 10, name: "input".into() },
                Frame::Key(Value::from("row-1")),
                Frame::Reference { sequence: 11, reference: ElementRef(0) },
                Frame::Attribute { sequence: 12, name: "type".into(), value: Value::from("text") },
                Frame::Text { sequence: 13, text: "ignored by html, recorded here".into() },
                Frame::CloseElement,
            ]
        );
        assert_eq!(captured.get(), Some(ElementRef(0)));
    }

    #[test]
    fn attribute_order_follows_first_write() {
        let mut tree = RenderTree::new();
        tree.element("a", 0)
            .attribute("href", "/")
            .class("nav")
            .attribute("id", "home")
            .class("active")
            .close();
        assert_eq!(
            tree.attributes(),
            vec![
                ("href", &Value::from("/")),
                ("class", &Value::from("nav active ")),
                ("id", &Value::from("home")),
            ]
        );
    }

    #[test]
    fn style_helper_appends_semicolons() {
        let mut tree = RenderTree::new();
        tree.element("div", 0)
            .style("color:red")
            .style_if("display:none", false)
            .style("width:2px")
            .close();
        assert_eq!(
            tree.attributes(),
            vec![("style", &Value::from("color:red;width:2px;"))]
        );
    }

    #[test]
    fn nested_builders_compose() {
        let mut tree = RenderTree::new();
        tree.element("ul", 0)
            .children(|sink| {
                for i in 0..2 {
                    sink.element("li", 0).key(i).text(format!("item {i}")).close();
                }
            })
            .close();
        let frames = tree.into_frames();
        assert_eq!(frames.len(), 12);
        assert_eq!(frames[1], Frame::Region { sequence: 1 });
        assert_eq!(frames[2], Frame::Element { sequence: 0, name: "li".into() });
        assert_eq!(frames[3], Frame::Key(Value::Int(0)));
        assert_eq!(frames[7], Frame::Key(Value::Int(1)));
        assert_eq!(frames[10], Frame::RegionEnd);
        assert_eq!(frames[11], Frame::CloseElement);
    }

    #[test]
    fn component_nodes_close_as_components() {
        let mut tree = RenderTree::new();
        tree.component::<Panel>(3).attribute("title", "Hi").close();
        tree.component_if::<Panel>(4, false).close();
        assert_eq!(
            tree.into_frames(),
            vec![
                Frame::Component { sequence: 3, ty: TypeHandle::of::<Panel>() },
                Frame::Attribute { sequence: 4, name: "title".into(), value: Value::from("Hi") },
                Frame::CloseComponent,
            ]
        );
    }

    #[test]
    fn attributes_map_is_splatted() {
        let attrs = Attributes::new().with("id", "a").with("class", "b ");
        let mut tree = RenderTree::new();
        tree.element("div", 0).attributes(attrs).class("c").close();
        assert_eq!(
            tree.attributes(),
            vec![("id", &Value::from("a")), ("class", &Value::from("b c "))]
        );
    }

    #[test]
    fn sequence_numbers_saturate_near_the_limit() {
        let mut tree = RenderTree::new();
        tree.element("div", u32::MAX - 1)
            .attribute("id", "a")
            .attribute("title", "b")
            .text("x")
            .close();
        assert_eq!(
            tree.into_frames(),
            vec![
                Frame::Element { sequence: u32::MAX - 1, name: "div".into() },
                Frame::Attribute { sequence: u32::MAX, name: "id".into(), value: Value::from("a") },
                Frame::Attribute { sequence: u32::MAX, name: "title".into(), value: Value::from("b") },
                Frame::Text { sequence: u32::MAX, text: "x".into() },
                Frame::CloseElement,
            ]
        );
    }
}
