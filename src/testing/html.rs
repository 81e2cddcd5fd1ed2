//! Markup rendering helpers.
//!
//! [`HtmlWriter`] is a [`TreeConsumer`] that writes markup instead of
//! recording frames, which makes rendered output easy to assert on.

use crate::component::{Component, TypeHandle};
use crate::error::Result;
use crate::pipeline::{Instance, Pipeline};
use crate::tree::{Content, ReferenceCapture, RenderFragment, TreeConsumer};
use crate::value::Value;

/// Elements written without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

#[derive(Debug)]
enum Open {
    Element(String),
    Component,
}

// ---------------------------------------------------------------------------
// HtmlWriter
// ---------------------------------------------------------------------------

/// Writes the operations it receives as markup.
///
/// - String and numeric attributes render as `name="value"`; `true` renders
///   as a bare `name`; `false`, null, and callbacks are omitted.
/// - Component nodes are transparent: their attributes are dropped and their
///   content is written in place.
/// - Keys and reference captures are ignored.
#[derive(Debug, Default)]
pub struct HtmlWriter {
    out: String,
    /// Whether the last opened start tag still lacks its closing `>`.
    tag_open: bool,
    stack: Vec<Open>,
}

impl HtmlWriter {
    /// An empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup written so far. A pending start tag may still be unterminated.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Terminate any pending start tag and return the markup.
    pub fn finish(mut self) -> String {
        self.end_start_tag();
        self.out
    }

    fn end_start_tag(&mut self) {
        if self.tag_open {
            self.out.push('>');
            self.tag_open = false;
        }
    }

    fn write_attribute(&mut self, name: &str, value: &Value) {
        match value {
            Value::Null | Value::Bool(false) | Value::Callback(_) => {}
            Value::Bool(true) => {
                self.out.push(' ');
                self.out.push_str(name);
            }
            other => {
                self.out.push(' ');
                self.out.push_str(name);
                self.out.push_str("=\"");
                escape_into(&mut self.out, &other.to_string(), true);
                self.out.push('"');
            }
        }
    }
}

impl TreeConsumer for HtmlWriter {
    fn open_element(&mut self, name: &str, _sequence: u32) {
        self.end_start_tag();
        self.out.push('<');
        self.out.push_str(name);
        self.tag_open = true;
        self.stack.push(Open::Element(name.to_owned()));
    }

    fn open_component(&mut self, _ty: TypeHandle, _sequence: u32) {
        self.end_start_tag();
        self.stack.push(Open::Component);
    }

    fn add_attribute(&mut self, _sequence: u32, name: &str, value: Value) {
        if self.tag_open && matches!(self.stack.last(), Some(Open::Element(_))) {
            self.write_attribute(name, &value);
        }
    }

    fn add_content(&mut self, _sequence: u32, content: Content) {
        self.end_start_tag();
        match content {
            Content::Text(text) => escape_into(&mut self.out, &text, false),
            Content::Markup(markup) => self.out.push_str(&markup),
            Content::Fragment(fragment) => fragment.render(self),
        }
    }

    fn set_key(&mut self, _key: Value) {}

    fn capture_reference(&mut self, _sequence: u32, _capture: ReferenceCapture) {}

    fn close_element(&mut self) {
        self.end_start_tag();
        if let Some(Open::Element(name)) = self.stack.pop() {
            if !VOID_ELEMENTS.contains(&name.as_str()) {
                self.out.push_str("</");
                self.out.push_str(&name);
                self.out.push('>');
            }
        }
    }

    fn close_component(&mut self) {
        self.end_start_tag();
        self.stack.pop();
    }
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Mount `component` in a default pipeline, run one parameter pass, and render
/// it to markup.
pub fn render_to_html<C: Component>(component: C) -> Result<String> {
    let mut pipeline = Pipeline::default();
    let mut instance = pipeline.mount(component, None);
    pipeline.set_parameters(&mut instance)?;
    render_instance(&mut pipeline, &mut instance)
}

/// Render an already prepared instance to markup.
pub fn render_instance<C: Component>(
    pipeline: &mut Pipeline,
    instance: &mut Instance<C>,
) -> Result<String> {
    let mut writer = HtmlWriter::new();
    pipeline.render(instance, &mut writer, 0)?;
    Ok(writer.finish())
}

/// Render a standalone fragment to markup.
pub fn fragment_to_html(fragment: &RenderFragment) -> String {
    let mut writer = HtmlWriter::new();
    fragment.render(&mut writer);
    writer.finish()
}

/// Run `build` against a fresh writer and return the markup.
pub fn build_html(build: impl FnOnce(&mut dyn TreeConsumer)) -> String {
    let mut writer = HtmlWriter::new();
    build(&mut writer);
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::TypeInfo;
    use crate::component::ComponentType;
    use crate::tree::{fragment, TreeConsumerExt};
    use crate::value::Callback;

    struct Slot;
    impl ComponentType for Slot {
        fn type_name() -> &'static str {
            "Slot"
        }
        fn type_info() -> TypeInfo {
            TypeInfo::of::<Self>()
        }
    }

    #[test]
    fn attributes_by_value_kind() {
        let html = build_html(|sink| {
            sink.element("button", 0)
                .attribute("type", "submit")
                .attribute("tabindex", 2)
                .attribute("disabled", true)
                .attribute("hidden", false)
                .attribute("onclick", Callback::new(|_| {}))
                .attribute("title", "a \"quoted\" <b>")
                .text("Go")
                .close();
        });
        assert_eq!(
            html,
            r#"<button type="submit" tabindex="2" disabled title="a &quot;quoted&quot; &lt;b&gt;">Go</button>"#
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let html = build_html(|sink| {
            sink.element("p", 0).text("a").close();
            sink.element("br", 1).close();
            sink.element("input", 2).attribute("value", "x").close();
            sink.element("span", 3).close();
        });
        assert_eq!(html, r#"<p>a</p><br><input value="x"><span></span>"#);
    }

    #[test]
    fn text_is_escaped_markup_is_not() {
        let html = build_html(|sink| {
            sink.element("div", 0).text("1 < 2 & 3").markup("<em>raw</em>").close();
        });
        assert_eq!(html, "<div>1 &lt; 2 &amp; 3<em>raw</em></div>");
    }

    #[test]
    fn components_are_transparent() {
        let html = build_html(|sink| {
            sink.component::<Slot>(0)
                .attribute("title", "dropped")
                .children(|inner| inner.element("b", 0).text("kept").close())
                .close();
        });
        assert_eq!(html, "<b>kept</b>");
    }

    #[test]
    fn nested_fragments_render_in_place() {
        let list = fragment(|sink| {
            sink.element("ul", 0)
                .children(|items| {
                    for (i, label) in ["one", "two"].into_iter().enumerate() {
                        items.element("li", 0).key(i as i64).text(label).close();
                    }
                })
                .close();
        });
        assert_eq!(fragment_to_html(&list), "<ul><li>one</li><li>two</li></ul>");
    }
}
