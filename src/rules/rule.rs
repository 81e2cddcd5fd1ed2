//! Rule model: the declarative annotations attached to types, capabilities,
//! and properties.

use crate::error::{Error, Result};

/// A single declarative rule.
///
/// Rules attached to a type or capability are *whole-type* rules; rules
/// attached to a property describe how that property's value maps to a class
/// token, style fragment, or attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Class token from a literal (`"btn"`) or template (`"btn-{0}"`).
    Class(ClassRule),
    /// Class token chosen by a boolean value.
    BooleanClass(BooleanClassRule),
    /// Class token emitted when the value is null.
    NullClass(NullClassRule),
    /// Style fragment from a literal or template.
    Style(StyleRule),
    /// HTML-like attribute.
    Attribute(AttributeRule),
}

/// Substitute `value` into a template. A template without a `{0}`
/// placeholder is treated as a prefix.
pub(crate) fn apply_template(template: &str, value: &str) -> String {
    if template.contains("{0}") {
        template.replace("{0}", value)
    } else {
        format!("{template}{value}")
    }
}

/// The template with its placeholder removed; used when a rule fires with no value.
fn literal(template: &str) -> String {
    template.replace("{0}", "")
}

// ---------------------------------------------------------------------------
// ClassRule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassRule {
    /// Literal or template text. `None` is a configuration error at first use.
    pub value: Option<String>,
    /// Ascending sort key among all class rules of a component.
    pub order: i32,
    /// Suppress this rule (used to switch off an inherited default).
    pub disabled: bool,
    /// On a whole-type rule: prepend the base type's class rule.
    pub concat_with_base: bool,
}

impl ClassRule {
    /// A rule with a literal or `{0}` template.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// A rule with neither literal nor template.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set the sort key.
    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Switch the rule off, e.g. to silence an inherited default.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Prepend the base type's class rule on a whole-type rule.
    pub fn concat_with_base(mut self, concat: bool) -> Self {
        self.concat_with_base = concat;
        self
    }

    /// The token emitted when the rule fires without a value.
    pub fn literal(&self, owner: &str) -> Result<String> {
        self.template(owner).map(literal)
    }

    /// The token emitted for `value`.
    pub fn format(&self, owner: &str, value: &str) -> Result<String> {
        self.template(owner).map(|t| apply_template(t, value))
    }

    fn template(&self, owner: &str) -> Result<&str> {
        self.value.as_deref().ok_or_else(|| Error::EmptyRule {
            owner: owner.to_owned(),
        })
    }
}

// ---------------------------------------------------------------------------
// BooleanClassRule / NullClassRule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanClassRule {
    pub when_true: Option<String>,
    pub when_false: Option<String>,
}

impl BooleanClassRule {
    /// A rule with a token for each value.
    pub fn new(when_true: impl Into<String>, when_false: impl Into<String>) -> Self {
        Self {
            when_true: Some(when_true.into()),
            when_false: Some(when_false.into()),
        }
    }

    /// Only emit a token when the value is `true`.
    pub fn when_true(token: impl Into<String>) -> Self {
        Self {
            when_true: Some(token.into()),
            when_false: None,
        }
    }

    /// The token for `value`, if one is set.
    pub fn token(&self, value: bool) -> Option<&str> {
        if value {
            self.when_true.as_deref()
        } else {
            self.when_false.as_deref()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullClassRule {
    pub fallback: String,
}

impl NullClassRule {
    /// A rule emitting `fallback` for null values.
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// StyleRule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRule {
    pub value: Option<String>,
    pub order: i32,
    pub disabled: bool,
}

impl StyleRule {
    /// A declaration literal or `{0}` template.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Set the sort key.
    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Switch the rule off.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// The declaration emitted without a value.
    pub fn literal(&self, owner: &str) -> Result<String> {
        self.template(owner).map(literal)
    }

    /// The declaration emitted for `value`.
    pub fn format(&self, owner: &str, value: &str) -> Result<String> {
        self.template(owner).map(|t| apply_template(t, value))
    }

    fn template(&self, owner: &str) -> Result<&str> {
        self.value.as_deref().ok_or_else(|| Error::EmptyRule {
            owner: owner.to_owned(),
        })
    }
}

// ---------------------------------------------------------------------------
// AttributeRule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeRule {
    /// Attribute name; defaults to the property name.
    pub name: Option<String>,
    /// Fixed value. May contain `{0}` to format the property value.
    pub value: Option<String>,
    pub order: i32,
}

impl AttributeRule {
    /// An attribute named after its property.
    pub fn new() -> Self {
        Self::default()
    }

    /// An attribute with an explicit name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Emit `value` instead of the property value.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the sort key.
    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// The fixed value, formatted with `raw` when it carries a placeholder.
    pub fn fixed_value(&self, raw: &str) -> Option<String> {
        self.value.as_deref().map(|v| {
            if v.contains("{0}") {
                v.replace("{0}", raw)
            } else {
                v.to_owned()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_substitutes_placeholder() {
        assert_eq!(apply_template("btn-{0}", "primary"), "btn-primary");
        assert_eq!(apply_template("{0}-lg", "col"), "col-lg");
    }

    #[test]
    fn literal_without_placeholder_is_prefix() {
        assert_eq!(apply_template("m-", "3"), "m-3");
        assert_eq!(apply_template("", "raw"), "raw");
    }

    #[test]
    fn class_rule_literal_strips_placeholder() {
        let rule = ClassRule::new("is-{0}");
        assert_eq!(rule.literal("Button").unwrap(), "is-");
        assert_eq!(ClassRule::new("active").literal("Button").unwrap(), "active");
    }

    #[test]
    fn empty_class_rule_fails_at_use() {
        let rule = ClassRule::empty();
        let err = rule.format("Button.color", "red").unwrap_err();
        assert!(matches!(err, Error::EmptyRule { ref owner } if owner == "Button.color"));
    }

    #[test]
    fn boolean_rule_tokens() {
        let rule = BooleanClassRule::new("on", "off");
        assert_eq!(rule.token(true), Some("on"));
        assert_eq!(rule.token(false), Some("off"));
        assert_eq!(BooleanClassRule::when_true("on").token(false), None);
    }

    #[test]
    fn attribute_fixed_value_formats() {
        let rule = AttributeRule::named("aria-valuenow").value("{0}%");
        assert_eq!(rule.fixed_value("40").as_deref(), Some("40%"));
        assert_eq!(AttributeRule::new().fixed_value("x"), None);
        assert_eq!(
            AttributeRule::named("role").value("button").fixed_value("x").as_deref(),
            Some("button")
        );
    }

    #[test]
    fn style_rule_formats() {
        let rule = StyleRule::new("width:{0}px").order(2);
        assert_eq!(rule.format("Box.width", "40").unwrap(), "width:40px");
        assert_eq!(rule.order, 2);
    }
}
