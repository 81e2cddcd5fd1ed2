//! Attribute resolution from declared attribute rules.

use crate::attributes::Attributes;
use crate::component::Component;
use crate::error::{Error, Result};
use crate::rules::{AttributeRule, PropertyDescriptor, Target};
use crate::value::Value;

use super::Resolver;

impl Resolver {
    /// Attributes produced by declared rules only, in ascending rule order.
    ///
    /// `class`, `style`, and the unmatched attributes are layered on top by
    /// [`resolve_attributes`](Resolver::resolve_attributes).
    pub fn resolve_declared_attributes(&self, component: &dyn Component) -> Result<Attributes> {
        let descriptor = component.descriptor();
        let mut attributes = Attributes::new();

        for entry in descriptor.attribute_plan() {
            match entry.target {
                Target::Type(index) => {
                    let declared = &descriptor.type_attributes()[index];
                    let name = declared.rule.name.clone().ok_or_else(|| Error::EmptyRule {
                        owner: declared.declared_by.to_owned(),
                    })?;
                    let value = declared
                        .rule
                        .value
                        .clone()
                        .map_or(Value::Bool(true), Value::Str);
                    attributes.insert(name, value);
                }
                Target::Property(index) => {
                    let property = &descriptor.properties()[index];
                    let Some(rule) = property.attribute.as_ref() else {
                        continue;
                    };
                    let value = component.property(property.name).unwrap_or_default();
                    if let Some(value) = attribute_value(property, rule, value) {
                        let name = rule
                            .name
                            .clone()
                            .unwrap_or_else(|| self.config.attribute_name(property.name));
                        attributes.insert(name, value);
                    }
                }
            }
        }
        Ok(attributes)
    }
}

/// The emitted value for one property, or `None` when the attribute is omitted.
fn attribute_value(property: &PropertyDescriptor, rule: &AttributeRule, value: Value) -> Option<Value> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some(Value::Str(
            rule.fixed_value("true")
                .unwrap_or_else(|| property.name.to_lowercase()),
        )),
        Value::Enum(label) => {
            let token = label.token();
            Some(Value::Str(rule.fixed_value(&token).unwrap_or(token)))
        }
        Value::Callback(_) => Some(value),
        other => match rule.fixed_value(&other.to_string()) {
            Some(fixed) => Some(Value::Str(fixed)),
            None => Some(other),
        },
    }
}
