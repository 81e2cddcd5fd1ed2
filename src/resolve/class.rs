//! Class and style resolution.

use crate::attributes::ClassList;
use crate::component::Component;
use crate::error::Result;
use crate::rules::{ComponentDescriptor, PropertyDescriptor, Target};
use crate::value::Value;

use super::Resolver;

impl Resolver {
    /// Class tokens in ascending rule order, de-duplicated at first position,
    /// followed by the component's additional class string.
    pub fn resolve_classes(&self, component: &dyn Component) -> Result<ClassList> {
        let descriptor = component.descriptor();
        let mut classes = ClassList::new();

        for entry in descriptor.class_plan() {
            match entry.target {
                Target::Type(index) => {
                    let declared = &descriptor.type_classes()[index];
                    classes.add(declared.rule.literal(declared.declared_by)?);
                }
                Target::Property(index) => {
                    let property = &descriptor.properties()[index];
                    let value = component.property(property.name).unwrap_or_default();
                    classes.extend(property_classes(&descriptor, property, &value)?);
                }
            }
        }
        if let Some(extra) = component.additional_class() {
            classes.add_all(extra);
        }

        tracing::trace!(
            component = descriptor.type_name(),
            classes = %classes.join(" "),
            "resolved classes"
        );
        Ok(classes)
    }

    /// Style fragments in ascending rule order joined by the configured
    /// separator, with the additional style string appended last.
    pub fn resolve_style(&self, component: &dyn Component) -> Result<String> {
        let descriptor = component.descriptor();
        let mut fragments = Vec::new();

        for entry in descriptor.style_plan() {
            match entry.target {
                Target::Type(index) => {
                    let declared = &descriptor.type_styles()[index];
                    fragments.push(declared.rule.literal(declared.declared_by)?);
                }
                Target::Property(index) => {
                    let property = &descriptor.properties()[index];
                    let value = component.property(property.name).unwrap_or_default();
                    fragments.extend(property_styles(&descriptor, property, &value)?);
                }
            }
        }
        if let Some(extra) = component.additional_style() {
            fragments.push(extra.to_owned());
        }

        let separator = &self.config.style_separator;
        let style = fragments
            .iter()
            .map(|f| f.trim().trim_end_matches(separator.as_str()))
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>()
            .join(separator);
        Ok(style)
    }
}

fn owner(descriptor: &ComponentDescriptor, property: &PropertyDescriptor) -> String {
    format!("{}.{}", descriptor.type_name(), property.name)
}

/// Tokens one property contributes for its current value.
fn property_classes(
    descriptor: &ComponentDescriptor,
    property: &PropertyDescriptor,
    value: &Value,
) -> Result<Vec<String>> {
    let class = property.class.as_ref();
    let owner = owner(descriptor, property);

    let tokens = match value {
        Value::Null => property.null.iter().map(|n| n.fallback.clone()).collect(),
        Value::Bool(flag) => {
            match property.boolean.as_ref().and_then(|b| b.token(*flag)) {
                Some(token) => vec![token.to_owned()],
                None => match class {
                    Some(rule) if *flag => vec![rule.literal(&owner)?],
                    _ => Vec::new(),
                },
            }
        }
        Value::Rules(tokens) => match class {
            Some(rule) => tokens
                .iter()
                .map(|t| rule.format(&owner, t))
                .collect::<Result<_>>()?,
            None => tokens.clone(),
        },
        Value::Callback(_) => Vec::new(),
        Value::Enum(label) => match class {
            Some(rule) => vec![rule.format(&owner, &label.token())?],
            None => Vec::new(),
        },
        other => match class {
            Some(rule) => vec![rule.format(&owner, &other.to_string())?],
            None => Vec::new(),
        },
    };
    Ok(tokens)
}

/// Style fragments one property contributes for its current value.
fn property_styles(
    descriptor: &ComponentDescriptor,
    property: &PropertyDescriptor,
    value: &Value,
) -> Result<Vec<String>> {
    let Some(rule) = property.style.as_ref() else {
        return Ok(Vec::new());
    };
    let owner = owner(descriptor, property);

    let fragments = match value {
        Value::Null | Value::Callback(_) | Value::Bool(false) => Vec::new(),
        Value::Bool(true) => vec![rule.literal(&owner)?],
        Value::Enum(label) => vec![rule.format(&owner, &label.token())?],
        Value::Rules(tokens) => tokens
            .iter()
            .map(|t| rule.format(&owner, t))
            .collect::<Result<_>>()?,
        other => vec![rule.format(&owner, &other.to_string())?],
    };
    Ok(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Capability, ComponentType};
    use crate::error::Error;
    use crate::fluent::RuleState;
    use crate::resolve::fixture::Stub;
    use crate::rules::{
        BooleanClassRule, CapabilityInfo, ClassRule, NullClassRule, PropertyInfo, Rule,
        StyleRule, TypeInfo,
    };
    use crate::value::EnumLabel;
    use pretty_assertions::assert_eq;

    struct Switchable;
    impl Capability for Switchable {
        const NAME: &'static str = "Switchable";
        fn info() -> CapabilityInfo {
            CapabilityInfo::new(Self::NAME)
                .rule(Rule::Class(ClassRule::new("switch")))
                .property(PropertyInfo::new("disabled").class(ClassRule::new("is-off")))
        }
    }

    struct Button;
    impl ComponentType for Button {
        fn type_name() -> &'static str {
            "Button"
        }
        fn type_info() -> TypeInfo {
            TypeInfo::of::<Self>()
                .class(ClassRule::new("btn"))
                .capability::<Switchable>()
                .property(PropertyInfo::new("disabled").class(ClassRule::new("is-disabled")))
                .property(PropertyInfo::new("color").class(ClassRule::new("btn-{0}")))
                .property(PropertyInfo::new("size").class(ClassRule::new("btn-").order(-1)))
                .property(
                    PropertyInfo::new("outline")
                        .boolean_class(BooleanClassRule::new("btn-outline", "btn-solid")),
                )
                .property(
                    PropertyInfo::new("theme")
                        .class(ClassRule::new("theme-{0}"))
                        .null_class(NullClassRule::new("theme-default")),
                )
                .property(PropertyInfo::new("spacing").class(ClassRule::new("u-{0}")))
                .property(PropertyInfo::new("layout"))
        }
    }

    struct Broken;
    impl ComponentType for Broken {
        fn type_name() -> &'static str {
            "Broken"
        }
        fn type_info() -> TypeInfo {
            TypeInfo::of::<Self>().property(PropertyInfo::new("tone").class(ClassRule::empty()))
        }
    }

    struct Panel;
    impl ComponentType for Panel {
        fn type_name() -> &'static str {
            "Panel"
        }
        fn type_info() -> TypeInfo {
            TypeInfo::of::<Self>()
                .rule(Rule::Style(StyleRule::new("display:block")))
                .property(PropertyInfo::new("width").style(StyleRule::new("width:{0}px")))
                .property(PropertyInfo::new("hidden").style(StyleRule::new("visibility:hidden;")))
                .property(PropertyInfo::new("float").style(StyleRule::new("float:{0}").order(-5)))
        }
    }

    fn classes(stub: &Stub<Button>) -> Vec<String> {
        Resolver::default()
            .resolve_classes(stub)
            .unwrap()
            .tokens()
            .to_vec()
    }

    #[test]
    fn type_override_wins_over_capability_property() {
        let button = Stub::<Button>::new().set("disabled", true);
        let tokens = classes(&button);
        assert!(tokens.contains(&"is-disabled".to_owned()));
        assert!(!tokens.contains(&"is-off".to_owned()));
    }

    #[test]
    fn tokens_follow_ascending_order() {
        let button = Stub::<Button>::new()
            .set("size", "lg")
            .set("color", "primary")
            .set("disabled", true);
        assert_eq!(
            classes(&button),
            ["btn-lg", "switch", "btn", "is-disabled", "btn-primary", "theme-default"]
        );
    }

    #[test]
    fn boolean_rule_picks_either_token() {
        let on = Stub::<Button>::new().set("outline", true);
        let off = Stub::<Button>::new().set("outline", false);
        assert!(classes(&on).contains(&"btn-outline".to_owned()));
        assert!(classes(&off).contains(&"btn-solid".to_owned()));
        assert!(!classes(&off).contains(&"btn-outline".to_owned()));
    }

    #[test]
    fn plain_boolean_emits_literal_only_when_true() {
        let off = Stub::<Button>::new().set("disabled", false);
        assert!(!classes(&off).contains(&"is-disabled".to_owned()));
    }

    #[test]
    fn null_fallback_and_enum_label() {
        let unset = Stub::<Button>::new();
        assert!(classes(&unset).contains(&"theme-default".to_owned()));

        let labeled = Stub::<Button>::new().set("theme", EnumLabel::new("Dark", Some("night")));
        let tokens = classes(&labeled);
        assert!(tokens.contains(&"theme-night".to_owned()));
        assert!(!tokens.contains(&"theme-default".to_owned()));

        let unlabeled = Stub::<Button>::new().set("theme", EnumLabel::new("Dark", None));
        assert!(classes(&unlabeled).contains(&"theme-dark".to_owned()));
    }

    #[test]
    fn duplicate_tokens_keep_first_position() {
        let mut button = Stub::<Button>::new().set("color", "primary");
        button.extra_class = Some("btn extra btn-primary".into());
        assert_eq!(
            classes(&button),
            ["switch", "btn", "btn-primary", "theme-default", "extra"]
        );
    }

    #[test]
    fn rule_provider_tokens_use_the_template_or_pass_through() {
        let mut state = RuleState::new();
        state.change_key("m").add_rule("2").unwrap();
        state.change_key("p");
        let button = Stub::<Button>::new()
            .set("spacing", Value::rules_of(&state))
            .set("layout", Value::Rules(vec!["grid".into(), "".into()]));
        let tokens = classes(&button);
        // `layout` has no class rule: its tokens are emitted as-is
        assert!(tokens.ends_with(&["u-m-2".to_owned(), "u-p".to_owned(), "grid".to_owned()]));
    }

    #[test]
    fn empty_rule_fails_at_first_use() {
        let unset = Stub::<Broken>::new();
        assert!(Resolver::default().resolve_classes(&unset).is_ok());

        let set = Stub::<Broken>::new().set("tone", "warm");
        let err = Resolver::default().resolve_classes(&set).unwrap_err();
        assert!(matches!(err, Error::EmptyRule { ref owner } if owner == "Broken.tone"));
    }

    #[test]
    fn style_joins_fragments_and_appends_additional_last() {
        let mut panel = Stub::<Panel>::new()
            .set("width", 40)
            .set("hidden", true)
            .set("float", "left");
        panel.extra_style = Some("color:red".into());
        let style = Resolver::default().resolve_style(&panel).unwrap();
        assert_eq!(style, "float:left;display:block;width:40px;visibility:hidden;color:red");
    }

    #[test]
    fn style_skips_null_and_false() {
        let panel = Stub::<Panel>::new().set("hidden", false);
        let style = Resolver::default().resolve_style(&panel).unwrap();
        assert_eq!(style, "display:block");
    }
}
