//! Built-in capabilities.
//!
//! Each capability is a marker type whose [`Capability::info`] carries the
//! default rules a component gets by listing it. A component overrides any of
//! them by declaring a same-named property rule of its own.

use crate::rules::{AttributeRule, CapabilityInfo, ClassRule, PropertyInfo};

use super::traits::Capability;

/// Renders `child_content` inside the component's root element.
pub struct HasChildContent;

impl Capability for HasChildContent {
    const NAME: &'static str = "HasChildContent";

    fn info() -> CapabilityInfo {
        CapabilityInfo::new(Self::NAME)
    }
}

/// `disabled: bool` → class `disabled` and attribute `disabled`.
pub struct HasDisabled;

impl Capability for HasDisabled {
    const NAME: &'static str = "HasDisabled";

    fn info() -> CapabilityInfo {
        CapabilityInfo::new(Self::NAME).property(
            PropertyInfo::new("disabled")
                .class(ClassRule::new("disabled"))
                .attribute(AttributeRule::new()),
        )
    }
}

/// `active: bool` → class `active`.
pub struct HasActive;

impl Capability for HasActive {
    const NAME: &'static str = "HasActive";

    fn info() -> CapabilityInfo {
        CapabilityInfo::new(Self::NAME)
            .property(PropertyInfo::new("active").class(ClassRule::new("active")))
    }
}

/// `on_click: Option<Callback>` → attribute `onclick`.
pub struct HasOnClick;

impl Capability for HasOnClick {
    const NAME: &'static str = "HasOnClick";

    fn info() -> CapabilityInfo {
        CapabilityInfo::new(Self::NAME)
            .property(PropertyInfo::new("on_click").attribute(AttributeRule::named("onclick")))
    }
}

/// A `<form>` with submit callbacks and an edit model.
///
/// Components listing this capability are checked by the form interceptor:
/// `on_submit` excludes `on_valid_submit`/`on_invalid_submit`, and exactly one
/// of `model` or `edit_context` must be supplied.
pub struct HasForm;

impl HasForm {
    pub const ON_SUBMIT: &'static str = "on_submit";
    pub const ON_VALID_SUBMIT: &'static str = "on_valid_submit";
    pub const ON_INVALID_SUBMIT: &'static str = "on_invalid_submit";
    pub const MODEL: &'static str = "model";
    pub const EDIT_CONTEXT: &'static str = "edit_context";
}

impl Capability for HasForm {
    const NAME: &'static str = "HasForm";

    fn info() -> CapabilityInfo {
        CapabilityInfo::new(Self::NAME)
            .tag("form")
            .property(
                PropertyInfo::new(HasForm::ON_SUBMIT).attribute(AttributeRule::named("onsubmit")),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;

    #[test]
    fn disabled_declares_class_and_attribute() {
        let info = HasDisabled::info();
        assert_eq!(info.name, "HasDisabled");
        assert_eq!(info.properties.len(), 1);
        let rules = &info.properties[0].rules;
        assert!(rules.contains(&Rule::Class(ClassRule::new("disabled"))));
        assert!(rules.contains(&Rule::Attribute(AttributeRule::new())));
    }

    #[test]
    fn form_declares_tag() {
        assert_eq!(HasForm::info().tag.as_deref(), Some("form"));
    }

    #[test]
    fn child_content_has_no_rules() {
        let info = HasChildContent::info();
        assert!(info.rules.is_empty());
        assert!(info.properties.is_empty());
    }
}
