//! Error taxonomy for rule resolution, composition, and the render pipeline.
//!
//! Every variant is a programmer or configuration error. Nothing here is
//! transient: errors surface synchronously to the host and are never retried.

use crate::pipeline::lifecycle::LifecycleState;

/// Errors raised while resolving rules or driving a component through its lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A class or style rule declares neither a literal nor a template.
    #[error("rule on `{owner}` declares neither a literal nor a template")]
    EmptyRule { owner: String },

    /// `RuleState::add_rule` was called before any key was selected.
    #[error("no rule key selected: call `change_key` before `add_rule`")]
    NoRuleKey,

    /// A component that requires an ancestor was rendered outside of it.
    #[error(
        "`{component}` must be nested inside `{parent}` (expected `<{parent}> ... <{component} /> ... </{parent}>`)"
    )]
    MissingParent {
        component: &'static str,
        parent: &'static str,
    },

    /// A component was configured with an invalid parameter combination.
    #[error("invalid configuration for `{component}`: {message}")]
    Configuration {
        component: &'static str,
        message: String,
    },

    /// A lifecycle operation was invoked from a state that does not allow it.
    #[error("`{component}` cannot move from {from:?} to {to:?}")]
    Lifecycle {
        component: &'static str,
        from: LifecycleState,
        to: LifecycleState,
    },

    /// The component instance is no longer part of the composition.
    #[error("`{component}` is not mounted")]
    NotMounted { component: &'static str },
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parent_message_names_both_types() {
        let err = Error::MissingParent {
            component: "Tab",
            parent: "Tabs",
        };
        let msg = err.to_string();
        assert!(msg.contains("`Tab` must be nested inside `Tabs`"));
        assert!(msg.contains("<Tabs> ... <Tab /> ... </Tabs>"));
    }

    #[test]
    fn configuration_message() {
        let err = Error::Configuration {
            component: "Form",
            message: "both `model` and `edit_context` supplied".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration for `Form`: both `model` and `edit_context` supplied"
        );
    }

    #[test]
    fn lifecycle_message() {
        let err = Error::Lifecycle {
            component: "Button",
            from: LifecycleState::Disposed,
            to: LifecycleState::Rendering,
        };
        assert_eq!(err.to_string(), "`Button` cannot move from Disposed to Rendering");
    }
}
