//! Fluent rule providers: property values that format themselves into class tokens.
//!
//! A provider is built through chained calls on a small object graph
//! (`Spacing::new().top().size(2)`), usually wrapping a [`RuleState`]. When a
//! component field holds a provider, the class resolver receives its tokens as
//! [`Value::Rules`].

use crate::value::{ToValue, Value};

use super::state::RuleState;

pub trait FluentRuleProvider {
    /// Format the accumulated rules into class tokens.
    fn create(&self) -> Vec<String>;
}

impl FluentRuleProvider for RuleState {
    fn create(&self) -> Vec<String> {
        RuleState::create(self)
    }
}

impl ToValue for RuleState {
    fn to_value(&self) -> Value {
        Value::rules_of(self)
    }
}

impl Value {
    /// Capture a provider's tokens as a value.
    pub fn rules_of<P: FluentRuleProvider + ?Sized>(provider: &P) -> Value {
        Value::Rules(provider.create())
    }
}
