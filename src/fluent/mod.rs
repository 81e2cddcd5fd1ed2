//! Fluent rule providers: code-driven class tokens, no reflection involved.

pub mod provider;
pub mod state;

pub use provider::FluentRuleProvider;
pub use state::{default_format, RuleFormatter, RuleState};
