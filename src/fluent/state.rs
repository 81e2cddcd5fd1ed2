//! Keyed rule table behind fluent rule providers.
//!
//! A [`RuleState`] accumulates `key → [value, ...]` entries through a cursor:
//! [`change_key`](RuleState::change_key) selects (or registers) a key and
//! [`add_rule`](RuleState::add_rule) appends to it. [`create`](RuleState::create)
//! formats every `(key, value)` pair into a class token.

use std::fmt;

use crate::error::{Error, Result};

/// Formats one `(key, value)` pair. `value` is `None` for a key with no values.
pub type RuleFormatter = fn(key: &str, value: Option<&str>, separator: &str) -> String;

/// `key`, `key{sep}value`, or whichever side is non-empty.
pub fn default_format(key: &str, value: Option<&str>, separator: &str) -> String {
    match value {
        None => key.to_owned(),
        Some(v) if v.is_empty() => key.to_owned(),
        Some(v) if key.is_empty() => v.to_owned(),
        Some(v) => format!("{key}{separator}{v}"),
    }
}

#[derive(Clone)]
pub struct RuleState {
    table: Vec<(String, Vec<String>)>,
    current: Option<usize>,
    dirty: bool,
    separator: String,
    formatter: RuleFormatter,
}

impl RuleState {
    /// An empty table using `-` and [`default_format`].
    pub fn new() -> Self {
        Self {
            table: Vec::new(),
            current: None,
            dirty: false,
            separator: "-".to_owned(),
            formatter: default_format,
        }
    }

    /// Use `separator` between key and value (builder).
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Replace the pair formatter (builder).
    pub fn with_formatter(mut self, formatter: RuleFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Move the cursor to `key`, registering it with no values if new.
    pub fn change_key(&mut self, key: impl Into<String>) -> &mut Self {
        let key = key.into();
        match self.table.iter().position(|(k, _)| *k == key) {
            Some(index) => self.current = Some(index),
            None => {
                self.table.push((key, Vec::new()));
                self.current = Some(self.table.len() - 1);
                self.dirty = true;
            }
        }
        self
    }

    /// Append `value` to the current key, skipping values already present.
    pub fn add_rule(&mut self, value: impl Into<String>) -> Result<&mut Self> {
        self.add_rule_with(value, true)
    }

    /// Append `value` to the current key.
    ///
    /// Fails with [`Error::NoRuleKey`] if no key has been selected.
    pub fn add_rule_with(
        &mut self,
        value: impl Into<String>,
        ignore_duplicate: bool,
    ) -> Result<&mut Self> {
        let index = self.current.ok_or(Error::NoRuleKey)?;
        let value = value.into();
        let values = &mut self.table[index].1;
        if ignore_duplicate && values.contains(&value) {
            return Ok(self);
        }
        values.push(value);
        self.dirty = true;
        Ok(self)
    }

    /// Format every key in registration order.
    ///
    /// A key without values yields its bare token. Empty results are dropped.
    /// Tokens are not de-duplicated across keys.
    pub fn create(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        for (key, values) in &self.table {
            if values.is_empty() {
                let token = (self.formatter)(key, None, &self.separator);
                if !token.is_empty() {
                    tokens.push(token);
                }
                continue;
            }
            for value in values {
                let token = (self.formatter)(key, Some(value), &self.separator);
                if !token.is_empty() {
                    tokens.push(token);
                }
            }
        }
        tokens
    }

    /// The key `add_rule` appends to.
    pub fn current_key(&self) -> Option<&str> {
        self.current.map(|i| self.table[i].0.as_str())
    }

    /// Registered keys, first registration first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.table.iter().map(|(k, _)| k.as_str())
    }

    /// Whether anything has been registered since creation or the last
    /// [`clear`](Self::clear). Informational only: [`create`](Self::create)
    /// always reads the table.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Drop every key and reset the cursor.
    pub fn clear(&mut self) {
        self.table.clear();
        self.current = None;
        self.dirty = false;
    }
}

impl Default for RuleState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleState")
            .field("table", &self.table)
            .field("current", &self.current_key())
            .field("dirty", &self.dirty)
            .field("separator", &self.separator)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_rule_without_key_fails() {
        let mut state = RuleState::new();
        assert!(matches!(state.add_rule("t"), Err(Error::NoRuleKey)));
        assert!(!state.is_dirty());
    }

    #[test]
    fn key_values_format_in_call_order() {
        let mut state = RuleState::new();
        let tokens = state
            .change_key("small")
            .add_rule("t")
            .unwrap()
            .add_rule("m")
            .unwrap()
            .create();
        assert_eq!(tokens, vec!["small-t", "small-m"]);
    }

    #[test]
    fn create_is_idempotent() {
        let mut state = RuleState::new();
        state.change_key("p").add_rule("2").unwrap();
        assert_eq!(state.create(), state.create());
    }

    #[test]
    fn bare_key_formats_alone() {
        let mut state = RuleState::new();
        state.change_key("rounded");
        assert!(state.is_dirty());
        assert_eq!(state.create(), vec!["rounded"]);
    }

    #[test]
    fn duplicate_values_skipped_per_key() {
        let mut state = RuleState::new();
        state
            .change_key("m")
            .add_rule("1")
            .unwrap()
            .add_rule("1")
            .unwrap();
        state.change_key("p").add_rule("1").unwrap();
        assert_eq!(state.create(), vec!["m-1", "p-1"]);
    }

    #[test]
    fn duplicates_kept_when_not_ignored() {
        let mut state = RuleState::new();
        state.change_key("m");
        state.add_rule_with("1", false).unwrap();
        state.add_rule_with("1", false).unwrap();
        assert_eq!(state.create(), vec!["m-1", "m-1"]);
    }

    #[test]
    fn returning_to_a_key_appends_to_it() {
        let mut state = RuleState::new();
        state.change_key("a").add_rule("1").unwrap();
        state.change_key("b");
        state.change_key("a").add_rule("2").unwrap();
        assert_eq!(state.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(state.create(), vec!["a-1", "a-2", "b"]);
        assert_eq!(state.current_key(), Some("a"));
    }

    #[test]
    fn custom_separator_and_formatter() {
        let mut state = RuleState::new().with_separator(":");
        state.change_key("md").add_rule("flex").unwrap();
        assert_eq!(state.create(), vec!["md:flex"]);

        fn upper(key: &str, value: Option<&str>, _: &str) -> String {
            format!("{}{}", key.to_uppercase(), value.unwrap_or_default())
        }
        let mut state = RuleState::new().with_formatter(upper);
        state.change_key("x").add_rule("1").unwrap();
        assert_eq!(state.create(), vec!["X1"]);
    }

    #[test]
    fn empty_tokens_are_dropped() {
        let mut state = RuleState::new();
        state.change_key("");
        assert!(state.create().is_empty());
    }

    #[test]
    fn fresh_state_creates_nothing() {
        let state = RuleState::new();
        assert!(!state.is_dirty());
        assert!(state.create().is_empty());
        assert_eq!(state.keys().count(), 0);
    }

    #[test]
    fn clear_resets() {
        let mut state = RuleState::new();
        state.change_key("a").add_rule("1").unwrap();
        state.clear();
        assert!(!state.is_dirty());
        assert_eq!(state.current_key(), None);
        assert!(state.create().is_empty());
    }
}
