//! Insertion-ordered collections produced by the resolvers.
//!
//! [`Attributes`] is a name → [`Value`] map that remembers first-insertion
//! order; [`ClassList`] is a de-duplicated token list where a repeated token
//! keeps its first position.

use crate::value::Value;

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// An ordered attribute map. Re-inserting a name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, Value)>,
}

impl Attributes {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an attribute. Returns the previous value, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Set an attribute (builder).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// The value set for `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Whether `name` is set.
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Remove `name`, keeping the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Merge `other` into `self`; entries in `other` win on conflict.
    pub fn merge(&mut self, other: &Attributes) {
        for (name, value) in &other.entries {
            self.insert(name.clone(), value.clone());
        }
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Attribute names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Attributes {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

// ---------------------------------------------------------------------------
// ClassList
// ---------------------------------------------------------------------------

/// An insertion-ordered set of class tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token. Empty tokens and duplicates are ignored.
    pub fn add(&mut self, token: impl Into<String>) {
        let token = token.into();
        if !token.is_empty() && !self.contains(&token) {
            self.tokens.push(token);
        }
    }

    /// Add every whitespace-separated token of `classes`.
    pub fn add_all(&mut self, classes: &str) {
        for token in classes.split_whitespace() {
            self.add(token);
        }
    }

    /// Whether `token` is present.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Tokens in insertion order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The tokens joined by `separator`, e.g. for a `class` attribute.
    pub fn join(&self, separator: &str) -> String {
        self.tokens.join(separator)
    }
}

impl Extend<String> for ClassList {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for token in iter {
            self.add(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut attrs = Attributes::new();
        attrs.insert("id", "a");
        attrs.insert("class", "x");
        let previous = attrs.insert("id", "b");
        assert_eq!(previous, Some(Value::from("a")));
        assert_eq!(attrs.names().collect::<Vec<_>>(), vec!["id", "class"]);
        assert_eq!(attrs.get("id"), Some(&Value::from("b")));
    }

    #[test]
    fn merge_lets_other_win() {
        let mut declared = Attributes::new().with("class", "a").with("role", "button");
        let explicit = Attributes::new().with("class", "b").with("id", "z");
        declared.merge(&explicit);
        assert_eq!(declared.get("class"), Some(&Value::from("b")));
        assert_eq!(declared.names().collect::<Vec<_>>(), vec!["class", "role", "id"]);
    }

    #[test]
    fn remove_entry() {
        let mut attrs: Attributes = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(attrs.remove("a"), Some(Value::Int(1)));
        assert!(!attrs.contains_key("a"));
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.remove("missing"), None);
    }

    #[test]
    fn class_list_dedups_at_first_position() {
        let mut classes = ClassList::new();
        classes.add("btn");
        classes.add("active");
        classes.add("btn");
        classes.add("");
        assert_eq!(classes.tokens(), ["btn", "active"]);
        assert_eq!(classes.join(" "), "btn active");
    }

    #[test]
    fn class_list_add_all_splits_whitespace() {
        let mut classes = ClassList::new();
        classes.add_all("  a b   a c ");
        assert_eq!(classes.tokens(), ["a", "b", "c"]);
    }
}
