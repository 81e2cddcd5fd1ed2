//! Resolver configuration.
//!
//! [`ResolverConfig`] carries the few knobs that shape generated strings: the
//! fallback tag name, the separators used to join class and style tokens, and
//! how default attribute names are derived from field names.

// ---------------------------------------------------------------------------
// ResolverConfig
// ---------------------------------------------------------------------------

/// Configuration shared by the resolvers and the render pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResolverConfig {
    /// Tag used when neither the type, its bases, nor its capabilities declare one.
    pub default_tag: String,
    /// Separator between class tokens in the `class` attribute.
    pub class_separator: String,
    /// Separator between style fragments in the `style` attribute.
    pub style_separator: String,
    /// Turn `_` into `-` when an attribute name defaults to its field name.
    pub hyphenate_attribute_names: bool,
    /// Emit `class=""` even when no class token was produced.
    pub emit_empty_class: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_tag: "div".to_owned(),
            class_separator: " ".to_owned(),
            style_separator: ";".to_owned(),
            hyphenate_attribute_names: true,
            emit_empty_class: false,
        }
    }
}

impl ResolverConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback tag (builder).
    pub fn with_default_tag(mut self, tag: impl Into<String>) -> Self {
        self.default_tag = tag.into();
        self
    }

    /// Set the class separator (builder).
    pub fn with_class_separator(mut self, separator: impl Into<String>) -> Self {
        self.class_separator = separator.into();
        self
    }

    /// Set the style separator (builder).
    pub fn with_style_separator(mut self, separator: impl Into<String>) -> Self {
        self.style_separator = separator.into();
        self
    }

    /// Keep field names verbatim when deriving attribute names (builder).
    pub fn with_hyphenated_attribute_names(mut self, hyphenate: bool) -> Self {
        self.hyphenate_attribute_names = hyphenate;
        self
    }

    /// Emit an empty `class` attribute when no token resolves (builder).
    pub fn with_empty_class(mut self, emit: bool) -> Self {
        self.emit_empty_class = emit;
        self
    }

    /// Derive an attribute name from a field name.
    pub fn attribute_name(&self, field: &str) -> String {
        let lower = field.to_lowercase();
        if self.hyphenate_attribute_names {
            lower.replace('_', "-")
        } else {
            lower
        }
    }
}
