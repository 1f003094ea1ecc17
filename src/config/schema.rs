//! Configuration schema types
//!
//! The typed, immutable form of a utility-CSS build configuration. Values of
//! these types are produced by [`crate::config::validation::Validator`] and
//! never by deserializing source text directly, so every field has already
//! been checked when a [`ConfigDocument`] exists.
//!
//! Serialization writes the document back in source shape (`content`,
//! `darkMode`, `theme.extend`, `plugins`).

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

// ============================================================================
// Top-Level Document
// ============================================================================

/// A validated configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigDocument {
    /// Glob patterns naming the files scanned for class usage, in source order.
    #[serde(rename = "content")]
    pub content_patterns: Vec<String>,

    /// How dark-mode variants are activated.
    #[serde(rename = "darkMode")]
    pub dark_mode: DarkModeStrategy,

    /// Theme overrides and extensions.
    pub theme: Theme,

    /// Plugin references, in load order.
    pub plugins: Vec<PluginRef>,

    /// Prefix prepended to every generated class name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prefix: String,

    /// Whether generated declarations are marked `!important`.
    #[serde(skip_serializing_if = "Important::is_disabled")]
    pub important: Important,

    /// Separator between variant and class name.
    #[serde(skip_serializing_if = "is_default_separator")]
    pub separator: String,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self {
            content_patterns: Vec::new(),
            dark_mode: DarkModeStrategy::default(),
            theme: Theme::default(),
            plugins: Vec::new(),
            prefix: String::new(),
            important: Important::Disabled,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl ConfigDocument {
    /// Returns the additive theme extensions, keyed by dimension.
    #[must_use]
    pub const fn theme_extensions(&self) -> &IndexMap<String, TokenMap> {
        &self.theme.extend
    }

    /// Looks up a single extension token, e.g. `("colors", "primary")`.
    #[must_use]
    pub fn extension_token(&self, dimension: &str, token: &str) -> Option<&TokenValue> {
        self.theme.extend.get(dimension).and_then(|m| m.get(token))
    }
}

/// Default variant separator.
pub const DEFAULT_SEPARATOR: &str = ":";

fn is_default_separator(s: &str) -> bool {
    s == DEFAULT_SEPARATOR
}

// ============================================================================
// Dark Mode
// ============================================================================

/// Dark-mode activation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DarkModeStrategy {
    /// Gated by an explicit marker class on an ancestor element.
    Class,
    /// Gated by the `prefers-color-scheme` media query.
    #[default]
    Media,
}

impl DarkModeStrategy {
    /// All recognized source literals.
    pub const LITERALS: [&'static str; 2] = ["class", "media"];

    /// Parses a source literal. Matching is exact.
    #[must_use]
    pub fn from_literal(s: &str) -> Option<Self> {
        match s {
            "class" => Some(Self::Class),
            "media" => Some(Self::Media),
            _ => None,
        }
    }

    /// Returns the source literal for this strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Media => "media",
        }
    }
}

impl fmt::Display for DarkModeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Theme
// ============================================================================

/// Tokens of one theme dimension, keyed by token name.
pub type TokenMap = IndexMap<String, TokenValue>;

/// Theme section of the document.
///
/// Dimensions listed directly under `theme` replace the consumer's defaults
/// for that dimension; dimensions under `theme.extend` are merged into them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Theme {
    /// Replacing dimensions (`theme.<dimension>`).
    #[serde(flatten)]
    pub overrides: IndexMap<String, TokenMap>,

    /// Additive dimensions (`theme.extend.<dimension>`).
    pub extend: IndexMap<String, TokenMap>,
}

/// A single design-token value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    /// A scalar value such as `"#e30613"` or `"1.5rem"`.
    Literal(String),
    /// An ordered list such as a font stack.
    Stack(Vec<String>),
    /// A nested scale such as `{ "500": "#...", "DEFAULT": "#..." }`.
    Scale(TokenMap),
}

impl TokenValue {
    /// Returns the literal string, if this is a scalar token.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list entries, if this is a stack token.
    #[must_use]
    pub fn as_stack(&self) -> Option<&[String]> {
        match self {
            Self::Stack(v) => Some(v),
            _ => None,
        }
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        Self::Literal(s.to_string())
    }
}

// ============================================================================
// Plugins / Important
// ============================================================================

/// Opaque reference to a plugin module loaded by the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PluginRef(pub String);

impl PluginRef {
    /// Returns the reference text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `important` setting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Important {
    /// No `!important` (source `false` or absent).
    #[default]
    Disabled,
    /// Every declaration is `!important` (source `true`).
    All,
    /// Utilities are scoped under the given selector.
    Selector(String),
}

impl Important {
    /// Returns `true` for the default setting.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }
}

impl Serialize for Important {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Disabled => serializer.serialize_bool(false),
            Self::All => serializer.serialize_bool(true),
            Self::Selector(s) => serializer.serialize_str(s),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_mode_literals() {
        assert_eq!(
            DarkModeStrategy::from_literal("class"),
            Some(DarkModeStrategy::Class)
        );
        assert_eq!(
            DarkModeStrategy::from_literal("media"),
            Some(DarkModeStrategy::Media)
        );
        assert_eq!(DarkModeStrategy::from_literal("auto"), None);
        assert_eq!(DarkModeStrategy::from_literal("Class"), None);
    }

    #[test]
    fn dark_mode_default_is_media() {
        assert_eq!(DarkModeStrategy::default(), DarkModeStrategy::Media);
        assert_eq!(ConfigDocument::default().dark_mode, DarkModeStrategy::Media);
    }

    #[test]
    fn default_document_has_empty_collections() {
        let doc = ConfigDocument::default();
        assert!(doc.content_patterns.is_empty());
        assert!(doc.plugins.is_empty());
        assert!(doc.theme_extensions().is_empty());
        assert_eq!(doc.separator, ":");
    }

    #[test]
    fn serializes_in_source_shape() {
        let mut doc = ConfigDocument {
            content_patterns: vec!["./templates/**/*.html".to_string()],
            dark_mode: DarkModeStrategy::Class,
            ..ConfigDocument::default()
        };
        let mut colors = TokenMap::new();
        colors.insert("primary".to_string(), TokenValue::from("#e30613"));
        doc.theme.extend.insert("colors".to_string(), colors);

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["darkMode"], "class");
        assert_eq!(json["content"][0], "./templates/**/*.html");
        assert_eq!(json["theme"]["extend"]["colors"]["primary"], "#e30613");
        assert_eq!(json["plugins"], serde_json::json!([]));
        assert!(json.get("prefix").is_none());
        assert!(json.get("important").is_none());
        assert!(json.get("separator").is_none());
    }

    #[test]
    fn theme_overrides_flatten_next_to_extend() {
        let mut theme = Theme::default();
        let mut spacing = TokenMap::new();
        spacing.insert("sm".to_string(), TokenValue::from("4px"));
        theme.overrides.insert("spacing".to_string(), spacing);

        let json = serde_json::to_value(&theme).unwrap();
        assert_eq!(json["spacing"]["sm"], "4px");
        assert_eq!(json["extend"], serde_json::json!({}));
    }

    #[test]
    fn important_serialization() {
        assert_eq!(
            serde_json::to_value(Important::All).unwrap(),
            serde_json::json!(true)
        );
        assert_eq!(
            serde_json::to_value(Important::Selector("#app".into())).unwrap(),
            serde_json::json!("#app")
        );
    }

    #[test]
    fn token_value_accessors() {
        let lit = TokenValue::from("#fff");
        assert_eq!(lit.as_literal(), Some("#fff"));
        assert!(lit.as_stack().is_none());

        let stack = TokenValue::Stack(vec!["Inter".into(), "sans-serif".into()]);
        assert_eq!(stack.as_stack().map(<[String]>::len), Some(2));
    }
}
