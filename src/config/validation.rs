//! Configuration validation
//!
//! Converts the parsed (and preset-merged) value tree into a typed
//! [`ConfigDocument`]. Validation collects ALL issues rather than stopping at
//! the first, each tagged with the path of the offending field, so a single
//! run reports everything wrong with a file.
//!
//! A document is only produced when no errors were found.

use crate::config::color::is_color_literal;
use crate::config::schema::{
    ConfigDocument, DEFAULT_SEPARATOR, DarkModeStrategy, Important, PluginRef, Theme, TokenMap,
    TokenValue,
};
use crate::error::{Severity, ValidationIssue};

use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;

/// Top-level keys the schema recognizes.
pub const TOP_LEVEL_KEYS: &[&str] = &[
    "content",
    "darkMode",
    "theme",
    "plugins",
    "presets",
    "prefix",
    "important",
    "separator",
];

/// Theme dimensions holding color tokens.
const COLOR_DIMENSIONS: &[&str] = &["colors"];

/// Theme dimensions holding font stacks.
const STACK_DIMENSIONS: &[&str] = &["fontFamily"];

/// Theme dimensions the consumer knows about, used for typo suggestions.
const KNOWN_DIMENSIONS: &[&str] = &[
    "extend",
    "colors",
    "fontFamily",
    "fontSize",
    "fontWeight",
    "lineHeight",
    "letterSpacing",
    "spacing",
    "screens",
    "borderRadius",
    "borderWidth",
    "boxShadow",
    "opacity",
    "zIndex",
    "container",
    "animation",
    "keyframes",
    "transitionDuration",
    "backgroundImage",
];

// ============================================================================
// Public API
// ============================================================================

/// Validator options.
#[derive(Debug, Clone, Copy)]
pub struct ValidationOptions {
    /// Check that color tokens are CSS color literals.
    pub check_colors: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self { check_colors: true }
    }
}

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// The typed document, present when there are no errors.
    pub document: Option<ConfigDocument>,

    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Configuration validator.
#[derive(Debug, Default)]
pub struct Validator {
    options: ValidationOptions,
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a validator with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator with the given options.
    #[must_use]
    pub fn with_options(options: ValidationOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Validates a parsed configuration tree and builds the typed document.
    ///
    /// This method collects all errors and warnings rather than stopping
    /// at the first issue.
    pub fn validate(&mut self, root: &Value) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        let document = match root {
            Value::Mapping(map) => self.validate_root(map),
            other => {
                self.add_error(
                    "",
                    &format!(
                        "Configuration must be an object, found {}",
                        describe(other)
                    ),
                );
                None
            }
        };

        let document = if self.errors.is_empty() {
            document
        } else {
            None
        };

        ValidationResult {
            document,
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    // ========================================================================
    // Root
    // ========================================================================

    fn validate_root(&mut self, map: &Mapping) -> Option<ConfigDocument> {
        self.check_unknown_keys(map, TOP_LEVEL_KEYS, "");

        let content_patterns = self.validate_content(map.get("content"));
        let dark_mode = self.validate_dark_mode(map.get("darkMode"));
        let theme = self.validate_theme(map.get("theme"));
        let plugins = self.validate_plugins(map.get("plugins"));
        let prefix = self.validate_prefix(map.get("prefix"));
        let important = self.validate_important(map.get("important"));
        let separator = self.validate_separator(map.get("separator"));

        if map.get("presets").is_some() {
            // Only reachable when validating a tree the loader did not resolve.
            self.add_warning("presets", "Presets are ignored by direct validation");
        }

        Some(ConfigDocument {
            content_patterns: content_patterns?,
            dark_mode: dark_mode?,
            theme: theme?,
            plugins: plugins?,
            prefix: prefix?,
            important: important?,
            separator: separator?,
        })
    }

    /// Warns on keys outside `known`, suggesting the closest known key.
    fn check_unknown_keys(&mut self, map: &Mapping, known: &[&str], base: &str) {
        for key in map.keys() {
            let Some(name) = key_to_string(key) else {
                continue;
            };
            if known.contains(&name.as_str()) {
                continue;
            }
            let message = suggest_key(&name, known).map_or_else(
                || format!("Unknown key '{name}'"),
                |s| format!("Unknown key '{name}'. Did you mean '{s}'?"),
            );
            self.add_warning(&join_path(base, &name), &message);
        }
    }

    // ========================================================================
    // content
    // ========================================================================

    fn validate_content(&mut self, value: Option<&Value>) -> Option<Vec<String>> {
        let patterns = match value {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Sequence(seq)) => {
                let mut patterns = Vec::with_capacity(seq.len());
                let mut ok = true;
                for (idx, item) in seq.iter().enumerate() {
                    let path = format!("content[{idx}]");
                    match item {
                        Value::String(s) if !s.trim().is_empty() => patterns.push(s.clone()),
                        Value::String(_) => {
                            self.add_error(&path, "Content pattern cannot be empty");
                            ok = false;
                        }
                        other => {
                            self.add_error(
                                &path,
                                &format!("Content pattern must be a string, found {}", describe(other)),
                            );
                            ok = false;
                        }
                    }
                }
                if !ok {
                    return None;
                }
                patterns
            }
            Some(other) => {
                self.add_error(
                    "content",
                    &format!("'content' must be a list of glob patterns, found {}", describe(other)),
                );
                return None;
            }
        };

        if patterns.is_empty() {
            self.add_warning(
                "content",
                "No content patterns configured; no files will be scanned for class names",
            );
        }

        let mut seen = HashSet::new();
        for (idx, pattern) in patterns.iter().enumerate() {
            let path = format!("content[{idx}]");
            if !seen.insert(pattern.as_str()) {
                self.add_warning(&path, &format!("Duplicate content pattern '{pattern}'"));
            }
            if let Err(e) = glob::Pattern::new(pattern.trim_start_matches('!')) {
                self.add_warning(&path, &format!("'{pattern}' is not a valid glob pattern: {e}"));
            }
        }

        Some(patterns)
    }

    // ========================================================================
    // darkMode
    // ========================================================================

    fn validate_dark_mode(&mut self, value: Option<&Value>) -> Option<DarkModeStrategy> {
        let expected = DarkModeStrategy::LITERALS.join(", ");
        match value {
            None | Some(Value::Null) => Some(DarkModeStrategy::default()),
            Some(Value::String(s)) => {
                let strategy = DarkModeStrategy::from_literal(s);
                if strategy.is_none() {
                    self.add_error(
                        "darkMode",
                        &format!("Invalid dark mode strategy '{s}'. Expected one of: {expected}"),
                    );
                }
                strategy
            }
            Some(other) => {
                self.add_error(
                    "darkMode",
                    &format!(
                        "Dark mode strategy must be a string, found {}. Expected one of: {expected}",
                        describe(other)
                    ),
                );
                None
            }
        }
    }

    // ========================================================================
    // theme
    // ========================================================================

    fn validate_theme(&mut self, value: Option<&Value>) -> Option<Theme> {
        let map = match value {
            None | Some(Value::Null) => return Some(Theme::default()),
            Some(Value::Mapping(map)) => map,
            Some(other) => {
                self.add_error(
                    "theme",
                    &format!("'theme' must be an object, found {}", describe(other)),
                );
                return None;
            }
        };

        let mut theme = Theme::default();
        let mut ok = true;

        for (key, dim_value) in map {
            let Some(name) = key_to_string(key) else {
                self.add_error("theme", "Theme keys must be strings");
                ok = false;
                continue;
            };

            if name == "extend" {
                match self.validate_extend(dim_value) {
                    Some(extend) => theme.extend = extend,
                    None => ok = false,
                }
                continue;
            }

            self.check_dimension_name(&name, &format!("theme.{name}"));

            match self.validate_dimension(&name, dim_value, &format!("theme.{name}")) {
                Some(tokens) => {
                    theme.overrides.insert(name, tokens);
                }
                None => ok = false,
            }
        }

        ok.then_some(theme)
    }

    fn validate_extend(&mut self, value: &Value) -> Option<IndexMap<String, TokenMap>> {
        let map = match value {
            Value::Null => return Some(IndexMap::new()),
            Value::Mapping(map) => map,
            other => {
                self.add_error(
                    "theme.extend",
                    &format!("'theme.extend' must be an object, found {}", describe(other)),
                );
                return None;
            }
        };

        let mut extend = IndexMap::new();
        let mut ok = true;
        for (key, dim_value) in map {
            let Some(name) = key_to_string(key) else {
                self.add_error("theme.extend", "Theme dimension names must be strings");
                ok = false;
                continue;
            };
            self.check_dimension_name(&name, &format!("theme.extend.{name}"));
            match self.validate_dimension(&name, dim_value, &format!("theme.extend.{name}")) {
                Some(tokens) => {
                    extend.insert(name, tokens);
                }
                None => ok = false,
            }
        }

        ok.then_some(extend)
    }

    /// Warns about a dimension name outside the known set.
    fn check_dimension_name(&mut self, name: &str, path: &str) {
        if KNOWN_DIMENSIONS.contains(&name) {
            return;
        }
        let message = match suggest_key(name, KNOWN_DIMENSIONS) {
            Some(s) => format!("Unrecognized theme dimension '{name}'. Did you mean '{s}'?"),
            None => format!("Unrecognized theme dimension '{name}'"),
        };
        self.add_warning(path, &message);
    }

    /// Validates one dimension's token map.
    fn validate_dimension(&mut self, dimension: &str, value: &Value, path: &str) -> Option<TokenMap> {
        let map = match value {
            Value::Null => return Some(TokenMap::new()),
            Value::Mapping(map) => map,
            other => {
                self.add_error(
                    path,
                    &format!("Theme dimension '{dimension}' must be an object, found {}", describe(other)),
                );
                return None;
            }
        };

        let kind = DimensionKind::of(dimension);
        self.validate_tokens(kind, map, path)
    }

    fn validate_tokens(&mut self, kind: DimensionKind, map: &Mapping, path: &str) -> Option<TokenMap> {
        let mut tokens = TokenMap::new();
        let mut ok = true;

        for (key, value) in map {
            let Some(name) = key_to_string(key) else {
                self.add_error(path, &format!("Token names must be scalars, found {}", describe(key)));
                ok = false;
                continue;
            };
            let token_path = format!("{path}.{name}");
            match self.validate_token(kind, value, &token_path) {
                Some(token) => {
                    if tokens.insert(name.clone(), token).is_some() {
                        self.add_error(&token_path, &format!("Duplicate token '{name}'"));
                        ok = false;
                    }
                }
                None => ok = false,
            }
        }

        ok.then_some(tokens)
    }

    fn validate_token(&mut self, kind: DimensionKind, value: &Value, path: &str) -> Option<TokenValue> {
        match (kind, value) {
            (DimensionKind::Color, Value::String(s)) => {
                if self.options.check_colors && !is_color_literal(s) {
                    self.add_warning(path, &format!("'{s}' is not a recognized CSS color literal"));
                }
                Some(TokenValue::Literal(s.clone()))
            }
            (DimensionKind::Color, Value::Mapping(scale)) => self
                .validate_tokens(kind, scale, path)
                .map(TokenValue::Scale),
            (DimensionKind::Color, other) => {
                self.add_error(path, &format!("Color token must be a string, found {}", describe(other)));
                None
            }
            (DimensionKind::Stack, Value::String(s)) => Some(TokenValue::Literal(s.clone())),
            (DimensionKind::Stack, Value::Sequence(items)) => {
                self.validate_stack(items, path).map(TokenValue::Stack)
            }
            (DimensionKind::Stack, other) => {
                self.add_error(
                    path,
                    &format!(
                        "Font family token must be a string or a list of strings, found {}",
                        describe(other)
                    ),
                );
                None
            }
            (DimensionKind::General, Value::String(s)) => Some(TokenValue::Literal(s.clone())),
            (DimensionKind::General, Value::Number(n)) => Some(TokenValue::Literal(n.to_string())),
            (DimensionKind::General, Value::Sequence(items)) => {
                self.validate_stack(items, path).map(TokenValue::Stack)
            }
            (DimensionKind::General, Value::Mapping(nested)) => self
                .validate_tokens(kind, nested, path)
                .map(TokenValue::Scale),
            (DimensionKind::General, other) => {
                self.add_error(
                    path,
                    &format!("Token must be a string, number, list or object, found {}", describe(other)),
                );
                None
            }
        }
    }

    fn validate_stack(&mut self, items: &[Value], path: &str) -> Option<Vec<String>> {
        let mut stack = Vec::with_capacity(items.len());
        let mut ok = true;
        for (idx, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => stack.push(s.clone()),
                Value::Number(n) => stack.push(n.to_string()),
                other => {
                    self.add_error(
                        &format!("{path}[{idx}]"),
                        &format!("List entries must be strings, found {}", describe(other)),
                    );
                    ok = false;
                }
            }
        }
        ok.then_some(stack)
    }

    // ========================================================================
    // plugins
    // ========================================================================

    fn validate_plugins(&mut self, value: Option<&Value>) -> Option<Vec<PluginRef>> {
        let seq = match value {
            None | Some(Value::Null) => return Some(Vec::new()),
            Some(Value::Sequence(seq)) => seq,
            Some(other) => {
                self.add_error(
                    "plugins",
                    &format!("'plugins' must be a list, found {}", describe(other)),
                );
                return None;
            }
        };

        let mut plugins = Vec::with_capacity(seq.len());
        let mut ok = true;
        for (idx, item) in seq.iter().enumerate() {
            let path = format!("plugins[{idx}]");
            match item {
                Value::String(s) if !s.trim().is_empty() => plugins.push(PluginRef(s.clone())),
                Value::String(_) => {
                    self.add_error(&path, "Plugin reference cannot be empty");
                    ok = false;
                }
                other => {
                    self.add_error(
                        &path,
                        &format!("Plugin reference must be a string, found {}", describe(other)),
                    );
                    ok = false;
                }
            }
        }

        ok.then_some(plugins)
    }

    // ========================================================================
    // prefix / important / separator
    // ========================================================================

    fn validate_prefix(&mut self, value: Option<&Value>) -> Option<String> {
        match value {
            None | Some(Value::Null) => Some(String::new()),
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.add_error("prefix", &format!("'prefix' must be a string, found {}", describe(other)));
                None
            }
        }
    }

    fn validate_important(&mut self, value: Option<&Value>) -> Option<Important> {
        match value {
            None | Some(Value::Null | Value::Bool(false)) => Some(Important::Disabled),
            Some(Value::Bool(true)) => Some(Important::All),
            Some(Value::String(s)) if !s.trim().is_empty() => Some(Important::Selector(s.clone())),
            Some(other) => {
                self.add_error(
                    "important",
                    &format!(
                        "'important' must be a boolean or a non-empty selector, found {}",
                        describe(other)
                    ),
                );
                None
            }
        }
    }

    fn validate_separator(&mut self, value: Option<&Value>) -> Option<String> {
        match value {
            None | Some(Value::Null) => Some(DEFAULT_SEPARATOR.to_string()),
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(other) => {
                self.add_error(
                    "separator",
                    &format!("'separator' must be a non-empty string, found {}", describe(other)),
                );
                None
            }
        }
    }

    // ========================================================================
    // Helper Methods
    // ========================================================================

    /// Adds an error to the collection.
    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    /// Adds a warning to the collection.
    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// How tokens of a dimension are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DimensionKind {
    Color,
    Stack,
    General,
}

impl DimensionKind {
    fn of(dimension: &str) -> Self {
        if COLOR_DIMENSIONS.contains(&dimension) {
            Self::Color
        } else if STACK_DIMENSIONS.contains(&dimension) {
            Self::Stack
        } else {
            Self::General
        }
    }
}

/// Renders a mapping key as a token name. Numeric keys (`500:`) are allowed.
pub(crate) fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Suggests the closest key if its Damerau-Levenshtein distance is <= 3.
fn suggest_key(input: &str, known: &[&str]) -> Option<String> {
    known
        .iter()
        .map(|k| (*k, strsim::damerau_levenshtein(input, k)))
        .filter(|(_, dist)| *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(k, _)| k.to_string())
}

fn join_path(base: &str, key: &str) -> String {
    if base.is_empty() {
        key.to_string()
    } else {
        format!("{base}.{key}")
    }
}

/// Short description of a value's type for messages.
pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "an object",
        Value::Tagged(_) => "a tagged value",
    }
}

// ============================================================================
// Tests
// ============================================================================
