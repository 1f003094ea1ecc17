//! Configuration loader
//!
//! This module implements the configuration loading pipeline:
//! 1. Size check and raw read (UTF-8 BOM stripped)
//! 2. Parsing (YAML/JSON directly, JavaScript modules through `oxc_parser`)
//! 3. Empty-document check
//! 4. `presets` resolution and merge
//! 5. Validation into a typed `ConfigDocument`
//! 6. Freeze with `Arc`

use crate::config::schema::ConfigDocument;
use crate::config::source::{self, SourceFormat};
use crate::config::validation::{ValidationOptions, Validator, describe};
use crate::error::{ConfigError, Severity, ValidationIssue};

use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ============================================================================
// Public API
// ============================================================================

/// Options for the configuration loader.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Promote every warning to an error.
    pub strict: bool,

    /// Check that color tokens are CSS color literals.
    pub check_colors: bool,

    /// Limits for configuration size.
    pub limits: ConfigLimits,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            strict: false,
            check_colors: true,
            limits: ConfigLimits::default(),
        }
    }
}

/// Limits for configuration size to prevent resource exhaustion.
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    /// Maximum configuration file size in bytes.
    pub max_config_size: usize,

    /// Maximum preset nesting depth.
    pub max_preset_depth: usize,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_config_size: env_or("THEMECFG_MAX_CONFIG_SIZE", 1024 * 1024),
            max_preset_depth: env_or("THEMECFG_MAX_PRESET_DEPTH", 8),
        }
    }
}

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration.
    pub document: Arc<ConfigDocument>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,

    /// Every file read, the entry file first, then presets in resolution order.
    pub sources: Vec<PathBuf>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

/// Configuration loader.
///
/// Handles the full pipeline from source file to frozen `ConfigDocument`.
/// Parsed preset files are cached per loader instance.
#[derive(Debug)]
pub struct ConfigLoader {
    options: LoaderOptions,
    preset_cache: HashMap<PathBuf, Value>,
}

impl ConfigLoader {
    /// Creates a new configuration loader with the given options.
    #[must_use]
    pub fn new(options: LoaderOptions) -> Self {
        Self {
            options,
            preset_cache: HashMap::new(),
        }
    }

    /// Creates a new configuration loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Loads a configuration file and returns the frozen document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read or exceeds the size limit
    /// - The source is not well-formed (`ParseError`)
    /// - Preset resolution fails (missing file, cycle, depth)
    /// - Validation fails (`ValidationError`)
    pub fn load(&mut self, path: &Path) -> Result<LoadResult, ConfigError> {
        tracing::debug!(path = %path.display(), "loading configuration");

        let root = read_source(path, &self.options.limits)?;
        let base_dir = path.parent().map_or_else(PathBuf::new, Path::to_path_buf);

        let mut sources = vec![path.to_path_buf()];
        let mut resolver = PresetResolver::new(&self.options.limits);
        if let Ok(canonical) = path.canonicalize() {
            resolver.stack.push(canonical);
        }
        let merged = resolver.resolve(root, &base_dir, 0, &mut self.preset_cache)?;
        sources.extend(resolver.visited);

        self.finish(merged, &path.display().to_string(), sources)
    }

    /// Loads configuration from in-memory source text.
    ///
    /// Presets are resolved relative to the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigLoader::load`], minus the file read.
    pub fn load_from_str(
        &mut self,
        source: &str,
        format: SourceFormat,
    ) -> Result<LoadResult, ConfigError> {
        let origin = PathBuf::from("<inline>");
        if source.len() > self.options.limits.max_config_size {
            return Err(size_error(source.len(), &self.options.limits));
        }
        let root = parse_source(source, format, &origin)?;

        let mut resolver = PresetResolver::new(&self.options.limits);
        let merged = resolver.resolve(root, Path::new("."), 0, &mut self.preset_cache)?;

        self.finish(merged, "<inline>", resolver.visited)
    }

    /// Validates the merged tree and freezes the document.
    fn finish(
        &self,
        root: Value,
        label: &str,
        sources: Vec<PathBuf>,
    ) -> Result<LoadResult, ConfigError> {
        let mut validator = Validator::with_options(ValidationOptions {
            check_colors: self.options.check_colors,
        });
        let result = validator.validate(&root);

        let mut errors = result.errors;
        let mut warnings = result.warnings;
        if self.options.strict {
            errors.extend(warnings.drain(..).map(|w| ValidationIssue {
                severity: Severity::Error,
                ..w
            }));
        }

        let document = match result.document {
            Some(document) if errors.is_empty() => document,
            _ => {
                return Err(ConfigError::ValidationError {
                    path: label.to_string(),
                    errors,
                });
            }
        };

        tracing::debug!(
            source = label,
            content_patterns = document.content_patterns.len(),
            plugins = document.plugins.len(),
            warnings = warnings.len(),
            "configuration loaded"
        );

        Ok(LoadResult {
            document: Arc::new(document),
            warnings: warnings
                .into_iter()
                .map(|issue| LoadWarning {
                    message: issue.message,
                    location: Some(issue.path),
                })
                .collect(),
            sources,
        })
    }
}

/// Loads a configuration file with default options.
///
/// # Errors
///
/// Returns `ParseError` if the source is malformed, `ValidationError` if it
/// violates the schema, and `MissingFile` if it cannot be read.
pub fn load(path: &Path) -> Result<ConfigDocument, ConfigError> {
    let result = ConfigLoader::with_defaults().load(path)?;
    for warning in &result.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }
    Ok(Arc::unwrap_or_clone(result.document))
}

// ============================================================================
// Source Reading
// ============================================================================

/// Reads and parses one source file.
fn read_source(path: &Path, limits: &ConfigLimits) -> Result<Value, ConfigError> {
    let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
        path: path.to_path_buf(),
    })?;

    let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
    if file_size > limits.max_config_size {
        return Err(size_error(file_size, limits));
    }

    let bytes = std::fs::read(path).map_err(|_| ConfigError::MissingFile {
        path: path.to_path_buf(),
    })?;
    let raw = String::from_utf8(bytes).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        line: None,
        message: format!("source is not valid UTF-8: {e}"),
    })?;

    parse_source(&raw, SourceFormat::from_path(path), path)
}

/// Parses source text into a value tree.
fn parse_source(raw: &str, format: SourceFormat, path: &Path) -> Result<Value, ConfigError> {
    // Handle UTF-8 BOM
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let root = source::parse(raw, format).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        line: e.line,
        message: e.message,
    })?;

    if root.is_null() {
        return Err(ConfigError::ParseError {
            path: path.to_path_buf(),
            line: None,
            message: "Configuration file is empty".to_string(),
        });
    }

    Ok(root)
}

fn size_error(size: usize, limits: &ConfigLimits) -> ConfigError {
    ConfigError::InvalidValue {
        field: "file_size".to_string(),
        value: format!("{size} bytes"),
        expected: format!("at most {} bytes", limits.max_config_size),
    }
}

// ============================================================================
// Preset Resolution
// ============================================================================

/// Resolves `presets` entries, merging each preset underneath its includer.
struct PresetResolver {
    limits: ConfigLimits,
    stack: Vec<PathBuf>,
    visited: Vec<PathBuf>,
}

impl PresetResolver {
    fn new(limits: &ConfigLimits) -> Self {
        Self {
            limits: limits.clone(),
            stack: Vec::new(),
            visited: Vec::new(),
        }
    }

    /// Returns `root` with its presets merged in and the `presets` key removed.
    ///
    /// `depth` is the nesting level of `root`: 0 for the entry source.
    fn resolve(
        &mut self,
        mut root: Value,
        base_dir: &Path,
        depth: usize,
        cache: &mut HashMap<PathBuf, Value>,
    ) -> Result<Value, ConfigError> {
        let Value::Mapping(map) = &mut root else {
            return Ok(root);
        };
        let Some(presets) = map.remove("presets") else {
            return Ok(root);
        };
        let entries = preset_entries(presets)?;

        let mut merged: Option<Value> = None;
        for entry in entries {
            let path = Self::resolve_path(&entry, base_dir)?;

            if self.stack.contains(&path) {
                let mut cycle = self.stack.clone();
                cycle.push(path);
                return Err(ConfigError::CircularPreset { cycle });
            }

            let preset_depth = depth + 1;
            if preset_depth > self.limits.max_preset_depth {
                return Err(ConfigError::InvalidValue {
                    field: "presets depth".to_string(),
                    value: preset_depth.to_string(),
                    expected: format!("at most {} levels", self.limits.max_preset_depth),
                });
            }

            tracing::debug!(preset = %path.display(), "resolving preset");
            let preset = self.load_cached(&path, cache)?;
            if !preset.is_mapping() {
                return Err(ConfigError::ValidationError {
                    path: path.display().to_string(),
                    errors: vec![ValidationIssue {
                        path: String::new(),
                        message: format!(
                            "Preset must be an object, found {}",
                            describe(&preset)
                        ),
                        severity: Severity::Error,
                    }],
                });
            }
            let preset_dir = path.parent().map_or_else(PathBuf::new, Path::to_path_buf);

            self.visited.push(path.clone());
            self.stack.push(path);
            let preset = self.resolve(preset, &preset_dir, preset_depth, cache)?;
            self.stack.pop();

            merged = Some(match merged {
                Some(mut base) => {
                    merge_config(&mut base, preset);
                    base
                }
                None => preset,
            });
        }

        Ok(match merged {
            Some(mut base) => {
                merge_config(&mut base, root);
                base
            }
            None => root,
        })
    }

    /// Resolves a preset reference relative to the including file.
    fn resolve_path(entry: &str, base_dir: &Path) -> Result<PathBuf, ConfigError> {
        let candidate = Path::new(entry);
        let joined = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            base_dir.join(candidate)
        };

        joined
            .canonicalize()
            .map_err(|_| ConfigError::MissingFile { path: joined })
    }

    /// Loads a preset file with caching.
    fn load_cached(
        &self,
        path: &Path,
        cache: &mut HashMap<PathBuf, Value>,
    ) -> Result<Value, ConfigError> {
        if let Some(cached) = cache.get(path) {
            return Ok(cached.clone());
        }
        let value = read_source(path, &self.limits)?;
        cache.insert(path.to_path_buf(), value.clone());
        Ok(value)
    }
}

/// Extracts preset references from the `presets` value.
fn preset_entries(value: Value) -> Result<Vec<String>, ConfigError> {
    let invalid = |path: String, message: String| ConfigError::ValidationError {
        path: "presets".to_string(),
        errors: vec![ValidationIssue {
            path,
            message,
            severity: Severity::Error,
        }],
    };

    match value {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(seq) => seq
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::String(s) if !s.trim().is_empty() => Ok(s),
                _ => Err(invalid(
                    format!("presets[{idx}]"),
                    "Preset reference must be a non-empty path string".to_string(),
                )),
            })
            .collect(),
        _ => Err(invalid(
            "presets".to_string(),
            "'presets' must be a list of paths".to_string(),
        )),
    }
}

// ============================================================================
// Merge
// ============================================================================

/// Merges `overlay` (the including document) onto `base` (a preset).
///
/// - `theme.extend` is deep-merged per dimension and token
/// - other `theme` dimensions are replaced wholesale
/// - `plugins` are concatenated, base first
/// - every other key is replaced
pub(crate) fn merge_config(base: &mut Value, overlay: Value) {
    let (Value::Mapping(base_map), Value::Mapping(overlay_map)) = (&mut *base, overlay) else {
        return;
    };

    for (key, value) in overlay_map {
        match key.as_str() {
            Some("theme") => merge_theme(base_map, value),
            Some("plugins") => {
                let base_is_list = matches!(base_map.get("plugins"), Some(Value::Sequence(_)));
                match value {
                    Value::Sequence(more) if base_is_list => {
                        if let Some(Value::Sequence(existing)) = base_map.get_mut("plugins") {
                            existing.extend(more);
                        }
                    }
                    value => {
                        base_map.insert(key, value);
                    }
                }
            }
            _ => {
                base_map.insert(key, value);
            }
        }
    }
}

fn merge_theme(base_map: &mut Mapping, overlay_theme: Value) {
    let base_is_mapping = matches!(base_map.get("theme"), Some(Value::Mapping(_)));
    match overlay_theme {
        Value::Mapping(overlay_theme) if base_is_mapping => {
            let Some(Value::Mapping(base_theme)) = base_map.get_mut("theme") else {
                return;
            };
            for (key, value) in overlay_theme {
                if key.as_str() == Some("extend") {
                    match base_theme.get_mut("extend") {
                        Some(existing) => deep_merge(existing, &value),
                        None => {
                            base_theme.insert(key, value);
                        }
                    }
                } else {
                    base_theme.insert(key, value);
                }
            }
        }
        other => {
            base_map.insert(Value::from("theme"), other);
        }
    }
}

/// Deep merges override into base.
///
/// For mappings: recursively merge keys.
/// For other types: override replaces base.
fn deep_merge(base: &mut Value, override_val: &Value) {
    match (base, override_val) {
        (Value::Mapping(base_map), Value::Mapping(override_map)) => {
            for (key, override_value) in override_map {
                if let Some(base_value) = base_map.get_mut(key) {
                    deep_merge(base_value, override_value);
                } else {
                    base_map.insert(key.clone(), override_value.clone());
                }
            }
        }
        (base, override_val) => {
            *base = override_val.clone();
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parses an environment variable with a default value.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{DarkModeStrategy, TokenValue};

    fn yaml(src: &str) -> Value {
        serde_yaml::from_str(src).unwrap()
    }

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_deep_merge_simple() {
        let mut base = yaml("a: 1\nb: 2");
        deep_merge(&mut base, &yaml("b: 3\nc: 4"));
        assert_eq!(base, yaml("a: 1\nb: 3\nc: 4"));
    }

    #[test]
    fn test_deep_merge_nested() {
        let mut base = yaml("colors: { primary: red, secondary: blue }");
        deep_merge(&mut base, &yaml("colors: { primary: green }"));
        assert_eq!(base, yaml("colors: { primary: green, secondary: blue }"));
    }

    #[test]
    fn test_merge_config_rules() {
        let mut base = yaml(
            "content: [base.html]\n\
             darkMode: media\n\
             plugins: [a]\n\
             theme:\n  screens: { sm: 1px, md: 2px }\n  extend:\n    colors: { brand: red, accent: gold }\n",
        );
        let overlay = yaml(
            "content: [app.html]\n\
             darkMode: class\n\
             plugins: [b]\n\
             theme:\n  screens: { lg: 3px }\n  extend:\n    colors: { brand: '#e30613' }\n    fontFamily: { sans: [Inter] }\n",
        );
        merge_config(&mut base, overlay);

        assert_eq!(base["content"], yaml("[app.html]"));
        assert_eq!(base["darkMode"], Value::from("class"));
        assert_eq!(base["plugins"], yaml("[a, b]"));
        assert_eq!(base["theme"]["screens"], yaml("{ lg: 3px }"));
        assert_eq!(
            base["theme"]["extend"]["colors"],
            yaml("{ brand: '#e30613', accent: gold }")
        );
        assert_eq!(base["theme"]["extend"]["fontFamily"]["sans"], yaml("[Inter]"));
    }

    #[test]
    fn test_merge_config_keeps_base_when_overlay_silent() {
        let mut base = yaml("content: [base.html]\ndarkMode: class\nplugins: [a]");
        merge_config(&mut base, yaml("prefix: tw-"));
        assert_eq!(base["content"], yaml("[base.html]"));
        assert_eq!(base["darkMode"], Value::from("class"));
        assert_eq!(base["plugins"], yaml("[a]"));
        assert_eq!(base["prefix"], Value::from("tw-"));
    }

    #[test]
    fn test_config_limits_default() {
        let limits = ConfigLimits::default();
        assert!(limits.max_config_size > 0);
        assert!(limits.max_preset_depth > 0);
    }

    #[test]
    fn test_loader_options_default() {
        let options = LoaderOptions::default();
        assert!(!options.strict);
        assert!(options.check_colors);
    }

    #[test]
    fn test_load_from_str_object_literal() {
        let mut loader = ConfigLoader::with_defaults();
        let result = loader
            .load_from_str(
                "module.exports = { content: ['./a.html'], darkMode: 'class' }",
                SourceFormat::ObjectLiteral,
            )
            .unwrap();
        assert_eq!(result.document.dark_mode, DarkModeStrategy::Class);
        assert!(result.sources.is_empty());
    }

    #[test]
    fn test_empty_source_is_parse_error() {
        let mut loader = ConfigLoader::with_defaults();
        let err = loader.load_from_str("", SourceFormat::Yaml).unwrap_err();
        assert!(
            matches!(err, ConfigError::ParseError { ref message, .. } if message.contains("empty"))
        );
    }

    #[test]
    fn test_size_limit() {
        let mut loader = ConfigLoader::new(LoaderOptions {
            limits: ConfigLimits {
                max_config_size: 8,
                max_preset_depth: 8,
            },
            ..LoaderOptions::default()
        });
        let err = loader
            .load_from_str("content: [a, b, c, d]", SourceFormat::Yaml)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "file_size"));
    }

    #[test]
    fn test_strict_promotes_warnings() {
        let mut loader = ConfigLoader::new(LoaderOptions {
            strict: true,
            ..LoaderOptions::default()
        });
        let err = loader
            .load_from_str("content: []", SourceFormat::Yaml)
            .unwrap_err();
        let issues = err.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "content");
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn test_missing_file() {
        let mut loader = ConfigLoader::with_defaults();
        let err = loader
            .load(Path::new("/nonexistent/themecfg/tailwind.config.js"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.yaml");
        std::fs::write(&path, b"\xff\xfe\x00\x01").unwrap();
        let err = ConfigLoader::with_defaults().load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_bom_is_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bom.json", "\u{feff}{\"content\": [\"a.html\"]}");
        let result = ConfigLoader::with_defaults().load(&path).unwrap();
        assert_eq!(result.document.content_patterns, vec!["a.html"]);
    }

    #[test]
    fn test_preset_merge_from_files() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "base.config.js",
            "module.exports = {\n  darkMode: 'class',\n  theme: { extend: { colors: { accent: '#f7b500', primary: 'red' } } },\n  plugins: ['base-plugin'],\n}\n",
        );
        let app = write(
            dir.path(),
            "tailwind.config.js",
            "module.exports = {\n  presets: [require('./base.config.js')],\n  content: ['./templates/**/*.html'],\n  theme: { extend: { colors: { primary: '#e30613' } } },\n  plugins: ['app-plugin'],\n}\n",
        );

        let result = ConfigLoader::with_defaults().load(&app).unwrap();
        let doc = &result.document;
        assert_eq!(doc.dark_mode, DarkModeStrategy::Class);
        assert_eq!(
            doc.extension_token("colors", "primary"),
            Some(&TokenValue::from("#e30613"))
        );
        assert_eq!(
            doc.extension_token("colors", "accent"),
            Some(&TokenValue::from("#f7b500"))
        );
        let plugins: Vec<&str> = doc.plugins.iter().map(|p| p.as_str()).collect();
        assert_eq!(plugins, vec!["base-plugin", "app-plugin"]);
        assert_eq!(result.sources.len(), 2);
    }

    #[test]
    fn test_preset_cycle_detected() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.yaml", "presets: [b.yaml]\ncontent: [a]");
        write(dir.path(), "b.yaml", "presets: [a.yaml]");
        let err = ConfigLoader::with_defaults()
            .load(&dir.path().join("a.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::CircularPreset { ref cycle } if cycle.len() == 3));
    }

    #[test]
    fn test_preset_self_reference_detected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "self.yaml", "presets: [self.yaml]\ncontent: [a]");
        let err = ConfigLoader::with_defaults().load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::CircularPreset { .. }));
    }

    #[test]
    fn test_missing_preset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "app.yaml", "presets: [gone.yaml]\ncontent: [a]");
        let err = ConfigLoader::with_defaults().load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    fn depth_limited_loader(max_preset_depth: usize) -> ConfigLoader {
        ConfigLoader::new(LoaderOptions {
            limits: ConfigLimits {
                max_config_size: 1024,
                max_preset_depth,
            },
            ..LoaderOptions::default()
        })
    }

    fn is_depth_error(err: &ConfigError) -> bool {
        matches!(err, ConfigError::InvalidValue { field, .. } if field == "presets depth")
    }

    #[test]
    fn test_preset_depth_limit() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "p0.yaml", "presets: [p1.yaml]\ncontent: [a]");
        write(dir.path(), "p1.yaml", "presets: [p2.yaml]");
        write(dir.path(), "p2.yaml", "presets: [p3.yaml]");
        write(dir.path(), "p3.yaml", "darkMode: class");
        let err = depth_limited_loader(1)
            .load(&dir.path().join("p0.yaml"))
            .unwrap_err();
        assert!(is_depth_error(&err));
    }

    #[test]
    fn test_preset_depth_same_for_file_and_inline_entry() {
        let dir = tempfile::tempdir().unwrap();
        let p1 = write(dir.path(), "p1.yaml", "presets: [p2.yaml]");
        write(dir.path(), "p2.yaml", "darkMode: class");
        let p0 = write(dir.path(), "p0.yaml", "presets: [p1.yaml]\ncontent: [a]");
        let inline = format!("presets: ['{}']\ncontent: [a]", p1.display());

        // p0 -> p1 -> p2 nests two levels below the entry
        let err = depth_limited_loader(1).load(&p0).unwrap_err();
        assert!(is_depth_error(&err));
        let err = depth_limited_loader(1)
            .load_from_str(&inline, SourceFormat::Yaml)
            .unwrap_err();
        assert!(is_depth_error(&err));

        let from_file = depth_limited_loader(2).load(&p0).unwrap();
        let from_str = depth_limited_loader(2)
            .load_from_str(&inline, SourceFormat::Yaml)
            .unwrap();
        assert_eq!(from_file.document, from_str.document);
        assert_eq!(from_file.document.dark_mode, DarkModeStrategy::Class);
    }

    #[test]
    fn test_non_object_preset_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write(dir.path(), "bad.yaml", "- not\n- an object\n");
        write(dir.path(), "good.yaml", "darkMode: class");

        for presets in ["[bad.yaml, good.yaml]", "[good.yaml, bad.yaml]"] {
            let app = write(
                dir.path(),
                "app.yaml",
                &format!("presets: {presets}\ncontent: [a]"),
            );
            let err = ConfigLoader::with_defaults().load(&app).unwrap_err();
            let ConfigError::ValidationError { path, errors } = &err else {
                panic!("expected ValidationError for {presets}, got {err:?}");
            };
            assert_eq!(path, &bad.canonicalize().unwrap().display().to_string());
            assert!(errors[0].message.contains("found a list"));
        }
    }

    #[test]
    fn test_invalid_preset_entry() {
        let err = ConfigLoader::with_defaults()
            .load_from_str("presets: [3]\ncontent: [a]", SourceFormat::Yaml)
            .unwrap_err();
        assert_eq!(err.issues()[0].path, "presets[0]");
    }
}
