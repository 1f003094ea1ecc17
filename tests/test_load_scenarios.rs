mod common;

use common::fixture_path;
use themecfg::config::{
    self, ConfigDocument, ConfigLoader, DarkModeStrategy, LoaderOptions, SourceFormat, TokenValue,
};
use themecfg::error::ConfigError;

/// Class-based dark mode with a hex primary color.
#[test]
fn scenario_class_dark_mode_and_primary_color() {
    let doc = config::load(&fixture_path("tailwind.config.js")).unwrap();

    assert_eq!(doc.dark_mode, DarkModeStrategy::Class);
    assert_eq!(
        doc.extension_token("colors", "primary"),
        Some(&TokenValue::from("#e30613"))
    );
    assert_eq!(
        doc.content_patterns,
        vec!["./templates/**/*.html", "./static/js/**/*.js"]
    );
    let plugins: Vec<&str> = doc.plugins.iter().map(|p| p.as_str()).collect();
    assert_eq!(plugins, vec!["@tailwindcss/forms", "@tailwindcss/typography"]);
}

#[test]
fn nested_scales_and_font_stacks_are_typed() {
    let doc = config::load(&fixture_path("tailwind.config.js")).unwrap();

    let Some(TokenValue::Scale(accent)) = doc.extension_token("colors", "accent") else {
        panic!("accent should be a scale");
    };
    assert_eq!(accent["DEFAULT"], TokenValue::from("#f7b500"));
    assert_eq!(
        doc.extension_token("fontFamily", "sans")
            .and_then(TokenValue::as_stack)
            .map(<[String]>::len),
        Some(3)
    );
}

/// Omitted plugins default to an empty list.
#[test]
fn scenario_plugins_omitted() {
    let doc = config::load(&fixture_path("no_plugins.yaml")).unwrap();
    assert!(doc.plugins.is_empty());
    assert_eq!(doc.dark_mode, DarkModeStrategy::Media);
}

#[test]
fn minimal_json_gets_defaults() {
    let doc = config::load(&fixture_path("minimal.json")).unwrap();
    assert_eq!(doc.content_patterns, vec!["./src/**/*.{html,js}"]);
    assert_eq!(doc.dark_mode, DarkModeStrategy::Media);
    assert!(doc.plugins.is_empty());
    assert!(doc.theme_extensions().is_empty());
}

/// An unrecognized dark-mode value is rejected, never defaulted.
#[test]
fn scenario_unknown_dark_mode_rejected() {
    let err = config::load(&fixture_path("dark_auto.config.js")).unwrap_err();
    let ConfigError::ValidationError { ref errors, .. } = err else {
        panic!("expected ValidationError, got {err:?}");
    };
    assert!(errors.iter().any(|e| e.path == "darkMode"));
    assert!(err.to_string().contains("darkMode"));
}

/// A source cut off mid-object is a parse error.
#[test]
fn scenario_truncated_source_is_parse_error() {
    let err = config::load(&fixture_path("truncated.config.js")).unwrap_err();
    assert!(
        matches!(err, ConfigError::ParseError { line: Some(_), .. }),
        "expected ParseError with line, got {err:?}"
    );
}

#[test]
fn empty_file_is_parse_error() {
    let err = config::load(&fixture_path("empty.yaml")).unwrap_err();
    let ConfigError::ParseError { message, .. } = err else {
        panic!("expected ParseError");
    };
    assert!(message.contains("empty"));
}

#[test]
fn missing_file_is_reported() {
    let err = config::load(&fixture_path("nope.config.js")).unwrap_err();
    assert!(matches!(err, ConfigError::MissingFile { .. }));
}

#[test]
fn load_is_idempotent() {
    let path = fixture_path("tailwind.config.js");
    let first = config::load(&path).unwrap();
    let second = config::load(&path).unwrap();
    assert_eq!(first, second);
}

fn reload_json(doc: &ConfigDocument) -> ConfigDocument {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roundtrip.json");
    std::fs::write(&path, serde_json::to_string_pretty(doc).unwrap()).unwrap();
    config::load(&path).unwrap()
}

#[test]
fn serialized_document_reloads_equal() {
    for fixture in ["tailwind.config.js", "no_plugins.yaml", "minimal.json"] {
        let doc = config::load(&fixture_path(fixture)).unwrap();
        assert_eq!(reload_json(&doc), doc, "round trip changed {fixture}");
    }
}

#[test]
fn yaml_output_reloads_equal() {
    let doc = config::load(&fixture_path("tailwind.config.js")).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roundtrip.yaml");
    std::fs::write(&path, serde_yaml::to_string(&doc).unwrap()).unwrap();
    assert_eq!(config::load(&path).unwrap(), doc);
}

#[test]
fn supplementary_fields_survive_round_trip() {
    let src = "module.exports = {\n  content: ['a.html'],\n  prefix: 'tw-',\n  important: '#app',\n  separator: '_',\n  theme: { spacing: { px: '1px' } },\n}\n";
    let result = ConfigLoader::with_defaults()
        .load_from_str(src, SourceFormat::ObjectLiteral)
        .unwrap();
    let doc = (*result.document).clone();
    assert_eq!(doc.prefix, "tw-");
    assert_eq!(doc.separator, "_");
    assert!(doc.theme.overrides.contains_key("spacing"));
    assert_eq!(reload_json(&doc), doc);
}

#[test]
fn odd_color_warns_but_loads() {
    let mut loader = ConfigLoader::with_defaults();
    let result = loader.load(&fixture_path("odd_color.config.js")).unwrap();
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(
        result.warnings[0].location.as_deref(),
        Some("theme.extend.colors.primary")
    );
}

#[test]
fn odd_color_fails_in_strict_mode() {
    let mut loader = ConfigLoader::new(LoaderOptions {
        strict: true,
        ..LoaderOptions::default()
    });
    let err = loader.load(&fixture_path("odd_color.config.js")).unwrap_err();
    assert_eq!(err.issues().len(), 1);
}

#[test]
fn color_check_can_be_disabled() {
    let mut loader = ConfigLoader::new(LoaderOptions {
        strict: true,
        check_colors: false,
        ..LoaderOptions::default()
    });
    assert!(loader.load(&fixture_path("odd_color.config.js")).is_ok());
}
