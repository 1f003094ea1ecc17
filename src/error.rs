//! Error types for `themecfg`
//!
//! Configuration errors carry enough context (file, line, field path) to be
//! reported directly to the invoking build process. The top-level error maps
//! every failure onto a process exit code.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `themecfg` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (malformed source, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `themecfg` operations.
#[derive(Debug, Error)]
pub enum ThemeCfgError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// One or more files failed `validate`
    #[error("{invalid} of {total} configuration file(s) failed validation")]
    InvalidFiles {
        /// Number of files that failed
        invalid: usize,
        /// Number of files checked
        total: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ThemeCfgError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(ConfigError::MissingFile { .. }) | Self::Io(_) => ExitCode::IO_ERROR,
            Self::Config(_) | Self::InvalidFiles { .. } | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::Json(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
///
/// `ParseError` and `ValidationError` are the two primary kinds: the first
/// means the source is not well-formed structured data, the second that it is
/// well-formed but violates the schema. Neither is transient.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Source text could not be parsed
    #[error("parse error in {path}{}: {message}", fmt_line(.line.as_ref()))]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Source parsed but violates the schema
    #[error("validation failed for {path}: {}", fmt_issues(.errors))]
    ValidationError {
        /// Path to the configuration file
        path: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Preset chain refers back to a file already being resolved
    #[error("circular preset detected: {cycle:?}")]
    CircularPreset {
        /// The chain of files forming the cycle
        cycle: Vec<PathBuf>,
    },

    /// Configuration or preset file not found or unreadable
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// A loader limit or directive value is out of range
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },
}

impl ConfigError {
    /// Returns the validation issues carried by a `ValidationError`.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::ValidationError { errors, .. } => errors,
            _ => &[],
        }
    }
}

fn fmt_line(line: Option<&usize>) -> String {
    line.map_or_else(String::new, |l| format!(":{l}"))
}

fn fmt_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{} at {}", i.message, display_path(&i.path)))
        .collect::<Vec<_>>()
        .join("; ")
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "<root>" } else { path }
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found during configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Path to the problematic field (e.g., "theme.extend.colors.primary")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, display_path(&self.path))
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Prevents the configuration from being used
    Error,
    /// Reported but does not prevent loading (unless strict)
    Warning,
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `themecfg` operations.
pub type Result<T> = std::result::Result<T, ThemeCfgError>;

// ============================================================================
// Tests
// ============================================================================
