//! `validate` command
//!
//! Loads every file independently and reports all issues found. A file that
//! fails to load does not stop the others from being checked.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::{ConfigLoader, LoaderOptions};
use crate::error::{ConfigError, Severity, ThemeCfgError, ValidationIssue};

/// Outcome for one file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// File as given on the command line.
    pub path: PathBuf,
    /// Whether the file loaded successfully.
    pub valid: bool,
    /// Errors, including parse and preset failures.
    pub errors: Vec<IssueReport>,
    /// Warnings.
    pub warnings: Vec<IssueReport>,
}

/// One reported issue.
#[derive(Debug, Serialize)]
pub struct IssueReport {
    /// Field path, `None` for file-level failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Description.
    pub message: String,
}

#[derive(Debug, Serialize)]
struct Summary {
    total: usize,
    valid: usize,
    invalid: usize,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    files: &'a [FileReport],
    summary: Summary,
}

/// Validate configuration files.
///
/// # Errors
///
/// Returns `InvalidFiles` if any file failed, or a serialization error if the
/// JSON report cannot be rendered.
pub fn run(args: &ValidateArgs, quiet: bool) -> Result<(), ThemeCfgError> {
    let options = args.load.loader_options();
    let reports: Vec<FileReport> = args
        .files
        .iter()
        .map(|path| check_file(path, &options))
        .collect();

    let invalid = reports.iter().filter(|r| !r.valid).count();
    let summary = Summary {
        total: reports.len(),
        valid: reports.len() - invalid,
        invalid,
    };

    match args.format {
        OutputFormat::Human => print_human(&reports, quiet),
        OutputFormat::Json => {
            let report = Report {
                files: &reports,
                summary,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if invalid > 0 {
        return Err(ThemeCfgError::InvalidFiles {
            invalid,
            total: reports.len(),
        });
    }
    Ok(())
}

/// Loads one file and collects its issues.
#[must_use]
pub fn check_file(path: &Path, options: &LoaderOptions) -> FileReport {
    tracing::info!(file = %path.display(), "validating configuration");

    let mut loader = ConfigLoader::new(options.clone());
    match loader.load(path) {
        Ok(result) => {
            tracing::info!(file = %path.display(), "configuration valid");
            FileReport {
                path: path.to_path_buf(),
                valid: true,
                errors: Vec::new(),
                warnings: result
                    .warnings
                    .into_iter()
                    .map(|w| IssueReport {
                        field: w.location,
                        message: w.message,
                    })
                    .collect(),
            }
        }
        Err(err) => {
            tracing::debug!(file = %path.display(), error = %err, "configuration invalid");
            FileReport {
                path: path.to_path_buf(),
                valid: false,
                errors: error_issues(err),
                warnings: Vec::new(),
            }
        }
    }
}

fn error_issues(err: ConfigError) -> Vec<IssueReport> {
    match err {
        ConfigError::ValidationError { errors, .. } => errors
            .into_iter()
            .filter(|issue| issue.severity == Severity::Error)
            .map(issue_report)
            .collect(),
        other => vec![IssueReport {
            field: None,
            message: other.to_string(),
        }],
    }
}

fn issue_report(issue: ValidationIssue) -> IssueReport {
    IssueReport {
        field: Some(issue.path),
        message: issue.message,
    }
}

/// Prints one status line per file; `quiet` keeps only invalid files and their errors.
fn print_human(reports: &[FileReport], quiet: bool) {
    for report in reports {
        if quiet && report.valid {
            continue;
        }
        let status = if report.valid { "ok" } else { "invalid" };
        println!("{}: {status}", report.path.display());

        let warnings: &[IssueReport] = if quiet { &[] } else { &report.warnings };
        for (label, issues) in [("error", report.errors.as_slice()), ("warning", warnings)] {
            for issue in issues {
                match issue.field.as_deref() {
                    Some("") => eprintln!("  {label}: {} at <root>", issue.message),
                    Some(field) => eprintln!("  {label}: {} at {field}", issue.message),
                    None => eprintln!("  {label}: {}", issue.message),
                }
            }
        }
    }
}
