//! `show` command
//!
//! Loads one configuration file and prints the resolved document (presets
//! merged, defaults applied) in source shape on stdout.

use crate::cli::args::{DocumentFormat, ShowArgs};
use crate::config::ConfigLoader;
use crate::error::ThemeCfgError;

/// Load and print a configuration document.
///
/// # Errors
///
/// Returns the loader error if the file cannot be loaded, or a serialization
/// error if the document cannot be rendered.
pub fn run(args: &ShowArgs) -> Result<(), ThemeCfgError> {
    let mut loader = ConfigLoader::new(args.load.loader_options());
    let result = loader.load(&args.file)?;

    for warning in &result.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }
    tracing::info!(
        file = %args.file.display(),
        sources = result.sources.len(),
        "configuration resolved"
    );

    let rendered = match args.format {
        DocumentFormat::Json => serde_json::to_string_pretty(&*result.document)?,
        DocumentFormat::Yaml => serde_yaml::to_string(&*result.document)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
