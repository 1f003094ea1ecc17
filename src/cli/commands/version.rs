//! Version information display

use serde::Serialize;

use crate::cli::args::{OutputFormat, VersionArgs};
use crate::error::ThemeCfgError;

#[derive(Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
}

/// Print version information.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(args: &VersionArgs) -> Result<(), ThemeCfgError> {
    let info = VersionInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    };

    match args.format {
        OutputFormat::Human => println!("{} {}", info.name, info.version),
        OutputFormat::Json => println!("{}", serde_json::to_string(&info)?),
    }
    Ok(())
}
