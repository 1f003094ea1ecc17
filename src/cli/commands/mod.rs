//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod show;
pub mod validate;
pub mod version;

use crate::cli::args::{Cli, Commands};
use crate::error::ThemeCfgError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), ThemeCfgError> {
    match cli.command {
        Commands::Validate(args) => validate::run(&args, cli.quiet),
        Commands::Show(args) => show::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => version::run(&args),
    }
}
