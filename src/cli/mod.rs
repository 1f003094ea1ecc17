//! Command-line interface
//!
//! Argument definitions and command handlers for the `themecfg` binary.

pub mod args;
pub mod commands;
