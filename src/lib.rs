//! `themecfg` - Loader and validator for utility-CSS build configuration
//!
//! Reads a project's declarative styling configuration (content globs, dark
//! mode strategy, theme extensions, plugins), resolves presets, and hands the
//! build a validated, immutable [`config::ConfigDocument`].

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
