//! Observability module
//!
//! Structured logging for configuration loads and CLI runs.

pub mod logging;

pub use logging::{LogFormat, init_logging, verbosity_to_directive};
