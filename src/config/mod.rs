//! Configuration module
//!
//! Loads, parses, merges and validates utility-CSS build configuration
//! files into an immutable [`ConfigDocument`].

pub mod color;
pub mod loader;
pub mod schema;
pub mod source;
pub mod validation;

pub use loader::{ConfigLimits, ConfigLoader, LoadResult, LoadWarning, LoaderOptions, load};
pub use schema::*;
pub use source::SourceFormat;
pub use validation::{ValidationOptions, ValidationResult, Validator};
