//! Error types for field construction and configuration.

use thiserror::Error;

/// Errors raised while building validators, styles or field configuration.
///
/// Validation failures are not errors: they are reported through the
/// boolean result of `validate()` and the field's active validator.
#[derive(Debug, Error)]
pub enum Error {
    /// A pattern rule was given a regex that does not compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// The underlying regex error.
        source: regex::Error,
    },

    /// A color string could not be parsed as a CSS color.
    #[error("invalid color '{0}'")]
    InvalidColor(String),

    /// The field configuration is not valid JSON for `FieldConfig`.
    #[error("invalid field configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The field configuration file could not be read.
    #[error("failed to read field configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
