//! Declarative field configuration.
//!
//! A [`FieldConfig`] describes a password field's style and validator chain
//! as JSON, so forms can be configured without code:
//!
//! ```json
//! {
//!   "style": { "label_float": true, "focus_color": "#4059a9" },
//!   "validators": [
//!     { "kind": "required", "message": "Password is required" },
//!     { "kind": "min_length", "min": 8, "message": "At least 8 characters" },
//!     { "kind": "pattern", "pattern": "[0-9]", "message": "Add a digit" }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::styling::FieldStyle;
use crate::validation::Validator;

/// Style and validators for one password field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Presentation settings
    pub style: FieldStyle,
    /// Validators in evaluation order
    pub validators: Vec<RuleConfig>,
}

impl FieldConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        debug!(
            "loaded field config from {} ({} validators)",
            path.display(),
            config.validators.len()
        );
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A typical password policy: required, at least 8 characters.
    pub fn password_defaults() -> Self {
        Self {
            style: FieldStyle::default(),
            validators: vec![
                RuleConfig::Required {
                    message: "Password is required".into(),
                },
                RuleConfig::MinLength {
                    min: 8,
                    message: "Password must be at least 8 characters".into(),
                },
            ],
        }
    }

    /// Build the configured validators, in order.
    pub fn build_validators(&self) -> Result<Vec<Validator>> {
        self.validators.iter().map(RuleConfig::build).collect()
    }
}

/// One configured validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleConfig {
    /// Non-blank value
    Required { message: String },
    /// At least `min` characters
    MinLength { min: usize, message: String },
    /// At most `max` characters
    MaxLength { max: usize, message: String },
    /// Value matches a regex
    Pattern { pattern: String, message: String },
    /// Valid email address (empty passes)
    Email { message: String },
    /// Value equals a fixed string
    Equals { value: String, message: String },
    /// Value contains a substring
    Contains { substring: String, message: String },
}

impl RuleConfig {
    /// Build a validator for this entry.
    pub fn build(&self) -> Result<Validator> {
        let validator = match self {
            Self::Required { message } => Validator::required(message.as_str()),
            Self::MinLength { min, message } => Validator::min_length(*min, message.as_str()),
            Self::MaxLength { max, message } => Validator::max_length(*max, message.as_str()),
            Self::Pattern { pattern, message } => Validator::pattern(pattern, message.as_str())?,
            Self::Email { message } => Validator::email(message.as_str()),
            Self::Equals { value, message } => Validator::equals(value.as_str(), message.as_str()),
            Self::Contains { substring, message } => {
                Validator::contains(substring.as_str(), message.as_str())
            }
        };
        Ok(validator)
    }

    /// The error message for this entry.
    pub fn message(&self) -> &str {
        match self {
            Self::Required { message }
            | Self::MinLength { message, .. }
            | Self::MaxLength { message, .. }
            | Self::Pattern { message, .. }
            | Self::Email { message }
            | Self::Equals { message, .. }
            | Self::Contains { message, .. } => message,
        }
    }
}
