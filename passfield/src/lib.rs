//! Password input field with an ordered, short-circuiting validator chain.
//!
//! A [`PasswordField`](field::PasswordField) owns a
//! [`ValidatorChain`](validation::ValidatorChain). Calling `validate()` runs
//! the chain's validators in insertion order against the field's current
//! value, stops at the first failure, and publishes that validator as the
//! field's active validator. Presentation code observes the active validator
//! and the `error` pseudo-class instead of tracking errors itself.
//!
//! ```
//! use passfield::prelude::*;
//!
//! let field = PasswordField::new();
//! field.add_validators([
//!     Validator::required("Password is required"),
//!     Validator::min_length(8, "Password must be at least 8 characters"),
//! ]);
//!
//! assert!(!field.validate());
//! assert_eq!(field.error_message().as_deref(), Some("Password is required"));
//!
//! field.set_value("correct horse battery staple");
//! assert!(field.validate());
//! assert!(field.active_validator().is_none());
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod property;
pub mod styling;
pub mod validation;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::config::{FieldConfig, RuleConfig};
    pub use crate::error::{Error, Result};
    pub use crate::field::{FieldId, FieldRef, PasswordField};
    pub use crate::property::{Property, ReadOnlyProperty, Subscription};
    pub use crate::styling::{Color, FieldStyle, PseudoClass};
    pub use crate::validation::{Rule, Validatable, Validator, ValidatorChain, ValidatorId};
}
