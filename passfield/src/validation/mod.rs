//! Validator chain evaluation.
//!
//! A [`ValidatorChain`] holds an ordered list of [`Validator`]s. Running the
//! chain against a [`Validatable`] field checks each validator in insertion
//! order and stops at the first one that reports an error. That validator
//! becomes the chain's *active validator*; when every validator passes the
//! active validator is cleared.
//!
//! # Example
//!
//! ```
//! use passfield::field::PasswordField;
//! use passfield::validation::Validator;
//!
//! let field = PasswordField::with_value("abc");
//! field.add_validators([
//!     Validator::required("Password is required"),
//!     Validator::min_length(8, "Password must be at least 8 characters"),
//! ]);
//!
//! assert!(!field.validate());
//! let active = field.active_validator().unwrap();
//! assert_eq!(active.message(), "Password must be at least 8 characters");
//! ```

mod chain;
pub mod rules;
mod validatable;
mod validator;

pub use chain::ValidatorChain;
pub use rules::Rule;
pub use validatable::Validatable;
pub use validator::{Validator, ValidatorId};
