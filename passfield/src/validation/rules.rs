//! Check strategies plugged into validators.
//!
//! A [`Rule`] answers one question: does this value pass? Everything else
//! (binding, error flag, message) lives on the [`Validator`](super::Validator)
//! that wraps it. Any `Fn(&str) -> bool` closure is a rule.

use regex::Regex;

use crate::error::{Error, Result};
use crate::field::FieldRef;

/// A pluggable value check.
///
/// Rules are expected to be fast, pure predicates. A rule that panics is not
/// caught by the chain; the panic reaches the caller of `validate()`.
pub trait Rule: Send + Sync {
    /// Return true if `value` passes this rule.
    fn check(&self, value: &str) -> bool;

    /// Short name used in logs and debug output.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> Rule for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn check(&self, value: &str) -> bool {
        self(value)
    }
}

/// Requires a non-blank value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Rule for Required {
    fn check(&self, value: &str) -> bool {
        !value.trim().is_empty()
    }

    fn name(&self) -> &'static str {
        "required"
    }
}

/// Requires at least this many characters.
#[derive(Debug, Clone, Copy)]
pub struct MinLength(pub usize);

impl Rule for MinLength {
    fn check(&self, value: &str) -> bool {
        value.chars().count() >= self.0
    }

    fn name(&self) -> &'static str {
        "min_length"
    }
}

/// Allows at most this many characters.
#[derive(Debug, Clone, Copy)]
pub struct MaxLength(pub usize);

impl Rule for MaxLength {
    fn check(&self, value: &str) -> bool {
        value.chars().count() <= self.0
    }

    fn name(&self) -> &'static str {
        "max_length"
    }
}

/// Requires the value to match a regular expression.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile `pattern` into a rule.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    /// The source pattern.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Rule for Pattern {
    fn check(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    fn name(&self) -> &'static str {
        "pattern"
    }
}

/// Requires a valid email address. An empty value passes; pair with
/// [`Required`] to reject it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl Rule for Email {
    fn check(&self, value: &str) -> bool {
        value.is_empty() || email_address::EmailAddress::is_valid(value)
    }

    fn name(&self) -> &'static str {
        "email"
    }
}

/// Requires the value to equal a fixed string.
#[derive(Debug, Clone)]
pub struct Equals(pub String);

impl Rule for Equals {
    fn check(&self, value: &str) -> bool {
        value == self.0
    }

    fn name(&self) -> &'static str {
        "equals"
    }
}

/// Requires the value to contain a substring.
#[derive(Debug, Clone)]
pub struct Contains(pub String);

impl Rule for Contains {
    fn check(&self, value: &str) -> bool {
        value.contains(&self.0)
    }

    fn name(&self) -> &'static str {
        "contains"
    }
}

/// Requires the value to equal another field's current value.
///
/// Used for "confirm password" fields. Fails once the other field has been
/// dropped.
#[derive(Debug, Clone)]
pub struct MatchesField(pub FieldRef);

impl Rule for MatchesField {
    fn check(&self, value: &str) -> bool {
        self.0
            .upgrade()
            .is_some_and(|other| other.value().as_str() == value)
    }

    fn name(&self) -> &'static str {
        "matches_field"
    }
}
