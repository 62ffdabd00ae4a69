//! Validator handle: a rule plus its field binding and last result.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, RwLock};

use log::trace;

use super::rules::{Contains, Email, Equals, MatchesField, MaxLength, MinLength, Pattern, Required, Rule};
use crate::error::Result;
use crate::field::FieldRef;

/// Unique identifier for a Validator instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidatorId(usize);

impl ValidatorId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__validator_{}", self.0)
    }
}

struct ValidatorInner {
    rule: Box<dyn Rule>,
    /// Message shown while this validator is the field's active validator
    message: RwLock<String>,
    /// Field this validator checks; set once, never replaced
    bound_field: OnceLock<FieldRef>,
    /// Result of the last `validate()` call
    has_errors: AtomicBool,
}

/// A validator attached to a field's validator chain.
///
/// `Validator` is a cheap-to-clone handle: clones share the binding and the
/// error flag, and compare equal to each other. Two validators built
/// separately are never equal, even with identical rules.
///
/// The first time a chain runs a validator it binds it to the chain's
/// field. The binding is permanent: adding the same validator to a second
/// field does not move it.
///
/// # Example
///
/// ```
/// use passfield::validation::Validator;
///
/// let v = Validator::rule(|v: &str| v.chars().any(|c| c.is_ascii_digit()), "Add a digit");
/// v.validate("password");
/// assert!(v.has_errors());
/// v.validate("passw0rd");
/// assert!(!v.has_errors());
/// ```
#[derive(Clone)]
pub struct Validator {
    id: ValidatorId,
    inner: Arc<ValidatorInner>,
}

impl Validator {
    /// Create a validator from a rule and an error message.
    pub fn new(rule: impl Rule + 'static, message: impl Into<String>) -> Self {
        Self {
            id: ValidatorId::new(),
            inner: Arc::new(ValidatorInner {
                rule: Box::new(rule),
                message: RwLock::new(message.into()),
                bound_field: OnceLock::new(),
                has_errors: AtomicBool::new(false),
            }),
        }
    }

    /// Get the unique ID for this validator
    pub fn id(&self) -> ValidatorId {
        self.id
    }

    /// Name of the underlying rule.
    pub fn rule_name(&self) -> &'static str {
        self.inner.rule.name()
    }

    // -------------------------------------------------------------------------
    // Message
    // -------------------------------------------------------------------------

    /// Get the error message.
    pub fn message(&self) -> String {
        self.inner
            .message
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Replace the error message.
    pub fn set_message(&self, message: impl Into<String>) {
        if let Ok(mut guard) = self.inner.message.write() {
            *guard = message.into();
        }
    }

    // -------------------------------------------------------------------------
    // Binding
    // -------------------------------------------------------------------------

    /// The field this validator is bound to, if any.
    pub fn bound_field(&self) -> Option<FieldRef> {
        self.inner.bound_field.get().cloned()
    }

    /// Check if this validator has been bound to a field.
    pub fn is_bound(&self) -> bool {
        self.inner.bound_field.get().is_some()
    }

    /// Bind this validator to `field`.
    ///
    /// Only the first call has an effect. Returns true if this call bound
    /// the validator, false if it was already bound.
    pub fn bind(&self, field: FieldRef) -> bool {
        let field_id = field.id();
        let bound = self.inner.bound_field.set(field).is_ok();
        if bound {
            trace!("{} bound to {}", self.id, field_id);
        }
        bound
    }

    // -------------------------------------------------------------------------
    // Evaluation
    // -------------------------------------------------------------------------

    /// Run the rule against `value` and record the result.
    pub fn validate(&self, value: &str) {
        let passed = self.inner.rule.check(value);
        self.inner.has_errors.store(!passed, Ordering::SeqCst);
    }

    /// Check if the last `validate()` call failed.
    pub fn has_errors(&self) -> bool {
        self.inner.has_errors.load(Ordering::SeqCst)
    }
}

// Built-in validators
impl Validator {
    /// Require the value to be non-blank.
    pub fn required(message: impl Into<String>) -> Self {
        Self::new(Required, message)
    }

    /// Require at least `min` characters.
    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Self::new(MinLength(min), message)
    }

    /// Allow at most `max` characters.
    pub fn max_length(max: usize, message: impl Into<String>) -> Self {
        Self::new(MaxLength(max), message)
    }

    /// Require the value to match a regex pattern.
    pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Self> {
        Ok(Self::new(Pattern::new(pattern)?, message))
    }

    /// Require a valid email address (empty passes).
    pub fn email(message: impl Into<String>) -> Self {
        Self::new(Email, message)
    }

    /// Require the value to equal `other`.
    pub fn equals(other: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Equals(other.into()), message)
    }

    /// Require the value to contain `substr`.
    pub fn contains(substr: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Contains(substr.into()), message)
    }

    /// Require the value to equal another field's current value.
    pub fn matches_field(other: FieldRef, message: impl Into<String>) -> Self {
        Self::new(MatchesField(other), message)
    }

    /// Create a validator from a closure.
    pub fn rule<F>(f: F, message: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::new(f, message)
    }
}

impl PartialEq for Validator {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Validator {}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("id", &self.id)
            .field("rule", &self.rule_name())
            .field("message", &self.message())
            .field("bound_field", &self.bound_field().map(|field| field.id()))
            .field("has_errors", &self.has_errors())
            .finish()
    }
}
