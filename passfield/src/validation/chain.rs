//! Ordered, short-circuiting validator chain.

use log::{debug, trace};

use super::validatable::Validatable;
use super::validator::Validator;
use crate::property::{Property, ReadOnlyProperty};

/// Ordered list of validators bound to a single field.
///
/// Insertion order is evaluation order. The same validator may appear more
/// than once; it is simply run again.
///
/// The chain publishes two outputs that always agree:
/// - the *active validator*, the first validator that failed on the last
///   run (`None` after a passing run, a `reset()`, or before any run);
/// - the *error state*, true exactly when there is an active validator.
///
/// The chain is not meant for concurrent use. Callers serialize `validate`,
/// `reset` and list mutation for a given chain.
#[derive(Debug, Default)]
pub struct ValidatorChain {
    validators: Vec<Validator>,
    active_validator: Property<Option<Validator>>,
    error_state: Property<bool>,
}

impl ValidatorChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator to the end of the chain.
    pub fn add_validator(&mut self, validator: Validator) {
        self.validators.push(validator);
    }

    /// Append several validators, keeping their order.
    pub fn add_validators(&mut self, validators: impl IntoIterator<Item = Validator>) {
        self.validators.extend(validators);
    }

    /// The validators in evaluation order.
    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Live access to the validator list.
    ///
    /// Changes affect the next `validate()` call. They do not touch the
    /// active validator: removing the active validator leaves it active
    /// until the next run or `reset()`.
    pub fn validators_mut(&mut self) -> &mut Vec<Validator> {
        &mut self.validators
    }

    /// Number of validators in the chain.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Check if the chain has no validators.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Run the validators against `field`'s current value.
    ///
    /// Unbound validators are bound to `field` before they run. Evaluation
    /// stops at the first validator reporting an error, which becomes the
    /// active validator. If none fails the chain is [`reset`](Self::reset).
    ///
    /// Returns true if every validator passed.
    pub fn validate<F: Validatable + ?Sized>(&self, field: &F) -> bool {
        let field_ref = field.field_ref();
        let value = field.validation_value();
        trace!(
            "validating {} with {} validators",
            field_ref.id(),
            self.validators.len()
        );

        for validator in &self.validators {
            if !validator.is_bound() {
                validator.bind(field_ref.clone());
            }
            validator.validate(&value);
            if validator.has_errors() {
                debug!(
                    "{} failed {} ({})",
                    field_ref.id(),
                    validator.id(),
                    validator.rule_name()
                );
                self.publish(Some(validator.clone()));
                return false;
            }
        }

        self.reset();
        true
    }

    /// Clear the active validator and the error state.
    pub fn reset(&self) {
        self.publish(None);
    }

    /// The validator that failed on the last run, if any.
    pub fn active_validator(&self) -> Option<Validator> {
        self.active_validator.get()
    }

    /// Observable view of the active validator.
    pub fn active_validator_property(&self) -> ReadOnlyProperty<Option<Validator>> {
        self.active_validator.read_only()
    }

    /// Observable error-state signal, true while a validator is active.
    pub fn error_state(&self) -> ReadOnlyProperty<bool> {
        self.error_state.read_only()
    }

    /// Check if the last run failed.
    pub fn has_error(&self) -> bool {
        self.error_state.get()
    }

    /// Store both outputs before notifying anyone, so no listener sees them
    /// disagree.
    fn publish(&self, active: Option<Validator>) {
        let error = active.is_some();
        let active_change = self.active_validator.stage(active);
        let error_change = self.error_state.stage(error);
        if let Some(change) = active_change {
            self.active_validator.publish(change);
        }
        if let Some(change) = error_change {
            self.error_state.publish(change);
        }
    }
}
