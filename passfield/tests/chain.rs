//! Tests for validator chain evaluation order, short-circuiting and binding.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use passfield::field::PasswordField;
use passfield::validation::{Validator, ValidatorChain};

/// A validator that counts how often it runs and always returns `pass`.
fn counting(pass: bool, message: &str) -> (Validator, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = Arc::clone(&calls);
    let validator = Validator::rule(
        move |_: &str| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            pass
        },
        message,
    );
    (validator, calls)
}

// ============================================================================
// Order and short-circuit
// ============================================================================

#[test]
fn test_first_failure_wins() {
    let (v1, _) = counting(true, "v1");
    let (v2, _) = counting(false, "v2");
    let (v3, _) = counting(false, "v3");

    let field = PasswordField::with_value("anything");
    field.add_validators([v1, v2.clone(), v3]);

    assert!(!field.validate());
    assert_eq!(field.active_validator(), Some(v2));
}

#[test]
fn test_validators_after_failure_never_run() {
    let (v1, calls1) = counting(true, "v1");
    let (v2, calls2) = counting(false, "v2");
    let (v3, calls3) = counting(true, "v3");

    let field = PasswordField::new();
    field.add_validators([v1, v2, v3]);

    field.validate();
    field.validate();

    assert_eq!(calls1.load(Ordering::SeqCst), 2);
    assert_eq!(calls2.load(Ordering::SeqCst), 2);
    assert_eq!(calls3.load(Ordering::SeqCst), 0);
}

#[test]
fn test_all_pass_runs_every_validator() {
    let (v1, calls1) = counting(true, "v1");
    let (v2, calls2) = counting(true, "v2");

    let field = PasswordField::new();
    field.add_validators([v1, v2]);

    assert!(field.validate());
    assert_eq!(calls1.load(Ordering::SeqCst), 1);
    assert_eq!(calls2.load(Ordering::SeqCst), 1);
}

#[test]
fn test_duplicates_are_run_again() {
    let (v, calls) = counting(true, "dup");

    let field = PasswordField::new();
    field.add_validators([v.clone(), v.clone(), v]);

    assert_eq!(field.validators().len(), 3);
    assert!(field.validate());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_empty_chain_always_passes() {
    let field = PasswordField::new();
    assert!(field.validate());
    assert!(field.active_validator().is_none());
    assert!(!field.has_error());

    let chain = ValidatorChain::new();
    assert!(chain.is_empty());
    assert!(chain.validate(&field));
}

// ============================================================================
// Active validator and reset
// ============================================================================

#[test]
fn test_passing_run_clears_previous_failure() {
    let field = PasswordField::new();
    let required = Validator::required("required");
    field.add_validator(required.clone());

    assert!(!field.validate());
    assert_eq!(field.active_validator(), Some(required));

    field.set_value("now filled");
    assert!(field.validate());
    assert!(field.active_validator().is_none());
    assert!(!field.has_error());
}

#[test]
fn test_reset_is_idempotent() {
    let field = PasswordField::new();
    field.add_validator(Validator::required("required"));
    assert!(!field.validate());
    assert!(field.has_error());

    field.reset();
    assert!(field.active_validator().is_none());
    assert!(!field.has_error());

    field.reset();
    assert!(field.active_validator().is_none());
    assert!(!field.has_error());
}

#[test]
fn test_set_value_keeps_error_until_reset() {
    let field = PasswordField::new();
    field.add_validator(Validator::required("required"));
    assert!(!field.validate());

    field.set_value("typed");
    assert!(field.has_error());

    field.reset();
    assert!(!field.has_error());
}

#[test]
fn test_removing_validators_affects_next_run() {
    let field = PasswordField::new();
    let required = Validator::required("required");
    field.add_validator(required.clone());
    assert!(!field.validate());

    let removed = field.with_validators(|validators| {
        let before = validators.len();
        validators.retain(|v| *v != required);
        before - validators.len()
    });
    assert_eq!(removed, 1);

    // Still active until the chain runs again.
    assert_eq!(field.active_validator(), Some(required));
    assert!(field.validate());
    assert!(field.active_validator().is_none());
}

// ============================================================================
// Binding
// ============================================================================

#[test]
fn test_validator_bound_on_first_run() {
    let field = PasswordField::new();
    let validator = Validator::required("required");
    field.add_validator(validator.clone());

    assert!(!validator.is_bound());
    field.validate();
    let bound = validator.bound_field().expect("bound after validate");
    assert!(bound.refers_to(&field));
}

#[test]
fn test_binding_survives_many_runs() {
    let field = PasswordField::with_value("abc");
    let validator = Validator::min_length(2, "too short");
    field.add_validator(validator.clone());

    field.validate();
    let first = validator.bound_field().unwrap();
    for _ in 0..10 {
        field.validate();
        field.reset();
    }
    assert_eq!(validator.bound_field().unwrap(), first);
}

#[test]
fn test_shared_validator_stays_bound_to_first_field() {
    let first = PasswordField::new();
    let second = PasswordField::new();
    let validator = Validator::required("required");
    first.add_validator(validator.clone());
    second.add_validator(validator.clone());

    first.validate();
    second.validate();

    let bound = validator.bound_field().unwrap();
    assert_eq!(bound.id(), first.id());
    assert!(!bound.refers_to(&second));
}

#[test]
fn test_pre_bound_validator_is_not_rebound() {
    let other = PasswordField::new();
    let validator = Validator::required("required");
    assert!(validator.bind(other.downgrade()));

    let field = PasswordField::new();
    field.add_validator(validator.clone());
    field.validate();

    assert_eq!(validator.bound_field().unwrap().id(), other.id());
    assert!(!validator.bind(field.downgrade()));
}

#[test]
fn test_binding_does_not_keep_field_alive() {
    let validator = Validator::required("required");
    {
        let field = PasswordField::new();
        field.add_validator(validator.clone());
        field.validate();
    }
    let bound = validator.bound_field().unwrap();
    assert!(!bound.is_alive());
    assert!(bound.upgrade().is_none());
}

// ============================================================================
// Malfunctioning validators
// ============================================================================

#[test]
#[should_panic(expected = "rule exploded")]
fn test_panicking_rule_propagates() {
    let field = PasswordField::new();
    field.add_validator(Validator::rule(
        |_: &str| panic!("rule exploded"),
        "never shown",
    ));
    field.validate();
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_required_then_length_on_empty_value() {
    let field = PasswordField::new();
    let required = Validator::required("Password is required");
    let (length, length_calls) = {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let v = Validator::rule(
            move |value: &str| {
                calls_clone.fetch_add(1, Ordering::SeqCst);
                value.chars().count() >= 3
            },
            "At least 3 characters",
        );
        (v, calls)
    };
    field.add_validators([required.clone(), length]);

    assert!(!field.validate());
    assert_eq!(field.active_validator(), Some(required));
    assert_eq!(field.error_message().as_deref(), Some("Password is required"));
    assert_eq!(length_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_required_then_length_on_passing_value() {
    let field = PasswordField::with_value("abc");
    field.add_validators([
        Validator::required("Password is required"),
        Validator::min_length(3, "At least 3 characters"),
    ]);

    assert!(field.validate());
    assert!(field.active_validator().is_none());
    assert!(field.error_message().is_none());
}
