//! Validatable trait for fields that can be checked by a validator chain.

use zeroize::Zeroizing;

use crate::field::FieldRef;

/// Trait for fields that a [`ValidatorChain`](super::ValidatorChain) can run against.
///
/// The chain reads the value once per run and binds unbound validators to
/// the reference returned by [`Validatable::field_ref`].
pub trait Validatable {
    /// Extract the current value for validation.
    fn validation_value(&self) -> Zeroizing<String>;

    /// Get a weak reference to this field for validator binding.
    fn field_ref(&self) -> FieldRef;
}
