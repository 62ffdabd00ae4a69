use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use log::debug;
use zeroize::Zeroizing;

use super::secret::SecretValue;
use crate::config::FieldConfig;
use crate::error::Result;
use crate::property::ReadOnlyProperty;
use crate::styling::{DEFAULT_STYLE_CLASS, FieldStyle, PseudoClass};
use crate::validation::{Validatable, Validator, ValidatorChain};

/// Unique identifier for a PasswordField instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(usize);

impl FieldId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__password_field_{}", self.0)
    }
}

/// Internal state for a PasswordField
#[derive(Debug)]
struct FieldInner {
    /// Current value, wiped on replace and drop
    value: RwLock<SecretValue>,
    /// Validators and the active-validator slot
    chain: RwLock<ValidatorChain>,
    /// Style classes, starting with the default class
    style_classes: RwLock<Vec<String>>,
    /// Presentation settings read by the skin
    style: RwLock<FieldStyle>,
}

impl FieldInner {
    fn new(value: SecretValue) -> Self {
        Self {
            value: RwLock::new(value),
            chain: RwLock::new(ValidatorChain::new()),
            style_classes: RwLock::new(vec![DEFAULT_STYLE_CLASS.to_string()]),
            style: RwLock::new(FieldStyle::default()),
        }
    }
}

/// A password input field with a validator chain.
///
/// `PasswordField` is a handle: clones share the same value, validators and
/// error state. The field owns its [`ValidatorChain`]; validators only hold a
/// weak [`FieldRef`] back to it.
///
/// Error display state is derived from the chain's active validator. The
/// field never stores it separately, so `has_error()`, `error_message()` and
/// the `error` pseudo-class always agree with `active_validator()`.
///
/// # Example
///
/// ```
/// use passfield::field::PasswordField;
/// use passfield::validation::Validator;
///
/// let field = PasswordField::new();
/// field.add_validator(Validator::required("Password is required"));
///
/// assert!(!field.validate());
/// assert!(field.has_error());
///
/// field.set_value("s3cret");
/// assert!(field.validate());
/// assert!(!field.has_error());
/// ```
#[derive(Debug)]
pub struct PasswordField {
    /// Unique identifier for this field instance
    id: FieldId,
    /// Internal state
    inner: Arc<FieldInner>,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
}

impl PasswordField {
    /// Create a new empty field
    pub fn new() -> Self {
        Self::from_secret(SecretValue::default())
    }

    /// Create a field with an initial value
    pub fn with_value(value: impl Into<String>) -> Self {
        Self::from_secret(SecretValue::new(value))
    }

    /// Create a field with the style and validators described by `config`.
    pub fn from_config(config: &FieldConfig) -> Result<Self> {
        let validators = config.build_validators()?;
        let field = Self::new();
        field.set_style(config.style.clone());
        field.add_validators(validators);
        debug!(
            "{} created from config with {} validators",
            field.id,
            config.validators.len()
        );
        Ok(field)
    }

    fn from_secret(value: SecretValue) -> Self {
        Self {
            id: FieldId::new(),
            inner: Arc::new(FieldInner::new(value)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the unique ID for this field
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Get the ID as a string
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    /// Get a weak reference to this field.
    pub fn downgrade(&self) -> FieldRef {
        FieldRef {
            id: self.id,
            inner: Arc::downgrade(&self.inner),
            dirty: Arc::downgrade(&self.dirty),
        }
    }

    fn chain(&self) -> RwLockReadGuard<'_, ValidatorChain> {
        self.inner
            .chain
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn chain_mut(&self) -> RwLockWriteGuard<'_, ValidatorChain> {
        self.inner
            .chain
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn value_mut(&self) -> RwLockWriteGuard<'_, SecretValue> {
        self.inner
            .value
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // -------------------------------------------------------------------------
    // Value
    // -------------------------------------------------------------------------

    /// Get the current value
    pub fn value(&self) -> Zeroizing<String> {
        self.inner
            .value
            .read()
            .map(|guard| guard.expose())
            .unwrap_or_else(|poisoned| poisoned.into_inner().expose())
    }

    /// Set the value.
    ///
    /// The error state is left alone; call [`reset`](Self::reset) or
    /// [`validate`](Self::validate) to refresh it.
    pub fn set_value(&self, value: impl Into<String>) {
        self.value_mut().replace(value);
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Clear the value
    pub fn clear(&self) {
        self.value_mut().clear();
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Check if the field is empty
    pub fn is_empty(&self) -> bool {
        self.inner
            .value
            .read()
            .map(|guard| guard.is_empty())
            .unwrap_or_else(|poisoned| poisoned.into_inner().is_empty())
    }

    /// Number of characters in the current value
    pub fn len(&self) -> usize {
        self.inner
            .value
            .read()
            .map(|guard| guard.char_count())
            .unwrap_or_else(|poisoned| poisoned.into_inner().char_count())
    }

    // -------------------------------------------------------------------------
    // Validators
    // -------------------------------------------------------------------------

    /// Append a validator to the field's chain.
    pub fn add_validator(&self, validator: Validator) {
        self.chain_mut().add_validator(validator);
    }

    /// Append several validators, keeping their order.
    pub fn add_validators(&self, validators: impl IntoIterator<Item = Validator>) {
        self.chain_mut().add_validators(validators);
    }

    /// Snapshot of the validators in evaluation order.
    pub fn validators(&self) -> Vec<Validator> {
        self.chain().validators().to_vec()
    }

    /// Mutate the live validator list.
    ///
    /// Must not be called from inside a validator while this field is
    /// validating.
    pub fn with_validators<R>(&self, f: impl FnOnce(&mut Vec<Validator>) -> R) -> R {
        f(self.chain_mut().validators_mut())
    }

    /// Validate the current value.
    ///
    /// Returns true if every validator passed. On failure the first failing
    /// validator becomes the active validator and the `error` pseudo-class is
    /// switched on.
    pub fn validate(&self) -> bool {
        self.chain().validate(self)
    }

    /// Clear the active validator and switch the `error` pseudo-class off.
    pub fn reset(&self) {
        self.chain().reset();
    }

    /// The validator responsible for the current error, if any.
    pub fn active_validator(&self) -> Option<Validator> {
        self.chain().active_validator()
    }

    /// Observable view of the active validator.
    ///
    /// Listeners run inside `validate()`/`reset()`. They may read the field
    /// or reset it but must not add or remove its validators. A listener
    /// that resets the field supersedes the change it was told about, and
    /// the outdated change is not announced any further.
    pub fn active_validator_property(&self) -> ReadOnlyProperty<Option<Validator>> {
        self.chain().active_validator_property()
    }

    /// Check if the field is showing a validation error.
    pub fn has_error(&self) -> bool {
        self.chain().has_error()
    }

    /// Message of the active validator, if any.
    pub fn error_message(&self) -> Option<String> {
        self.active_validator().map(|validator| validator.message())
    }

    // -------------------------------------------------------------------------
    // Styling
    // -------------------------------------------------------------------------

    /// Observable error-state signal backing the `error` pseudo-class.
    pub fn error_state(&self) -> ReadOnlyProperty<bool> {
        self.chain().error_state()
    }

    /// Check if a pseudo-class is currently active.
    pub fn is_pseudo_class_active(&self, pseudo_class: PseudoClass) -> bool {
        if pseudo_class == PseudoClass::ERROR {
            self.has_error()
        } else {
            false
        }
    }

    /// All currently active pseudo-classes.
    pub fn active_pseudo_classes(&self) -> Vec<PseudoClass> {
        PseudoClass::ALL
            .into_iter()
            .filter(|pseudo_class| self.is_pseudo_class_active(*pseudo_class))
            .collect()
    }

    /// Style classes applied to this field.
    pub fn style_classes(&self) -> Vec<String> {
        self.inner
            .style_classes
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Add a style class if not already present.
    pub fn add_style_class(&self, class: impl Into<String>) {
        let class = class.into();
        let mut guard = self
            .inner
            .style_classes
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !guard.contains(&class) {
            guard.push(class);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Remove a style class. Returns true if it was present.
    pub fn remove_style_class(&self, class: &str) -> bool {
        let mut guard = self
            .inner
            .style_classes
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = guard.len();
        guard.retain(|c| c != class);
        let removed = guard.len() != before;
        if removed {
            self.dirty.store(true, Ordering::SeqCst);
        }
        removed
    }

    /// Get the presentation settings.
    pub fn style(&self) -> FieldStyle {
        self.inner
            .style
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Replace the presentation settings.
    pub fn set_style(&self, style: FieldStyle) {
        *self
            .inner
            .style
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = style;
        self.dirty.store(true, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the value, style, or error state changed since last cleared
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst) || self.chain().error_state().is_dirty()
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
        self.chain().error_state().clear_dirty();
    }
}

impl Clone for PasswordField {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl Default for PasswordField {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Validatable implementation
// -----------------------------------------------------------------------------

impl Validatable for PasswordField {
    fn validation_value(&self) -> Zeroizing<String> {
        self.value()
    }

    fn field_ref(&self) -> FieldRef {
        self.downgrade()
    }
}

// -----------------------------------------------------------------------------
// Weak reference
// -----------------------------------------------------------------------------

/// Non-owning reference from a validator back to its field.
///
/// Holding a `FieldRef` never keeps the field alive.
#[derive(Clone)]
pub struct FieldRef {
    id: FieldId,
    inner: Weak<FieldInner>,
    dirty: Weak<AtomicBool>,
}

impl FieldRef {
    /// ID of the referenced field.
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Get the field back, if it still exists.
    pub fn upgrade(&self) -> Option<PasswordField> {
        Some(PasswordField {
            id: self.id,
            inner: self.inner.upgrade()?,
            dirty: self.dirty.upgrade()?,
        })
    }

    /// Check if the referenced field still exists.
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Check if this reference points at `field`.
    pub fn refers_to(&self, field: &PasswordField) -> bool {
        self.id == field.id
    }
}

impl PartialEq for FieldRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FieldRef {}

impl fmt::Debug for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRef")
            .field("id", &self.id)
            .field("alive", &self.is_alive())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poison_value_lock(field: &PasswordField) {
        let inner = Arc::clone(&field.inner);
        let result = std::thread::spawn(move || {
            let _guard = inner.value.write().unwrap();
            panic!("writer died holding the value lock");
        })
        .join();
        assert!(result.is_err());
        assert!(field.inner.value.is_poisoned());
    }

    #[test]
    fn test_set_value_survives_poisoned_lock() {
        let field = PasswordField::with_value("before");
        poison_value_lock(&field);

        field.set_value("after");
        assert_eq!(field.value().as_str(), "after");

        field.clear();
        assert_eq!(field.len(), 0);
        assert_eq!(field.value().as_str(), "");
    }
}
