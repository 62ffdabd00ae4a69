//! Buffer for the field's value that is wiped when replaced or dropped.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

#[derive(Default, Zeroize, ZeroizeOnDrop)]
pub(crate) struct SecretValue(String);

impl SecretValue {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Overwrite the old contents before taking the new value.
    pub(crate) fn replace(&mut self, value: impl Into<String>) {
        self.0.zeroize();
        self.0 = value.into();
    }

    pub(crate) fn clear(&mut self) {
        self.0.zeroize();
    }

    pub(crate) fn expose(&self) -> Zeroizing<String> {
        Zeroizing::new(self.0.clone())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let secret = SecretValue::new("hunter2");
        assert_eq!(format!("{:?}", secret), "[REDACTED]");
    }

    #[test]
    fn test_replace_and_clear() {
        let mut secret = SecretValue::new("old");
        secret.replace("new value");
        assert_eq!(secret.expose().as_str(), "new value");
        assert_eq!(secret.char_count(), 9);
        secret.clear();
        assert!(secret.is_empty());
    }
}
