use std::fmt;

/// A named presentation state toggled on a field, such as `error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PseudoClass(&'static str);

impl PseudoClass {
    /// Active while the field has an active validator.
    pub const ERROR: Self = Self("error");

    /// Every pseudo-class a password field can toggle.
    pub const ALL: [Self; 1] = [Self::ERROR];

    /// The pseudo-class name, without the leading colon.
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}
