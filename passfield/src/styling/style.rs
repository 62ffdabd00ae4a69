use serde::{Deserialize, Serialize};

use crate::styling::color::Color;

/// Presentation settings for a password field.
///
/// Missing keys fall back to the defaults when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldStyle {
    /// Float the prompt text above the field while it has focus or content
    pub label_float: bool,
    /// Underline color while focused
    pub focus_color: Color,
    /// Underline color while unfocused
    pub unfocus_color: Color,
}

impl FieldStyle {
    /// Default focused color, `#4059A9`.
    pub const DEFAULT_FOCUS_COLOR: Color = Color::hex(0x4059A9);
    /// Default unfocused color, `rgb(77, 77, 77)`.
    pub const DEFAULT_UNFOCUS_COLOR: Color = Color::rgb(77, 77, 77);

    /// Create the default style
    pub const fn new() -> Self {
        Self {
            label_float: false,
            focus_color: Self::DEFAULT_FOCUS_COLOR,
            unfocus_color: Self::DEFAULT_UNFOCUS_COLOR,
        }
    }

    /// Enable or disable the floating label
    pub const fn label_float(mut self, label_float: bool) -> Self {
        self.label_float = label_float;
        self
    }

    /// Set the focused color
    pub const fn focus_color(mut self, color: Color) -> Self {
        self.focus_color = color;
        self
    }

    /// Set the unfocused color
    pub const fn unfocus_color(mut self, color: Color) -> Self {
        self.unfocus_color = color;
        self
    }
}

impl Default for FieldStyle {
    fn default() -> Self {
        Self::new()
    }
}
