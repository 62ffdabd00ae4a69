//! Presentation configuration read by an external skin.
//!
//! Nothing here renders anything. These are the values a presentation
//! layer needs to draw a password field: its style classes, colors, whether
//! the prompt text floats, and which pseudo-classes are active.

pub mod color;
pub mod pseudo_class;
pub mod style;

pub use color::Color;
pub use pseudo_class::PseudoClass;
pub use style::FieldStyle;

/// Style class every password field starts with.
pub const DEFAULT_STYLE_CLASS: &str = "password-field";
