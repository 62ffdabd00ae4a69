//! Password field - the value under validation plus its validator chain.

mod secret;
mod state;

pub use state::{FieldId, FieldRef, PasswordField};
