//! Signup Example
//!
//! A password field and a confirmation field wired the way a signup form
//! would use them:
//! - the password field has a required / length / digit policy
//! - the confirmation field must match the password field
//! - a subscriber logs every change of the active validator
//!
//! Run with `cargo run -p passfield --example signup`.

use log::{LevelFilter, info};
use passfield::prelude::*;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn main() -> Result<()> {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    // =========================================================================
    // Fields
    // =========================================================================

    let password = PasswordField::new();
    password.add_validators([
        Validator::required("Password is required"),
        Validator::min_length(8, "Password must be at least 8 characters"),
        Validator::pattern("[0-9]", "Password must contain a digit")?,
    ]);

    let confirm = PasswordField::new();
    confirm.add_validator(Validator::matches_field(
        password.downgrade(),
        "Passwords do not match",
    ));

    password
        .active_validator_property()
        .subscribe(|_, active| match active {
            Some(validator) => info!("password error: {}", validator.message()),
            None => info!("password ok"),
        });

    // =========================================================================
    // Simulated input
    // =========================================================================

    for attempt in ["", "short1", "longenough", "longenough1"] {
        password.set_value(attempt);
        let valid = password.validate();
        println!(
            "{:<14} valid={:<5} pseudo-classes={:?}",
            format!("{attempt:?}"),
            valid,
            password.active_pseudo_classes()
        );
    }

    confirm.set_value("longenough2");
    if !confirm.validate() {
        println!("confirm: {}", confirm.error_message().unwrap_or_default());
    }

    confirm.set_value("longenough1");
    println!("confirm valid={}", confirm.validate());

    Ok(())
}
