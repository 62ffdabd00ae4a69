//! Check candidate passwords against a configured password field.
//!
//! ```text
//! passfield [CONFIG]
//! ```
//!
//! Reads one candidate per line from stdin and prints `ok` or
//! `error: <message>` for each. Exits with status 1 if any line failed.
//!
//! The configuration is taken from the first argument, else from
//! `<config dir>/field.json`, else a built-in required + 8 character policy.

mod logging;
mod paths;

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use log::{debug, info};
use passfield::prelude::{FieldConfig, PasswordField};
use zeroize::Zeroizing;

/// Pick the configuration file: an explicit argument wins, then `default`
/// if it exists. `None` means the built-in policy.
fn resolve_config_path(arg: Option<PathBuf>, default: Option<PathBuf>) -> Option<PathBuf> {
    arg.or_else(|| default.filter(|path| path.exists()))
}

fn load_config(path: Option<PathBuf>) -> passfield::Result<FieldConfig> {
    match path {
        Some(path) => FieldConfig::load(path),
        None => {
            info!("no field config found, using password defaults");
            Ok(FieldConfig::password_defaults())
        }
    }
}

/// Check every line of `input` against `field`, writing `ok` or
/// `error: <message>` per line. Returns true if every line passed.
fn run(field: &PasswordField, input: impl BufRead, mut out: impl Write) -> io::Result<bool> {
    let mut all_passed = true;
    for line in input.lines() {
        let line = Zeroizing::new(line?);
        field.set_value(line.as_str());
        if field.validate() {
            writeln!(out, "ok")?;
        } else {
            all_passed = false;
            writeln!(out, "error: {}", field.error_message().unwrap_or_default())?;
        }
    }
    out.flush()?;
    Ok(all_passed)
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    logging::init();

    let arg = env::args_os().nth(1).map(PathBuf::from);
    let path = resolve_config_path(arg, paths::field_config());
    let config = load_config(path)?;
    let field = PasswordField::from_config(&config)?;
    field
        .active_validator_property()
        .subscribe(|_, active| match active {
            Some(validator) => debug!("active validator: {:?}", validator),
            None => debug!("active validator cleared"),
        });

    let all_passed = run(&field, io::stdin().lock(), io::stdout().lock())?;
    Ok(if all_passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_field() -> PasswordField {
        PasswordField::from_config(&FieldConfig::password_defaults()).unwrap()
    }

    fn check(field: &PasswordField, input: &str) -> (bool, String) {
        let mut out = Vec::new();
        let passed = run(field, input.as_bytes(), &mut out).unwrap();
        (passed, String::from_utf8(out).unwrap())
    }

    // ========================================================================
    // Line checking
    // ========================================================================

    #[test]
    fn test_run_reports_each_line() {
        let (passed, output) = check(&default_field(), "\nshort\nlongenough1\n");
        assert!(!passed);
        assert_eq!(
            output,
            "error: Password is required\n\
             error: Password must be at least 8 characters\n\
             ok\n"
        );
    }

    #[test]
    fn test_run_all_passing() {
        let (passed, output) = check(&default_field(), "correct horse\nbattery staple");
        assert!(passed);
        assert_eq!(output, "ok\nok\n");
    }

    #[test]
    fn test_run_empty_input_passes() {
        let (passed, output) = check(&default_field(), "");
        assert!(passed);
        assert!(output.is_empty());
    }

    #[test]
    fn test_run_uses_loaded_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("field.json");
        std::fs::write(
            &path,
            r#"{ "validators": [ { "kind": "contains", "substring": "!", "message": "Add a !" } ] }"#,
        )
        .unwrap();

        let config = load_config(Some(path)).unwrap();
        let field = PasswordField::from_config(&config).unwrap();
        let (passed, output) = check(&field, "wow!\nwow\n");
        assert!(!passed);
        assert_eq!(output, "ok\nerror: Add a !\n");
    }

    // ========================================================================
    // Config lookup
    // ========================================================================

    #[test]
    fn test_argument_wins_over_default() {
        let dir = tempfile::tempdir().unwrap();
        let default = dir.path().join("field.json");
        std::fs::write(&default, "{}").unwrap();
        let arg = dir.path().join("other.json");

        assert_eq!(
            resolve_config_path(Some(arg.clone()), Some(default)),
            Some(arg)
        );
    }

    #[test]
    fn test_existing_default_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let default = dir.path().join("field.json");
        std::fs::write(&default, "{}").unwrap();

        assert_eq!(resolve_config_path(None, Some(default.clone())), Some(default));
    }

    #[test]
    fn test_missing_default_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let default = dir.path().join("field.json");

        assert_eq!(resolve_config_path(None, Some(default)), None);
        assert_eq!(resolve_config_path(None, None), None);
        assert_eq!(load_config(None).unwrap(), FieldConfig::password_defaults());
    }

    #[test]
    fn test_unreadable_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(dir.path().join("missing.json"))).is_err());
    }
}
