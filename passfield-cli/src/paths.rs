//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "passfield";
const APPLICATION: &str = "passfield";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory for logs.
///
/// - Linux: `$XDG_CACHE_HOME/passfield` or `~/.cache/passfield`
/// - macOS: `~/Library/Caches/dev.passfield.passfield`
/// - Windows: `C:\Users\<User>\AppData\Local\passfield\passfield\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/passfield` or `~/.config/passfield`
/// - macOS: `~/Library/Application Support/dev.passfield.passfield`
/// - Windows: `C:\Users\<User>\AppData\Roaming\passfield\passfield\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the default field configuration.
pub fn field_config() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("field.json"))
}
