//! # Storage Path Resolution
//!
//! Decides where `config.json` and `app.db` live.
//!
//! ## Resolution Order (first match wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Database                              Config                           │
//! │  ────────                              ──────                           │
//! │  1. $QR_DB_PATH                        1. $QR_CONFIG_PATH               │
//! │  2. db_path setting                    2. <exe dir>/config.json if it   │
//! │  3. <exe dir>/app.db if it exists         exists                        │
//! │  4. %LOCALAPPDATA% | %APPDATA%         3. %APPDATA% | %LOCALAPPDATA%    │
//! │     \drnekin-qr\app.db                    \drnekin-qr\config.json       │
//! │  5. $XDG_DATA_HOME/drnekin-qr/app.db   4. $XDG_CONFIG_HOME/drnekin-qr/  │
//! │  6. ~/.local/share/drnekin-qr/app.db      config.json                   │
//! │                                        5. ~/.config/drnekin-qr/         │
//! │                                           config.json                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The files beside the executable are kept for installs that predate the
//! per-user locations. A per-user location keeps data in place when the
//! application folder is moved or copied.
//!
//! Resolution is a pure function of a [`PathEnv`] snapshot and an existence
//! probe, so it can be tested without touching the process environment.
//! Nothing here creates directories.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

/// Overrides the database file location.
pub const DB_PATH_ENV: &str = "QR_DB_PATH";

/// Overrides the settings file location.
pub const CONFIG_PATH_ENV: &str = "QR_CONFIG_PATH";

/// Overrides the admin token at load time.
pub const ADMIN_TOKEN_ENV: &str = "ADMIN_TOKEN";

/// Directory name used under every per-user base directory.
pub const APP_DIR_NAME: &str = "drnekin-qr";

pub const DB_FILE_NAME: &str = "app.db";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// The environment inputs that influence path resolution.
///
/// Blank values are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathEnv {
    /// `QR_DB_PATH`
    pub db_path: Option<String>,
    /// `QR_CONFIG_PATH`
    pub config_path: Option<String>,
    /// `LOCALAPPDATA` (Windows)
    pub local_app_data: Option<String>,
    /// `APPDATA` (Windows)
    pub app_data: Option<String>,
    /// `XDG_DATA_HOME`
    pub xdg_data_home: Option<String>,
    /// `XDG_CONFIG_HOME`
    pub xdg_config_home: Option<String>,
    /// The user's home directory.
    pub home: Option<PathBuf>,
    /// Directory containing the running executable.
    pub app_dir: Option<PathBuf>,
    /// Working directory at startup.
    pub cwd: Option<PathBuf>,
}

impl PathEnv {
    /// Captures the current process environment.
    pub fn from_process() -> Self {
        PathEnv {
            db_path: env_var(DB_PATH_ENV),
            config_path: env_var(CONFIG_PATH_ENV),
            local_app_data: env_var("LOCALAPPDATA"),
            app_data: env_var("APPDATA"),
            xdg_data_home: env_var("XDG_DATA_HOME"),
            xdg_config_home: env_var("XDG_CONFIG_HOME"),
            home: BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()),
            app_dir: std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf)),
            cwd: std::env::current_dir().ok(),
        }
    }
}

/// Reads an environment variable, trimmed; `None` when unset or blank.
pub fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|v| non_blank(&v))
}

fn non_blank(value: &str) -> Option<String> {
    match value.trim() {
        "" => None,
        v => Some(v.to_string()),
    }
}

fn first_non_blank<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .filter_map(Option::as_deref)
        .map(str::trim)
        .find(|c| !c.is_empty())
}

/// Resolves the database file path.
///
/// ## Arguments
/// * `env` - Environment snapshot
/// * `configured` - The `db_path` setting, if any
/// * `exists` - Probe used for the legacy file beside the executable
pub fn resolve_db_path(
    env: &PathEnv,
    configured: Option<&str>,
    exists: impl Fn(&Path) -> bool,
) -> PathBuf {
    if let Some(path) = first_non_blank(&[&env.db_path]) {
        return PathBuf::from(path);
    }

    if let Some(path) = configured.map(str::trim).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    if let Some(legacy) = env.app_dir.as_ref().map(|dir| dir.join(DB_FILE_NAME)) {
        if exists(&legacy) {
            return legacy;
        }
    }

    default_user_db_path(env)
}

/// Per-user database location, ignoring overrides.
pub fn default_user_db_path(env: &PathEnv) -> PathBuf {
    if let Some(base) = first_non_blank(&[&env.local_app_data, &env.app_data]) {
        return Path::new(base).join(APP_DIR_NAME).join(DB_FILE_NAME);
    }

    if let Some(xdg) = first_non_blank(&[&env.xdg_data_home]) {
        return Path::new(xdg).join(APP_DIR_NAME).join(DB_FILE_NAME);
    }

    user_base_dir(env)
        .join(".local")
        .join("share")
        .join(APP_DIR_NAME)
        .join(DB_FILE_NAME)
}

/// Resolves the settings file path.
pub fn resolve_config_path(env: &PathEnv, exists: impl Fn(&Path) -> bool) -> PathBuf {
    if let Some(path) = first_non_blank(&[&env.config_path]) {
        return PathBuf::from(path);
    }

    if let Some(legacy) = env.app_dir.as_ref().map(|dir| dir.join(CONFIG_FILE_NAME)) {
        if exists(&legacy) {
            return legacy;
        }
    }

    default_user_config_path(env)
}

/// Per-user settings location, ignoring overrides.
pub fn default_user_config_path(env: &PathEnv) -> PathBuf {
    // Roaming profile first for settings.
    if let Some(base) = first_non_blank(&[&env.app_data, &env.local_app_data]) {
        return Path::new(base).join(APP_DIR_NAME).join(CONFIG_FILE_NAME);
    }

    if let Some(xdg) = first_non_blank(&[&env.xdg_config_home]) {
        return Path::new(xdg).join(APP_DIR_NAME).join(CONFIG_FILE_NAME);
    }

    user_base_dir(env)
        .join(".config")
        .join(APP_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

/// Base for the dotted per-user directories. Always absolute: without a
/// home directory the executable's directory, then the working directory,
/// then the system temp directory stand in.
fn user_base_dir(env: &PathEnv) -> PathBuf {
    [&env.home, &env.app_dir, &env.cwd]
        .into_iter()
        .flatten()
        .find(|dir| dir.is_absolute())
        .cloned()
        .unwrap_or_else(std::env::temp_dir)
}

// =============================================================================
// Unit Tests
// =============================================================================
