//! # Settings Store
//!
//! Loads and saves [`AppConfig`] as pretty-printed JSON.
//!
//! ## Load Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load()                                                                 │
//! │     │                                                                   │
//! │     ├── file missing ──► defaults                                       │
//! │     │                    admin_token = $ADMIN_TOKEN or generated        │
//! │     │                    save() ──► return                              │
//! │     │                                                                   │
//! │     └── file present ──► parse, missing or null keys = defaults         │
//! │                          │                                              │
//! │                          ├── $ADMIN_TOKEN set ──► use it (not saved)    │
//! │                          ├── admin_token blank ──► generate, save()     │
//! │                          └── otherwise ──► stored token                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A generated admin token is always persisted before it is returned, so
//! once issued it survives restarts.

use std::fs;
use std::path::{Path, PathBuf};

use drnekin_core::ids;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::paths::{self, PathEnv, ADMIN_TOKEN_ENV};

/// Handle on a settings file location.
///
/// ## Example
/// ```rust,no_run
/// use drnekin_config::ConfigStore;
///
/// let store = ConfigStore::from_env();
/// let mut cfg = store.load()?;
/// cfg.qr_output_filename = "shop.png".to_string();
/// store.save(&cfg)?;
/// # Ok::<(), drnekin_config::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    admin_token_override: Option<String>,
}

impl ConfigStore {
    /// Store at an explicit path with no admin token override.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigStore {
            path: path.into(),
            admin_token_override: None,
        }
    }

    /// Store at the resolved per-user location, honouring `QR_CONFIG_PATH`
    /// and `ADMIN_TOKEN`.
    pub fn from_env() -> Self {
        let env = PathEnv::from_process();
        let path = paths::resolve_config_path(&env, Path::exists);
        ConfigStore::new(path).admin_token_override(paths::env_var(ADMIN_TOKEN_ENV))
    }

    /// Sets the admin token that wins over any stored one.
    pub fn admin_token_override(mut self, token: Option<String>) -> Self {
        self.admin_token_override = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the settings, creating the file on first use.
    pub fn load(&self) -> ConfigResult<AppConfig> {
        if !self.path.exists() {
            let mut cfg = AppConfig::default();
            cfg.admin_token = match &self.admin_token_override {
                Some(token) => token.clone(),
                None => ids::new_admin_token(),
            };
            info!(path = %self.path.display(), "Creating config file with defaults");
            self.save(&cfg)?;
            return Ok(cfg);
        }

        let raw = fs::read_to_string(&self.path)
            .map_err(|e| ConfigError::storage(&self.path, e))?;
        let mut cfg = AppConfig::from_json(&raw).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), "Config loaded");

        if let Some(token) = &self.admin_token_override {
            cfg.admin_token = token.clone();
        } else if !cfg.has_admin_token() {
            info!("Generating admin token");
            cfg.admin_token = ids::new_admin_token();
            self.save(&cfg)?;
        }

        Ok(cfg)
    }

    /// Writes the full settings object, creating parent directories.
    pub fn save(&self, cfg: &AppConfig) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ConfigError::storage(parent, e))?;
        }

        let mut body = serde_json::to_string_pretty(cfg)?;
        body.push('\n');

        fs::write(&self.path, body).map_err(|e| ConfigError::storage(&self.path, e))?;

        debug!(path = %self.path.display(), "Config saved");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
