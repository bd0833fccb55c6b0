//! # Application Settings
//!
//! Typed view of `config.json`.
//!
//! ## File Compatibility
//! Keys are the snake_case field names below, the same keys earlier
//! releases wrote. Missing keys take their default; keys this release does
//! not know about are carried in [`AppConfig::extra`] and written back on
//! save.
//!
//! ```json
//! {
//!   "app_mode": "full",
//!   "qr_mode": "info_page",
//!   "target_url": "https://example.com",
//!   "db_path": "",
//!   "admin_token": "b3c1...",
//!   ...
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Application settings.
///
/// ## Fields
/// Every field has a default, so a partial (or empty) file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Which features this instance serves.
    pub app_mode: AppMode,

    /// What the printed QR code points at.
    pub qr_mode: QrMode,

    /// Destination when `qr_mode` is `target_url`.
    pub target_url: String,

    pub append_run_id_to_target_url: bool,

    /// Externally reachable base URL, e.g. `https://your-app.onrender.com`.
    pub public_base_url: String,

    pub qr_save_to_desktop: bool,
    pub qr_output_filename: String,

    // Local -> host sync
    pub remote_sync_enabled: bool,
    pub remote_base_url: String,
    /// Must match the host's `admin_token`.
    pub remote_admin_token: String,

    // QR rotation
    pub remote_rotate_enabled: bool,
    pub static_redirect_url: String,
    /// Host side: token the redirect gate currently accepts.
    pub current_qr_token: String,
    /// Local side: token embedded in the most recently generated QR.
    pub active_qr_token: String,
    /// Local side: last token successfully pushed to the host.
    pub last_sent_qr_token: String,

    /// Database file override. `QR_DB_PATH` takes priority.
    pub db_path: String,

    pub info_title: String,
    pub info_body: String,

    /// Generated on first load when empty.
    pub admin_token: String,

    /// Keys not modelled above, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Deployment flavour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppMode {
    /// Local use: QR generation plus the info page.
    #[default]
    Full,

    /// Hosted: info page and update API only, no QR generation.
    HostOnly,

    /// Any other stored value, kept as written.
    #[serde(untagged)]
    Other(String),
}

/// QR code destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QrMode {
    #[default]
    InfoPage,
    TargetUrl,

    /// Any other stored value, kept as written.
    #[serde(untagged)]
    Other(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            app_mode: AppMode::Full,
            qr_mode: QrMode::InfoPage,
            target_url: "https://example.com".to_string(),
            append_run_id_to_target_url: false,
            public_base_url: String::new(),
            qr_save_to_desktop: true,
            qr_output_filename: "qr.png".to_string(),
            remote_sync_enabled: false,
            remote_base_url: String::new(),
            remote_admin_token: String::new(),
            remote_rotate_enabled: false,
            static_redirect_url: "https://statik-qr-website.onrender.com".to_string(),
            current_qr_token: String::new(),
            active_qr_token: String::new(),
            last_sent_qr_token: String::new(),
            db_path: String::new(),
            info_title: "Bilgiler".to_string(),
            info_body: "Buraya bilgilerinizi yazın.".to_string(),
            admin_token: String::new(),
            extra: Map::new(),
        }
    }
}

impl AppConfig {
    /// Parses a settings file body. Keys stored as `null` take their default.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        let mut value: Value = serde_json::from_str(raw)?;
        if let Value::Object(map) = &mut value {
            map.retain(|_, v| !v.is_null());
        }
        serde_json::from_value(value)
    }

    /// The `db_path` setting, `None` when blank.
    pub fn db_path(&self) -> Option<&str> {
        match self.db_path.trim() {
            "" => None,
            path => Some(path),
        }
    }

    pub fn has_admin_token(&self) -> bool {
        !self.admin_token.trim().is_empty()
    }

    /// Copy with every token replaced by a short mask, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for token in [
            &mut copy.admin_token,
            &mut copy.remote_admin_token,
            &mut copy.current_qr_token,
            &mut copy.active_qr_token,
            &mut copy.last_sent_qr_token,
        ] {
            *token = mask(token);
        }
        copy
    }
}

fn mask(token: &str) -> String {
    match token.chars().count() {
        0 => String::new(),
        n if n <= 4 => "****".to_string(),
        _ => format!("{}****", token.chars().take(4).collect::<String>()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
