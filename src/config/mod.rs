// SPDX-License-Identifier: MPL-2.0
//! Notification preferences stored in `settings.toml`.
//!
//! A missing file yields the defaults silently; a file that cannot be parsed
//! yields the defaults plus [`CONFIG_LOAD_WARNING`] so the host can tell the
//! user with a warning toast.
//!
//! ```
//! use social_toasts::config::{self, Config};
//! use social_toasts::notifications::Kind;
//! use std::time::Duration;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut config = Config::default();
//! config.notifications.error_ms = Some(8000);
//! config::save_with_override(&config, Some(dir.path().to_path_buf())).unwrap();
//!
//! let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
//! assert!(warning.is_none());
//! assert_eq!(loaded.notifications.duration_for(Kind::Error), Duration::from_millis(8000));
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use crate::notifications::{Kind, Position};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "SocialToasts";

/// Warning key returned by [`load`] when the settings file cannot be parsed.
pub const CONFIG_LOAD_WARNING: &str = "notification-config-load-error";

/// Root configuration, one struct per `settings.toml` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationSettings,

    #[serde(default)]
    pub diagnostics: DiagnosticsSettings,
}

/// Toast timing and placement settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationSettings {
    /// Auto-dismiss delay for success toasts (ms, 0 disables).
    #[serde(default = "default_success_ms", skip_serializing_if = "Option::is_none")]
    pub success_ms: Option<u64>,

    /// Auto-dismiss delay for info toasts (ms, 0 disables).
    #[serde(default = "default_info_ms", skip_serializing_if = "Option::is_none")]
    pub info_ms: Option<u64>,

    /// Auto-dismiss delay for warning toasts (ms, 0 disables).
    #[serde(default = "default_warning_ms", skip_serializing_if = "Option::is_none")]
    pub warning_ms: Option<u64>,

    /// Auto-dismiss delay for error toasts (ms, 0 disables).
    #[serde(default = "default_error_ms", skip_serializing_if = "Option::is_none")]
    pub error_ms: Option<u64>,

    /// Fade-out time between hiding a toast and dropping it (ms).
    #[serde(
        default = "default_exit_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub exit_delay_ms: Option<u64>,

    /// Where the overlay stacks toasts that carry no position of their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    /// Length of the random part of generated ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_suffix_len: Option<usize>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            success_ms: default_success_ms(),
            info_ms: default_info_ms(),
            warning_ms: default_warning_ms(),
            error_ms: default_error_ms(),
            exit_delay_ms: default_exit_delay_ms(),
            position: None,
            id_suffix_len: None,
        }
    }
}

impl NotificationSettings {
    /// Returns the auto-dismiss delay applied when a caller gives none.
    ///
    /// Confirmation toasts always resolve to zero.
    #[must_use]
    pub fn duration_for(&self, kind: Kind) -> Duration {
        let ms = match kind {
            Kind::Success => self.success_ms.unwrap_or(DEFAULT_SUCCESS_MS),
            Kind::Info => self.info_ms.unwrap_or(DEFAULT_INFO_MS),
            Kind::Warning => self.warning_ms.unwrap_or(DEFAULT_WARNING_MS),
            Kind::Error => self.error_ms.unwrap_or(DEFAULT_ERROR_MS),
            Kind::Confirm => CONFIRM_MS,
        };
        Duration::from_millis(ms.min(MAX_TOAST_MS))
    }

    /// Returns the fade-out delay between the two removal phases.
    #[must_use]
    pub fn exit_delay(&self) -> Duration {
        let ms = self
            .exit_delay_ms
            .unwrap_or(DEFAULT_EXIT_DELAY_MS)
            .min(MAX_EXIT_DELAY_MS);
        Duration::from_millis(ms)
    }

    /// Returns the id suffix length, never shorter than [`MIN_ID_SUFFIX_LEN`].
    #[must_use]
    pub fn id_suffix_len(&self) -> usize {
        self.id_suffix_len
            .unwrap_or(DEFAULT_ID_SUFFIX_LEN)
            .max(MIN_ID_SUFFIX_LEN)
    }
}

/// Lifecycle event log settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticsSettings {
    /// Whether lifecycle events are recorded at all.
    #[serde(default = "default_diagnostics_enabled")]
    pub enabled: bool,

    /// Number of events kept before the oldest are evicted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_capacity: Option<usize>,
}

impl Default for DiagnosticsSettings {
    fn default() -> Self {
        Self {
            enabled: default_diagnostics_enabled(),
            buffer_capacity: None,
        }
    }
}

fn default_success_ms() -> Option<u64> {
    Some(DEFAULT_SUCCESS_MS)
}

fn default_info_ms() -> Option<u64> {
    Some(DEFAULT_INFO_MS)
}

fn default_warning_ms() -> Option<u64> {
    Some(DEFAULT_WARNING_MS)
}

fn default_error_ms() -> Option<u64> {
    Some(DEFAULT_ERROR_MS)
}

fn default_exit_delay_ms() -> Option<u64> {
    Some(DEFAULT_EXIT_DELAY_MS)
}

fn default_diagnostics_enabled() -> bool {
    true
}

/// Returns the config file path, rooted at `base_dir` when one is given.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    base_dir
        .or_else(|| {
            dirs::config_dir().map(|mut path| {
                path.push(APP_NAME);
                path
            })
        })
        .map(|mut path| {
            path.push(CONFIG_FILE);
            path
        })
}

/// Reads `settings.toml` from the platform config directory.
///
/// Falls back to `Config::default()`; the second element is
/// [`CONFIG_LOAD_WARNING`] when the file exists but is unreadable.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Same as [`load`], rooted at `base_dir` instead of the platform directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    let Some(path) = get_config_path_with_override(base_dir).filter(|p| p.exists()) else {
        return (Config::default(), None);
    };
    match load_from_path(&path) {
        Ok(config) => (config, None),
        Err(_) => (Config::default(), Some(CONFIG_LOAD_WARNING.to_string())),
    }
}

/// Parses one settings file.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Writes `settings.toml` to the platform config directory.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Same as [`save`], rooted at `base_dir`.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Writes one settings file, creating missing parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(config)?)?;
    Ok(())
}
