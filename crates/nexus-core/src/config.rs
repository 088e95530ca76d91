//! TOML-based application configuration.
//!
//! Stores:
//! - Identity defaults used when filling in new leads and tasks
//! - The identity a Sales session is scoped to
//! - Default role and dashboard preferences
//!
//! Configuration is stored at `~/.config/nexus-crm/config.toml`, or under
//! `$NEXUS_CONFIG_DIR` when that is set.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::session::UserRole;
use crate::store::StoreDefaults;

/// Returns the configuration directory.
///
/// `NEXUS_CONFIG_DIR` wins when set. Otherwise `~/.config/nexus-crm/`, or
/// `~/.config/nexus-crm-dev/` with `NEXUS_ENV=dev`. The directory is only
/// created when the config is saved.
pub fn config_dir() -> PathBuf {
    match std::env::var_os("NEXUS_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("NEXUS_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("nexus-crm-dev")
            } else {
                base_dir.join("nexus-crm")
            }
        }
    }
}

/// Who new records default to and how users are addressed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdentityConfig {
    /// Owner of a lead created without one
    #[serde(default = "default_owner")]
    pub default_owner: String,
    /// Assignee of a task created without one
    #[serde(default = "default_assignee")]
    pub default_assignee: String,
    /// Salesperson a Sales session sees leads and tasks for
    #[serde(default = "default_owner")]
    pub sales_identity: String,
    #[serde(default = "default_owner_display_name")]
    pub owner_display_name: String,
    #[serde(default = "default_sales_display_name")]
    pub sales_display_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Role used when none is picked at login
    #[serde(default)]
    pub default_role: UserRole,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    /// Open tasks shown on the dashboard
    #[serde(default = "default_task_preview_limit")]
    pub task_preview_limit: usize,
}

/// Application configuration.
///
/// Serialized to/from TOML at `config.toml` in [`config_dir`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

fn default_owner() -> String {
    "Alex Rivera".into()
}
fn default_assignee() -> String {
    "Unassigned".into()
}
fn default_owner_display_name() -> String {
    "Director".into()
}
fn default_sales_display_name() -> String {
    "Alex".into()
}
fn default_task_preview_limit() -> usize {
    3
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            default_owner: default_owner(),
            default_assignee: default_assignee(),
            sales_identity: default_owner(),
            owner_display_name: default_owner_display_name(),
            sales_display_name: default_sales_display_name(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_role: UserRole::Owner,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            task_preview_limit: default_task_preview_limit(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if part.is_empty() {
                return Err(unknown());
            }
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                ),
                serde_json::Value::Number(_) => serde_json::Value::Number(
                    value
                        .parse::<u64>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                        .into(),
                ),
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Path of the config file.
    pub fn path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Load from the default location, or defaults if no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path())
    }

    /// Load from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };

        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(load_failed(e.to_string())),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path())
    }

    /// Persist to `path`, creating its parent directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        tracing::info!("saved config to {}", path.display());
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field (including role names that are neither owner nor sales).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Defaults the store uses when filling in new records.
    pub fn store_defaults(&self) -> StoreDefaults {
        StoreDefaults {
            owner: self.identity.default_owner.clone(),
            assignee: self.identity.default_assignee.clone(),
        }
    }
}
