//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Preferred per-mode timer parameters (used by the CLI when flags are
//!   omitted; the engine's own built-in defaults still apply beneath these)
//! - Notification preferences (bell, volume, vibration, custom sound)
//!
//! Configuration is stored at `~/.config/wodtimer/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Preferred per-mode timer parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerDefaultsConfig {
    #[serde(default = "default_countdown_seconds")]
    pub countdown_seconds: u64,
    #[serde(default = "default_amrap_seconds")]
    pub amrap_seconds: u64,
    #[serde(default = "default_work_seconds")]
    pub work_seconds: u64,
    #[serde(default = "default_rest_seconds")]
    pub rest_seconds: u64,
    #[serde(default = "default_rounds")]
    pub rounds: u32,
    #[serde(default = "default_emom_interval_seconds")]
    pub emom_interval_seconds: u64,
    #[serde(default = "default_emom_rounds")]
    pub emom_rounds: u32,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_50")]
    pub volume: u32,
    #[serde(default = "default_true")]
    pub vibration: bool,
    /// Path to custom notification sound file (optional).
    #[serde(default)]
    pub custom_sound: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/wodtimer/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerDefaultsConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_countdown_seconds() -> u64 {
    60
}
fn default_amrap_seconds() -> u64 {
    600
}
fn default_work_seconds() -> u64 {
    30
}
fn default_rest_seconds() -> u64 {
    15
}
fn default_rounds() -> u32 {
    8
}
fn default_emom_interval_seconds() -> u64 {
    60
}
fn default_emom_rounds() -> u32 {
    10
}
fn default_true() -> bool {
    true
}
fn default_50() -> u32 {
    50
}

impl Default for TimerDefaultsConfig {
    fn default() -> Self {
        Self {
            countdown_seconds: default_countdown_seconds(),
            amrap_seconds: default_amrap_seconds(),
            work_seconds: default_work_seconds(),
            rest_seconds: default_rest_seconds(),
            rounds: default_rounds(),
            emom_interval_seconds: default_emom_interval_seconds(),
            emom_rounds: default_emom_rounds(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 50,
            vibration: true,
            custom_sound: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerDefaultsConfig::default(),
            notifications: NotificationsConfig::default(),
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
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Null => serde_json::Value::String(value.into()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }
            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }
        Ok(())
    }

    /// Look up a value by dotted key, e.g. `timer.rounds`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let root = serde_json::to_value(self).ok()?;
        Self::get_json_value_by_path(&root, key).cloned()
    }

    /// Set a value by dotted key, parsing `value` against the existing type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut root = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut root, key, value)?;
        *self = serde_json::from_value(root).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, falling back to defaults when the file is absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_defaults() {
        let config = Config::default();
        assert_eq!(config.timer.countdown_seconds, 60);
        assert_eq!(config.timer.amrap_seconds, 600);
        assert_eq!(config.timer.work_seconds, 30);
        assert_eq!(config.timer.rest_seconds, 15);
        assert_eq!(config.timer.rounds, 8);
        assert_eq!(config.timer.emom_interval_seconds, 60);
        assert_eq!(config.timer.emom_rounds, 10);
        assert!(config.notifications.enabled);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str("[timer]\nrounds = 5\n").unwrap();
        assert_eq!(config.timer.rounds, 5);
        assert_eq!(config.timer.work_seconds, 30);
        assert!(config.notifications.enabled);
    }

    #[test]
    fn get_and_set_by_dotted_path() {
        let mut config = Config::default();
        assert_eq!(config.get("timer.rounds"), Some(serde_json::json!(8)));

        config.set("timer.rounds", "12").unwrap();
        assert_eq!(config.timer.rounds, 12);

        config.set("notifications.enabled", "false").unwrap();
        assert!(!config.notifications.enabled);

        assert!(matches!(
            config.set("timer.nope", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            config.set("notifications.enabled", "loud"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.timer.work_seconds = 45;
        config.notifications.volume = 80;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.timer.work_seconds, 45);
        assert_eq!(loaded.notifications.volume, 80);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.timer.rounds, 8);
    }
}
