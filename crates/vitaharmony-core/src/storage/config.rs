//! TOML-based application configuration.
//!
//! Stores tunables that are not part of the user's profile:
//! - Remote gate endpoint and request headers
//! - Session timing (tick period, reset delays, coach cadence)
//! - Workout performance accumulator parameters
//!
//! Configuration is stored at `~/.config/vitaharmony/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::data_dir;
use crate::error::ConfigError;

/// Remote gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GateConfig {
    /// Endpoint to check. No URL means the gate always resolves to the
    /// native app.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
    #[serde(default = "default_gate_timeout")]
    pub timeout_secs: u64,
}

/// Session player configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Tick period in milliseconds. One tick is one second of session time.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_workout_reset_delay")]
    pub workout_reset_delay_secs: u32,
    #[serde(default = "default_meditation_reset_delay")]
    pub meditation_reset_delay_secs: u32,
    #[serde(default = "default_initial_performance")]
    pub initial_performance: f64,
    #[serde(default = "default_skip_penalty")]
    pub skip_penalty: f64,
    #[serde(default = "default_performance_step")]
    pub performance_step: f64,
    #[serde(default = "default_coach_interval")]
    pub coach_interval_secs: u32,
    #[serde(default = "default_guidance_interval")]
    pub guidance_interval_secs: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/vitaharmony/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

fn default_user_agent() -> String {
    format!("VitaHarmony/{}", env!("CARGO_PKG_VERSION"))
}
fn default_accept_language() -> String {
    "en-US,en;q=0.9".into()
}
fn default_gate_timeout() -> u64 {
    5
}
fn default_tick_ms() -> u64 {
    1000
}
fn default_workout_reset_delay() -> u32 {
    2
}
fn default_meditation_reset_delay() -> u32 {
    3
}
fn default_initial_performance() -> f64 {
    0.75
}
fn default_skip_penalty() -> f64 {
    0.1
}
fn default_performance_step() -> f64 {
    0.05
}
fn default_coach_interval() -> u32 {
    15
}
fn default_guidance_interval() -> u32 {
    60
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            url: None,
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            timeout_secs: default_gate_timeout(),
        }
    }
}

impl GateConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            workout_reset_delay_secs: default_workout_reset_delay(),
            meditation_reset_delay_secs: default_meditation_reset_delay(),
            initial_performance: default_initial_performance(),
            skip_penalty: default_skip_penalty(),
            performance_step: default_performance_step(),
            coach_interval_secs: default_coach_interval(),
            guidance_interval_secs: default_guidance_interval(),
        }
    }
}

impl SessionConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
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
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        data_dir()
            .map(|dir| dir.join("config.toml"))
            .map_err(|e| ConfigError::LoadFailed {
                path: PathBuf::from("config.toml"),
                message: e.to_string(),
            })
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
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

    /// Set a config value by key without persisting.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
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

    /// Set a config value by key and persist. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed = Config::from_toml(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.gate.timeout_secs, 5);
    }

    #[test]
    fn partial_file_takes_defaults() {
        let parsed = Config::from_toml("[gate]\nurl = \"https://gate.test/check\"\n").unwrap();
        assert_eq!(parsed.gate.url.as_deref(), Some("https://gate.test/check"));
        assert_eq!(parsed.gate.timeout_secs, 5);
        assert_eq!(parsed.session, SessionConfig::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("gate.timeout_secs").as_deref(), Some("5"));
        assert_eq!(cfg.get("session.tick_ms").as_deref(), Some("1000"));
        assert!(cfg.get("session.missing_key").is_none());
    }

    #[test]
    fn apply_updates_number_and_string() {
        let mut cfg = Config::default();
        cfg.apply("session.workout_reset_delay_secs", "4").unwrap();
        cfg.apply("session.skip_penalty", "0.2").unwrap();
        cfg.apply("gate.url", "https://gate.test/").unwrap();
        assert_eq!(cfg.session.workout_reset_delay_secs, 4);
        assert!((cfg.session.skip_penalty - 0.2).abs() < f64::EPSILON);
        assert_eq!(cfg.gate.url.as_deref(), Some("https://gate.test/"));
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("gate.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn apply_rejects_invalid_number() {
        let mut cfg = Config::default();
        assert!(cfg.apply("session.tick_ms", "fast").is_err());
        assert_eq!(cfg.session.tick_ms, 1000);
    }
}
