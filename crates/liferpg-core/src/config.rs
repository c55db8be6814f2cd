//! Configuration resolution for `LifeRPG`.
//!
//! Implements hierarchical config resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/liferpg/settings.json)
//! 3. Explicit config file (`--config`)
//! 4. Environment variables
//! 5. CLI arguments (applied by the binary, highest priority)

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Complete `LifeRPG` configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub quests: QuestConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database location and pool tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub database_path: Option<PathBuf>,
    pub max_connections: u32,
    /// How long a writer waits for the `SQLite` write lock (seconds).
    pub busy_timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            max_connections: 5,
            busy_timeout_secs: 5,
        }
    }
}

/// Daily quest settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestConfig {
    pub day_boundary: DayBoundary,
}

/// Which clock decides the calendar date a daily quest set belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    #[default]
    Utc,
    Local,
}

impl DayBoundary {
    /// The current calendar date on this boundary's clock.
    pub fn today(self) -> NaiveDate {
        match self {
            Self::Utc => Utc::now().date_naive(),
            Self::Local => Local::now().date_naive(),
        }
    }
}

impl FromStr for DayBoundary {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utc" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            other => Err(Error::Config(format!(
                "Unknown day boundary '{other}' (expected 'utc' or 'local')"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// `EnvFilter` directive scoped to the `LifeRPG` crates.
    pub fn default_filter(&self) -> String {
        format!(
            "liferpg={level},liferpg_core={level},liferpg_engine={level}",
            level = self.level
        )
    }
}

/// Load configuration with hierarchical resolution.
///
/// Files are merged key by key, so a layer only overrides the keys it
/// actually sets.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut merged = Value::Object(Map::new());

    if let Some(global_path) = global_config_path() {
        if global_path.exists() {
            merge_values(&mut merged, load_config_file(&global_path)?);
        }
    }

    if let Some(path) = explicit {
        merge_values(&mut merged, load_config_file(path)?);
    }

    let mut config = config_from_value(merged)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    Ok(config)
}

/// Get the global config file path.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("liferpg").join("settings.json"))
}

/// Default database location when none is configured.
pub fn default_database_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".liferpg").join("liferpg.db"))
}

fn load_config_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}

/// Recursively merge `overlay` into `base`. Objects merge per key, any
/// other value replaces what was there.
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

fn config_from_value(value: Value) -> Result<Config> {
    serde_json::from_value(value).map_err(|e| Error::Config(format!("Invalid configuration: {e}")))
}

fn apply_env_overrides(
    config: &mut Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(val) = lookup("LIFERPG_DB_PATH") {
        config.storage.database_path = Some(PathBuf::from(val));
    }
    if let Some(val) = lookup("LIFERPG_DAY_BOUNDARY") {
        config.quests.day_boundary = val.parse()?;
    }
    if let Some(val) = lookup("LIFERPG_LOG_LEVEL") {
        config.logging.level = val;
    }
    if let Some(val) = lookup("LIFERPG_LOG_JSON") {
        config.logging.json = matches!(val.trim(), "1" | "true" | "yes");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_utc_and_five_connections() {
        let config = Config::default();
        assert_eq!(config.quests.day_boundary, DayBoundary::Utc);
        assert_eq!(config.storage.max_connections, 5);
        assert_eq!(config.storage.busy_timeout_secs, 5);
        assert!(!config.logging.json);
    }

    #[test]
    fn partial_file_keeps_section_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"quests": {"day_boundary": "local"}}"#).unwrap();
        assert_eq!(config.quests.day_boundary, DayBoundary::Local);
        assert_eq!(config.storage.max_connections, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"storage": {"database_path": "/tmp/x.db", "max_connections": 2}}"#,
        )
        .unwrap();

        let mut merged = Value::Object(Map::new());
        merge_values(&mut merged, load_config_file(&path).unwrap());
        let config = config_from_value(merged).unwrap();
        assert_eq!(config.storage.database_path, Some(PathBuf::from("/tmp/x.db")));
        assert_eq!(config.storage.max_connections, 2);
        assert_eq!(config.storage.busy_timeout_secs, 5);
    }

    #[test]
    fn later_file_only_overrides_keys_it_sets() {
        let dir = tempfile::TempDir::new().unwrap();
        let global = dir.path().join("global.json");
        let explicit = dir.path().join("explicit.json");
        std::fs::write(
            &global,
            r#"{"quests": {"day_boundary": "local"}, "storage": {"max_connections": 2}}"#,
        )
        .unwrap();
        std::fs::write(&explicit, r#"{"storage": {"database_path": "/tmp/x.db"}}"#).unwrap();

        let mut merged = Value::Object(Map::new());
        merge_values(&mut merged, load_config_file(&global).unwrap());
        merge_values(&mut merged, load_config_file(&explicit).unwrap());
        let config = config_from_value(merged).unwrap();

        assert_eq!(config.quests.day_boundary, DayBoundary::Local);
        assert_eq!(config.storage.max_connections, 2);
        assert_eq!(config.storage.database_path, Some(PathBuf::from("/tmp/x.db")));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn mistyped_value_is_config_error() {
        let value: Value = serde_json::from_str(r#"{"storage": {"max_connections": "many"}}"#).unwrap();
        assert!(matches!(config_from_value(value), Err(Error::Config(_))));
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(load_config_file(&path), Err(Error::Config(_))));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, |key| match key {
            "LIFERPG_DB_PATH" => Some("/data/game.db".into()),
            "LIFERPG_DAY_BOUNDARY" => Some("LOCAL".into()),
            "LIFERPG_LOG_JSON" => Some("true".into()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.storage.database_path, Some(PathBuf::from("/data/game.db")));
        assert_eq!(config.quests.day_boundary, DayBoundary::Local);
        assert!(config.logging.json);
    }

    #[test]
    fn unknown_day_boundary_is_rejected() {
        let mut config = Config::default();
        let result = apply_env_overrides(&mut config, |key| {
            (key == "LIFERPG_DAY_BOUNDARY").then(|| "mars".to_string())
        });
        assert!(result.is_err());
    }
}
