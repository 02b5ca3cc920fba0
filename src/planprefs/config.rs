use crate::error::{PrefsError, Result};
use crate::matcher::MatchMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_EXPIRY_DAYS: i64 = 365;

pub const CONFIG_KEYS: [&str; 2] = ["expiry-days", "match-mode"];

/// Configuration for planprefs, stored next to the preferences in config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrefsConfig {
    /// How long written preferences live, in days
    #[serde(default = "default_expiry_days")]
    pub expiry_days: i64,

    /// How custom-node pattern outcomes are combined
    #[serde(default)]
    pub match_mode: MatchMode,
}

fn default_expiry_days() -> i64 {
    DEFAULT_EXPIRY_DAYS
}

impl Default for PrefsConfig {
    fn default() -> Self {
        Self {
            expiry_days: DEFAULT_EXPIRY_DAYS,
            match_mode: MatchMode::default(),
        }
    }
}

impl PrefsConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(PrefsError::Io)?;
        let config: PrefsConfig =
            serde_json::from_str(&content).map_err(PrefsError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(PrefsError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(PrefsError::Serialization)?;
        fs::write(config_path, content).map_err(PrefsError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "expiry-days" => Some(self.expiry_days.to_string()),
            "match-mode" => Some(self.match_mode.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = || PrefsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "expiry-days" => {
                let days: i64 = value.trim().parse().map_err(|_| invalid())?;
                if days <= 0 {
                    return Err(invalid());
                }
                self.expiry_days = days;
                Ok(())
            }
            "match-mode" => {
                self.match_mode = value.parse().map_err(|_| invalid())?;
                Ok(())
            }
            other => Err(PrefsError::UnknownConfigKey(other.to_string())),
        }
    }
}
