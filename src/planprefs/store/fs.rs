use super::PreferenceStore;
use crate::error::{PrefsError, Result};
use crate::model::{expiry_from_now, Preference};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const PREFS_FILENAME: &str = "prefs.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredValue {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Preferences kept in `<root>/prefs.json`.
///
/// The whole file is read on every access and rewritten on every change.
/// Expired entries are dropped the next time the file is written.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn prefs_path(&self) -> PathBuf {
        self.root.join(PREFS_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(PrefsError::Io)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<BTreeMap<String, StoredValue>> {
        let path = self.prefs_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path).map_err(PrefsError::Io)?;
        let values = serde_json::from_str(&content).map_err(PrefsError::Serialization)?;
        Ok(values)
    }

    fn save(&self, values: &BTreeMap<String, StoredValue>) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(values).map_err(PrefsError::Serialization)?;
        fs::write(self.prefs_path(), content).map_err(PrefsError::Io)?;
        Ok(())
    }

    fn prune(values: &mut BTreeMap<String, StoredValue>) {
        let now = Utc::now();
        values.retain(|name, stored| {
            let live = stored.expires_at > now;
            if !live {
                debug!(name = name.as_str(), "dropping expired preference");
            }
            live
        });
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, name: &str) -> Result<Option<String>> {
        let now = Utc::now();
        Ok(self
            .load()?
            .remove(name)
            .filter(|stored| stored.expires_at > now)
            .map(|stored| stored.value))
    }

    fn set(&mut self, name: &str, value: &str, expiry_days: i64) -> Result<()> {
        let mut values = self.load()?;
        Self::prune(&mut values);
        values.insert(
            name.to_string(),
            StoredValue {
                value: value.to_string(),
                expires_at: expiry_from_now(expiry_days),
            },
        );
        self.save(&values)?;
        debug!(name, expiry_days, path = %self.prefs_path().display(), "preference saved");
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        let mut values = self.load()?;
        if values.remove(name).is_none() {
            return Ok(());
        }
        Self::prune(&mut values);
        self.save(&values)?;
        debug!(name, "preference deleted");
        Ok(())
    }

    fn list(&self) -> Result<Vec<Preference>> {
        let mut values = self.load()?;
        Self::prune(&mut values);
        // BTreeMap iteration is already sorted by name
        Ok(values
            .into_iter()
            .map(|(name, stored)| Preference {
                name,
                value: stored.value,
                expires_at: stored.expires_at,
            })
            .collect())
    }
}
