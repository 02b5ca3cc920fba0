use super::PreferenceStore;
use crate::error::Result;
use crate::model::Preference;
use std::collections::HashMap;
use tracing::debug;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    prefs: HashMap<String, Preference>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for InMemoryStore {
    fn get(&self, name: &str) -> Result<Option<String>> {
        Ok(self
            .prefs
            .get(name)
            .filter(|p| !p.is_expired())
            .map(|p| p.value.clone()))
    }

    fn set(&mut self, name: &str, value: &str, expiry_days: i64) -> Result<()> {
        debug!(name, expiry_days, "preference set");
        self.prefs
            .insert(name.to_string(), Preference::new(name, value, expiry_days));
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        if self.prefs.remove(name).is_some() {
            debug!(name, "preference deleted");
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<Preference>> {
        let mut live: Vec<Preference> = self
            .prefs
            .values()
            .filter(|p| !p.is_expired())
            .cloned()
            .collect();
        live.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(live)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::PrefKey;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_pref(mut self, key: PrefKey, value: &str) -> Self {
            self.store.set(key.name(), value, 365).unwrap();
            self
        }

        pub fn with_custom_patterns(self, patterns: &str) -> Self {
            self.with_pref(PrefKey::Custom, patterns)
        }

        pub fn with_expired_pref(mut self, key: PrefKey, value: &str) -> Self {
            self.store.set(key.name(), value, -1).unwrap();
            self
        }
    }
}
