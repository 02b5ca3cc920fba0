//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for
//! library users (the CLI, or a page host embedding the matcher).
//!
//! The facade resolves preference keys, applies the configured expiry and
//! match mode, and dispatches. It holds no business logic and does no I/O of
//! its own beyond what the store and config loading do.
//!
//! `PrefsApi<S: PreferenceStore>` is generic over the backend:
//! - CLI: `PrefsApi<FileStore>`
//! - Page host: `PrefsApi<CookieJar>`
//! - Tests: `PrefsApi<InMemoryStore>`

use crate::commands::{self, config::ConfigAction, CmdResult};
use crate::config::PrefsConfig;
use crate::controls::PlanControls;
use crate::error::Result;
use crate::matcher::{Candidates, MatchMode};
use crate::model::PrefKey;
use crate::store::PreferenceStore;
use std::path::PathBuf;

pub struct PrefsApi<S: PreferenceStore> {
    store: S,
    config_dir: PathBuf,
    config: PrefsConfig,
    controls: PlanControls,
}

impl<S: PreferenceStore> PrefsApi<S> {
    pub fn new(store: S, config_dir: PathBuf) -> Result<Self> {
        let config = PrefsConfig::load(&config_dir)?;
        Ok(Self::with_config(store, config_dir, config))
    }

    pub fn with_config(store: S, config_dir: PathBuf, config: PrefsConfig) -> Self {
        Self {
            store,
            config_dir,
            config,
            controls: PlanControls::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get_pref(&self, key: &str) -> Result<CmdResult> {
        commands::prefs::get(&self.store, key.parse::<PrefKey>()?)
    }

    /// Sets a preference; `expiry_days` falls back to the configured expiry.
    pub fn set_pref(
        &mut self,
        key: &str,
        value: &str,
        expiry_days: Option<i64>,
    ) -> Result<CmdResult> {
        let key = key.parse::<PrefKey>()?;
        let days = expiry_days.unwrap_or(self.config.expiry_days);
        commands::prefs::set(&mut self.store, key, value, days)
    }

    pub fn delete_pref(&mut self, key: &str) -> Result<CmdResult> {
        commands::prefs::delete(&mut self.store, key.parse::<PrefKey>()?)
    }

    pub fn list_prefs(&self) -> Result<CmdResult> {
        commands::prefs::list(&self.store)
    }

    pub fn display_prefs(&mut self) -> Result<CmdResult> {
        commands::display::run(&mut self.store, self.config.expiry_days)
    }

    pub fn save_layout(&mut self, pixels: i64, height: i64, scale: i64) -> Result<CmdResult> {
        commands::display::save_layout(
            &mut self.store,
            pixels,
            height,
            scale,
            self.config.expiry_days,
        )
    }

    /// Custom-node check; `mode` falls back to the configured match mode.
    pub fn is_custom_node(
        &self,
        first: &str,
        second: &str,
        third: &str,
        mode: Option<MatchMode>,
    ) -> Result<bool> {
        commands::custom::is_custom_node(
            &self.store,
            Candidates::new(first, second, third),
            mode.unwrap_or(self.config.match_mode),
        )
    }

    pub fn custom_patterns(&self) -> Result<CmdResult> {
        commands::custom::patterns(&self.store)
    }

    pub fn on_ready(&mut self, banner: &str) -> Option<String> {
        self.controls.on_ready(banner)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.config_dir, action)?;
        if let Some(updated) = &result.config {
            self.config = updated.clone();
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrefsError;
    use crate::store::memory::InMemoryStore;
    use tempfile::tempdir;

    fn api() -> (PrefsApi<InMemoryStore>, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let api = PrefsApi::new(InMemoryStore::new(), dir.path().to_path_buf()).unwrap();
        (api, dir)
    }

    #[test]
    fn set_pref_accepts_alias_and_cookie_name() {
        let (mut api, _dir) = api();
        api.set_pref("custom", "foo", None).unwrap();
        assert_eq!(
            api.store().get("showCustomCookie").unwrap().as_deref(),
            Some("foo")
        );
        api.set_pref("showCustomCookie", "bar", Some(1)).unwrap();
        assert_eq!(
            api.store().get("showCustomCookie").unwrap().as_deref(),
            Some("bar")
        );
    }

    #[test]
    fn unknown_key_is_an_error() {
        let (mut api, _dir) = api();
        assert!(matches!(
            api.set_pref("colour", "red", None),
            Err(PrefsError::UnknownKey(_))
        ));
    }

    #[test]
    fn is_custom_node_uses_configured_mode() {
        let (mut api, _dir) = api();
        api.set_pref("custom", "foo,xyz", None).unwrap();
        assert!(!api.is_custom_node("foo", "bar", "baz", None).unwrap());

        api.config(ConfigAction::Set("match-mode".into(), "accumulate".into()))
            .unwrap();
        assert!(api.is_custom_node("foo", "bar", "baz", None).unwrap());
        assert!(!api
            .is_custom_node("foo", "bar", "baz", Some(MatchMode::Overwrite))
            .unwrap());
    }

    #[test]
    fn display_prefs_dispatches() {
        let (mut api, _dir) = api();
        api.save_layout(5, 6, 7).unwrap();
        let result = api.display_prefs().unwrap();
        let display = result.display.unwrap();
        assert_eq!(display.pixels, Some(5));
        assert!(display.show_expanded);
    }

    #[test]
    fn on_ready_fires_once() {
        let (mut api, _dir) = api();
        assert!(api.on_ready("").is_some());
        assert!(api.on_ready("").is_none());
    }
}
