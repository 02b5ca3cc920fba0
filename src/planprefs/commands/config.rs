use crate::commands::{CmdMessage, CmdResult};
use crate::config::PrefsConfig;
use crate::error::{PrefsError, Result};
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = PrefsConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = PrefsConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => result.add_message(CmdMessage::error(
                    PrefsError::UnknownConfigKey(key).to_string(),
                )),
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = PrefsConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e.to_string()));
                return Ok(res);
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::matcher::MatchMode;
    use tempfile::tempdir;

    #[test]
    fn set_persists_and_show_key_reads_back() {
        let dir = tempdir().unwrap();
        let result = run(
            dir.path(),
            ConfigAction::Set("match-mode".into(), "accumulate".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(
            result.config.map(|c| c.match_mode),
            Some(MatchMode::Accumulate)
        );

        let shown = run(dir.path(), ConfigAction::ShowKey("match-mode".into())).unwrap();
        assert_eq!(shown.messages[0].content, "accumulate");
    }

    #[test]
    fn invalid_value_is_reported_not_saved() {
        let dir = tempdir().unwrap();
        let result = run(
            dir.path(),
            ConfigAction::Set("expiry-days".into(), "never".into()),
        )
        .unwrap();
        assert!(result.has_errors());
        assert_eq!(result.messages[0].content, "Invalid value for expiry-days: never");
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn unknown_key_is_reported() {
        let dir = tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::ShowKey("file-ext".into())).unwrap();
        assert!(result.has_errors());
        assert_eq!(result.messages[0].content, "Unknown config key: file-ext");
    }

    #[test]
    fn show_all_returns_defaults() {
        let dir = tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(PrefsConfig::default()));
    }
}
