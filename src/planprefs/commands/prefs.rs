use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::PrefKey;
use crate::store::PreferenceStore;

pub fn get<S: PreferenceStore>(store: &S, key: PrefKey) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.get(key.name())? {
        Some(value) => result.add_message(CmdMessage::info(value)),
        None => result.add_message(CmdMessage::warning(format!("{} is not set", key))),
    }
    if key.is_deprecated() {
        result.add_message(CmdMessage::warning(format!(
            "{} is deprecated and no longer read by the viewer",
            key
        )));
    }
    Ok(result)
}

pub fn set<S: PreferenceStore>(
    store: &mut S,
    key: PrefKey,
    value: &str,
    expiry_days: i64,
) -> Result<CmdResult> {
    store.set(key.name(), value, expiry_days)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} set to {} for {} days",
        key, value, expiry_days
    )));
    Ok(result)
}

pub fn delete<S: PreferenceStore>(store: &mut S, key: PrefKey) -> Result<CmdResult> {
    let existed = store.get(key.name())?.is_some();
    store.delete(key.name())?;
    let mut result = CmdResult::default();
    if existed {
        result.add_message(CmdMessage::success(format!("{} deleted", key)));
    } else {
        result.add_message(CmdMessage::info(format!("{} was not set", key)));
    }
    Ok(result)
}

pub fn list<S: PreferenceStore>(store: &S) -> Result<CmdResult> {
    Ok(CmdResult::default().with_preferences(store.list()?))
}
