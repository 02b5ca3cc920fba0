//! Typed view over the viewer's display preferences.
//!
//! The two toggles are defaulted on first read: if nothing (or an empty
//! string) is stored, the default is written and the stored value is
//! returned. The layout integers are parsed leniently, the way the page
//! parses them (leading digits count, trailing junk is ignored).

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::PrefKey;
use crate::store::PreferenceStore;
use tracing::debug;

pub const DEFAULT_SHOW_GENERATED: &str = "false";
pub const DEFAULT_SHOW_EXPANDED: &str = "true";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayPrefs {
    pub show_generated: bool,
    pub show_expanded: bool,
    pub pixels: Option<i64>,
    pub height: Option<i64>,
    pub scale: Option<i64>,
    /// Raw custom-node pattern list, when non-empty
    pub custom: Option<String>,
}

impl DisplayPrefs {
    pub fn load<S: PreferenceStore>(store: &mut S, expiry_days: i64) -> Result<Self> {
        let show_generated = provide_generated(store, expiry_days)? == "true";
        let show_expanded = provide_expanded(store, expiry_days)? == "true";
        Ok(Self {
            show_generated,
            show_expanded,
            pixels: read_int(store, PrefKey::Pixels)?,
            height: read_int(store, PrefKey::Height)?,
            scale: read_int(store, PrefKey::Scale)?,
            custom: store
                .get(PrefKey::Custom.name())?
                .filter(|raw| !raw.is_empty()),
        })
    }

    pub fn save_layout<S: PreferenceStore>(
        store: &mut S,
        pixels: i64,
        height: i64,
        scale: i64,
        expiry_days: i64,
    ) -> Result<()> {
        store.set(PrefKey::Pixels.name(), &pixels.to_string(), expiry_days)?;
        store.set(PrefKey::Height.name(), &height.to_string(), expiry_days)?;
        store.set(PrefKey::Scale.name(), &scale.to_string(), expiry_days)?;
        Ok(())
    }
}

/// Returns the stored value, writing `default` first if it is missing or empty.
pub fn provide<S: PreferenceStore>(
    store: &mut S,
    key: PrefKey,
    default: &str,
    expiry_days: i64,
) -> Result<String> {
    if let Some(value) = store.get(key.name())?.filter(|v| !v.is_empty()) {
        return Ok(value);
    }
    debug!(key = key.name(), default, "writing default preference");
    store.set(key.name(), default, expiry_days)?;
    Ok(store
        .get(key.name())?
        .unwrap_or_else(|| default.to_string()))
}

pub fn provide_generated<S: PreferenceStore>(store: &mut S, expiry_days: i64) -> Result<String> {
    provide(store, PrefKey::ShowGenerated, DEFAULT_SHOW_GENERATED, expiry_days)
}

pub fn provide_expanded<S: PreferenceStore>(store: &mut S, expiry_days: i64) -> Result<String> {
    provide(store, PrefKey::ShowExpanded, DEFAULT_SHOW_EXPANDED, expiry_days)
}

fn read_int<S: PreferenceStore>(store: &S, key: PrefKey) -> Result<Option<i64>> {
    Ok(store.get(key.name())?.as_deref().and_then(parse_int))
}

/// Leading-digits integer parse: optional whitespace, optional sign, then
/// as many decimal digits as there are. `"12px"` is 12, `"px"` is nothing.
pub fn parse_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

pub fn run<S: PreferenceStore>(store: &mut S, expiry_days: i64) -> Result<CmdResult> {
    let display = DisplayPrefs::load(store, expiry_days)?;
    Ok(CmdResult::default().with_display(display))
}

pub fn save_layout<S: PreferenceStore>(
    store: &mut S,
    pixels: i64,
    height: i64,
    scale: i64,
    expiry_days: i64,
) -> Result<CmdResult> {
    DisplayPrefs::save_layout(store, pixels, height, scale, expiry_days)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Layout saved: pixels={} height={} scale={}",
        pixels, height, scale
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::cookie::CookieJar;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn first_read_writes_defaults() {
        let mut store = InMemoryStore::new();
        let prefs = DisplayPrefs::load(&mut store, 365).unwrap();
        assert!(!prefs.show_generated);
        assert!(prefs.show_expanded);
        assert_eq!(store.get("showGenCookie").unwrap().as_deref(), Some("false"));
        assert_eq!(store.get("showLineCookie").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn stored_toggles_are_not_overwritten() {
        let mut store = StoreFixture::new()
            .with_pref(PrefKey::ShowGenerated, "true")
            .with_pref(PrefKey::ShowExpanded, "false")
            .store;
        let prefs = DisplayPrefs::load(&mut store, 365).unwrap();
        assert!(prefs.show_generated);
        assert!(!prefs.show_expanded);
    }

    #[test]
    fn empty_value_is_replaced_by_default() {
        let mut store = StoreFixture::new()
            .with_pref(PrefKey::ShowExpanded, "")
            .store;
        assert_eq!(provide_expanded(&mut store, 365).unwrap(), "true");
        assert_eq!(store.get("showLineCookie").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn unreadable_default_falls_back_to_default_value() {
        let mut jar = CookieJar::new();
        // a zero-day cookie is gone before it can be read back
        assert_eq!(provide_generated(&mut jar, 0).unwrap(), "false");
    }

    #[test]
    fn layout_round_trips() {
        let mut store = InMemoryStore::new();
        DisplayPrefs::save_layout(&mut store, 12, 30, 2, 365).unwrap();
        let prefs = DisplayPrefs::load(&mut store, 365).unwrap();
        assert_eq!(prefs.pixels, Some(12));
        assert_eq!(prefs.height, Some(30));
        assert_eq!(prefs.scale, Some(2));
        assert_eq!(prefs.custom, None);
    }

    #[test]
    fn custom_patterns_are_exposed_raw() {
        let mut store = StoreFixture::new().with_custom_patterns("a*b,foo").store;
        let prefs = DisplayPrefs::load(&mut store, 365).unwrap();
        assert_eq!(prefs.custom.as_deref(), Some("a*b,foo"));
    }

    #[test]
    fn parse_int_is_lenient() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("  7px"), Some(7));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("+8"), Some(8));
        assert_eq!(parse_int("px"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("3.9"), Some(3));
    }
}
