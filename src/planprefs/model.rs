use crate::error::PrefsError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The preferences the plan viewer keeps between page loads.
///
/// Each key has the cookie name the viewer has always used, plus a short
/// alias for the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefKey {
    /// `"true"`/`"false"`: show generated nodes
    ShowGenerated,
    /// `"true"`/`"false"`: expanded timeline
    ShowExpanded,
    /// Plan file name. Deprecated; kept so old values can be listed and deleted.
    PlanFile,
    /// Pixels per time increment
    Pixels,
    /// Token height
    Height,
    /// Scaling
    Scale,
    /// Comma-separated custom-node patterns
    Custom,
}

impl PrefKey {
    pub const ALL: [PrefKey; 7] = [
        PrefKey::ShowGenerated,
        PrefKey::ShowExpanded,
        PrefKey::PlanFile,
        PrefKey::Pixels,
        PrefKey::Height,
        PrefKey::Scale,
        PrefKey::Custom,
    ];

    /// Name the value is stored under.
    pub fn name(&self) -> &'static str {
        match self {
            PrefKey::ShowGenerated => "showGenCookie",
            PrefKey::ShowExpanded => "showLineCookie",
            PrefKey::PlanFile => "showFileCookie",
            PrefKey::Pixels => "showPixelsCookie",
            PrefKey::Height => "showHeightCookie",
            PrefKey::Scale => "showScaleCookie",
            PrefKey::Custom => "showCustomCookie",
        }
    }

    pub fn alias(&self) -> &'static str {
        match self {
            PrefKey::ShowGenerated => "gen",
            PrefKey::ShowExpanded => "line",
            PrefKey::PlanFile => "file",
            PrefKey::Pixels => "pixels",
            PrefKey::Height => "height",
            PrefKey::Scale => "scale",
            PrefKey::Custom => "custom",
        }
    }

    pub fn is_deprecated(&self) -> bool {
        matches!(self, PrefKey::PlanFile)
    }
}

impl fmt::Display for PrefKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrefKey {
    type Err = PrefsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrefKey::ALL
            .iter()
            .copied()
            .find(|key| key.name() == s || key.alias() == s)
            .ok_or_else(|| PrefsError::UnknownKey(s.to_string()))
    }
}

/// A stored preference value with its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub name: String,
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl Preference {
    pub fn new(name: impl Into<String>, value: impl Into<String>, expiry_days: i64) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires_at: expiry_from_now(expiry_days),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

pub(crate) fn expiry_from_now(expiry_days: i64) -> DateTime<Utc> {
    let now = Utc::now();
    Duration::try_days(expiry_days)
        .and_then(|d| now.checked_add_signed(d))
        .unwrap_or(if expiry_days > 0 {
            DateTime::<Utc>::MAX_UTC
        } else {
            DateTime::<Utc>::MIN_UTC
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cookie_names_and_aliases() {
        assert_eq!(
            "showCustomCookie".parse::<PrefKey>().unwrap(),
            PrefKey::Custom
        );
        assert_eq!("gen".parse::<PrefKey>().unwrap(), PrefKey::ShowGenerated);
        assert_eq!("line".parse::<PrefKey>().unwrap(), PrefKey::ShowExpanded);
    }

    #[test]
    fn rejects_unknown_key() {
        let err = "nope".parse::<PrefKey>().unwrap_err();
        assert!(matches!(err, PrefsError::UnknownKey(k) if k == "nope"));
    }

    #[test]
    fn zero_day_preference_is_already_expired() {
        let pref = Preference::new("showGenCookie", "true", 0);
        assert!(pref.is_expired());
    }

    #[test]
    fn future_preference_is_live() {
        let pref = Preference::new("showGenCookie", "true", 365);
        assert!(!pref.is_expired());
        assert!(pref.is_expired_at(pref.expires_at));
    }

    #[test]
    fn huge_expiry_saturates() {
        let pref = Preference::new("x", "y", i64::MAX);
        assert_eq!(pref.expires_at, DateTime::<Utc>::MAX_UTC);
    }
}
