//! Browser cookie encoding.
//!
//! [`CookieJar`] wraps the two strings a page actually exchanges with the
//! browser: the `document.cookie` read header (`"a=b; c=d"`) and the
//! assignment lines written back (`name=value; expires=...`). Values are
//! encoded with the JavaScript `escape`/`unescape` pair, which is what the
//! viewer has always stored, so existing cookies keep decoding.

use super::PreferenceStore;
use crate::error::Result;
use crate::model::{expiry_from_now, Preference};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Assignment that makes the browser drop a cookie.
pub const DELETE_EXPIRES: &str = "expires=Thu, 01-Jan-70 00:00:01 GMT;";

const UNRESERVED: &[u8] = b"@*_+-./";

#[derive(Debug, Default)]
pub struct CookieJar {
    // insertion order is the header order
    cookies: Vec<Preference>,
    outgoing: Vec<String>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a `document.cookie` header.
    ///
    /// Each `;`-separated entry is split at its first `=`; the name is
    /// trimmed and the value unescaped. An entry with no `=` has an empty
    /// name. When a name repeats, the first entry wins. The header carries
    /// no expiry, so parsed cookies never expire on their own.
    pub fn parse(header: &str) -> Self {
        let mut jar = Self::new();
        if header.is_empty() {
            return jar;
        }
        for entry in header.split(';') {
            let (name, raw) = match entry.find('=') {
                Some(idx) => (&entry[..idx], &entry[idx + 1..]),
                None => ("", entry),
            };
            let name = name.trim();
            if jar.cookies.iter().any(|c| c.name == name) {
                continue;
            }
            jar.cookies.push(Preference {
                name: name.to_string(),
                value: unescape(raw),
                expires_at: DateTime::<Utc>::MAX_UTC,
            });
        }
        jar
    }

    /// Renders the live cookies back into `document.cookie` form.
    pub fn header(&self) -> String {
        self.cookies
            .iter()
            .filter(|c| !c.is_expired())
            .map(|c| format!("{}={}", c.name, escape(&c.value)))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Drains the assignment lines queued by `set` and `delete`.
    pub fn take_outgoing(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outgoing)
    }
}

impl PreferenceStore for CookieJar {
    fn get(&self, name: &str) -> Result<Option<String>> {
        Ok(self
            .cookies
            .iter()
            .find(|c| c.name == name && !c.is_expired())
            .map(|c| c.value.clone()))
    }

    fn set(&mut self, name: &str, value: &str, expiry_days: i64) -> Result<()> {
        let expires_at = expiry_from_now(expiry_days);
        self.outgoing.push(set_cookie_line(name, value, expires_at));
        let pref = Preference {
            name: name.to_string(),
            value: value.to_string(),
            expires_at,
        };
        match self.cookies.iter_mut().find(|c| c.name == name) {
            Some(existing) => *existing = pref,
            None => self.cookies.push(pref),
        }
        debug!(name, expiry_days, "cookie set");
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        self.outgoing.push(delete_cookie_line(name));
        self.cookies.retain(|c| c.name != name);
        debug!(name, "cookie deleted");
        Ok(())
    }

    fn list(&self) -> Result<Vec<Preference>> {
        let mut live: Vec<Preference> = self
            .cookies
            .iter()
            .filter(|c| !c.is_expired())
            .cloned()
            .collect();
        live.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(live)
    }
}

pub fn set_cookie_line(name: &str, value: &str, expires_at: DateTime<Utc>) -> String {
    format!(
        "{}={}; expires={}",
        name,
        escape(value),
        expires_at.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}

pub fn delete_cookie_line(name: &str) -> String {
    format!("{}=; {}", name, DELETE_EXPIRES)
}

/// JavaScript `escape`: works on UTF-16 code units.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for unit in value.encode_utf16() {
        if unit < 0x80 && is_unreserved(unit as u8) {
            out.push(char::from(unit as u8));
        } else if unit < 0x100 {
            out.push_str(&format!("%{:02X}", unit));
        } else {
            out.push_str(&format!("%u{:04X}", unit));
        }
    }
    out
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || UNRESERVED.contains(&byte)
}

/// JavaScript `unescape`. Malformed `%` sequences are kept as-is.
pub fn unescape(value: &str) -> String {
    let units: Vec<u16> = value.encode_utf16().collect();
    let mut out: Vec<u16> = Vec::with_capacity(units.len());
    let mut i = 0;
    while i < units.len() {
        if units[i] == u16::from(b'%') {
            if units.get(i + 1) == Some(&u16::from(b'u')) {
                if let Some(code) = hex_value(units.get(i + 2..i + 6)) {
                    out.push(code);
                    i += 6;
                    continue;
                }
            } else if let Some(code) = hex_value(units.get(i + 1..i + 3)) {
                out.push(code);
                i += 3;
                continue;
            }
        }
        out.push(units[i]);
        i += 1;
    }
    String::from_utf16_lossy(&out)
}

fn hex_value(digits: Option<&[u16]>) -> Option<u16> {
    let digits = digits?;
    let mut code: u16 = 0;
    for unit in digits {
        let digit = char::from_u32(u32::from(*unit))?.to_digit(16)?;
        code = code * 16 + digit as u16;
    }
    Some(code)
}
