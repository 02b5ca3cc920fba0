//! # Storage Layer
//!
//! The viewer page keeps its preferences in browser cookies. Here the
//! cookie store is a trait, [`PreferenceStore`], so the command layer (and the
//! custom-node matcher in particular) can run without a browser.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: no persistence, used in tests
//! - [`cookie::CookieJar`]: reads a `document.cookie` header and queues
//!   `Set-Cookie` lines, using the viewer's escape and expiry encoding
//! - [`fs::FileStore`]: a single `prefs.json` file, used by the CLI
//!
//! ## Expiry
//!
//! Every value is written with an expiry in days. Expired entries are
//! invisible to [`PreferenceStore::get`] and [`PreferenceStore::list`], the
//! way a browser drops stale cookies. A non-positive expiry expires the entry
//! immediately.

use crate::error::Result;
use crate::model::Preference;

pub mod cookie;
pub mod fs;
pub mod memory;

/// Abstract interface for preference storage.
pub trait PreferenceStore {
    /// Get a live value by name
    fn get(&self, name: &str) -> Result<Option<String>>;

    /// Create or replace a value, expiring `expiry_days` from now
    fn set(&mut self, name: &str, value: &str, expiry_days: i64) -> Result<()>;

    /// Remove a value. Removing an absent name is not an error.
    fn delete(&mut self, name: &str) -> Result<()>;

    /// All live values, sorted by name
    fn list(&self) -> Result<Vec<Preference>>;
}
