//! # planprefs
//!
//! Display preferences and custom-node matching for the plan viewer.
//!
//! The viewer page remembers a handful of user settings between visits
//! (generated-node and timeline toggles, layout sizes, and a list of
//! "custom" node patterns to hide or highlight). This crate holds that logic
//! without assuming a browser: storage is a trait, and the page-facing bits
//! return plain values.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Parses arguments, prints results, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Resolves keys, applies configured expiry and match mode  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs) + matcher.rs + controls.rs        │
//! │  - Pure logic over Rust types                               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/)                                           │
//! │  - PreferenceStore trait                                    │
//! │  - FileStore, CookieJar, InMemoryStore                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward nothing writes to stdout/stderr or exits the process.
//!
//! ## Module Overview
//!
//! - [`matcher`]: custom-node pattern matching
//! - [`store`]: preference storage abstraction and backends
//! - [`commands`]: preference, display, custom-node and config commands
//! - [`api`]: facade over the commands
//! - [`controls`]: one-shot "add plan" markup
//! - [`model`]: preference keys and stored values
//! - [`config`]: configuration file
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod controls;
pub mod error;
pub mod matcher;
pub mod model;
pub mod store;

pub use matcher::{matches_wildcard_pattern, Candidates, CustomNodes, MatchMode, Pattern};
