//! # crumbjar
//!
//! JSON values in browser-style cookies.
//!
//! `crumbjar` wraps a `document.cookie` shaped jar behind the
//! [`CookieJar`](cookies::jar::CookieJar) trait and layers JSON reads,
//! raw writes, and a string-list append on top of it.
//!
//! ## Quick Start
//!
//! ```rust
//! use crumbjar::cookies::jar::MemoryCookieJar;
//! use crumbjar::cookies::store::CookieStore;
//! use serde_json::json;
//!
//! let store = CookieStore::new(MemoryCookieJar::new());
//! store.set("prefs", r#"{"dark":true}"#, 30);
//! assert_eq!(store.get("prefs"), Some(json!({"dark": true})));
//!
//! // Missing and undecodable cookies both read as None.
//! store.set("broken", "{oops", 30);
//! assert_eq!(store.get("broken"), None);
//! assert_eq!(store.get("missing"), None);
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions and result context helpers
//! - [`cookies`] - Cookie jar, JSON store adapter and persistence
//! - [`color`] - RGB/HSL color shapes stored as cookie payloads

pub mod base;
pub mod color;
pub mod cookies;
