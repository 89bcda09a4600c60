//! Cookie storage with JSON-encoded values.
//!
//! - **Adapter**: [`CookieStore`](store::CookieStore) reads, writes and appends JSON values
//! - **Jar boundary**: the [`CookieJar`](jar::CookieJar) trait, shaped like `document.cookie`
//! - **In-memory jar**: [`MemoryCookieJar`](jar::MemoryCookieJar) with browser overwrite and expiry rules
//! - **Persistence**: save/load a memory jar to disk
//!
//! # Architecture
//!
//! | Browser | crumbjar (Rust) | Responsibility |
//! |---------|-----------------|----------------|
//! | `document.cookie` | [`CookieJar`](jar::CookieJar) | Read all / write one entry |
//! | Cookie jar | [`MemoryCookieJar`](jar::MemoryCookieJar) | Storage, overwrite, expiry |
//! | Cookie record | [`CanonicalCookie`](canonical_cookie::CanonicalCookie) | Single cookie representation |
//!
//! # Example
//!
//! ```rust
//! use crumbjar::cookies::jar::MemoryCookieJar;
//! use crumbjar::cookies::store::CookieStore;
//!
//! let store = CookieStore::new(MemoryCookieJar::new());
//! store.append("recent", "intro.md", 7);
//! store.append("recent", "setup.md", 7);
//! assert_eq!(store.values("recent"), vec!["intro.md", "setup.md"]);
//! ```

pub mod canonical_cookie;
pub mod jar;
pub mod persistence;
pub mod store;
