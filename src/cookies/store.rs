//! JSON-valued cookie access over a [`CookieJar`].
//!
//! Values are stored as JSON text in the cookie value. Reads never fail:
//! a missing cookie and a cookie that does not decode are both reported as
//! absent by [`CookieStore::get`], while [`CookieStore::lookup`] tells the
//! two apart.
//!
//! [`CookieStore::append`] is a read-modify-write over the jar and is not
//! atomic. Two callers that each read before either writes will lose one
//! of their entries.

use crate::base::storeerror::StoreError;
use crate::cookies::canonical_cookie::{expiry_after_days, format_entry};
use crate::cookies::jar::CookieJar;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use time::OffsetDateTime;

/// Configuration options for [`CookieStore`].
#[derive(Debug, Clone)]
pub struct CookieStoreConfig {
    /// Path attribute written with every cookie.
    pub path: Cow<'static, str>,
}

impl Default for CookieStoreConfig {
    fn default() -> Self {
        Self {
            path: Cow::Borrowed("/"),
        }
    }
}

/// Outcome of looking up a cookie.
#[derive(Debug, Clone, PartialEq)]
pub enum CookieLookup {
    /// The cookie exists and holds valid JSON.
    Found(Value),
    /// No usable cookie with that name: missing, empty, or ambiguous.
    Absent,
    /// The cookie exists but its value is not valid JSON.
    Invalid { raw: String, error: StoreError },
}

impl CookieLookup {
    /// Collapse to the decoded value, treating `Invalid` like `Absent`.
    pub fn into_value(self) -> Option<Value> {
        match self {
            CookieLookup::Found(value) => Some(value),
            CookieLookup::Absent | CookieLookup::Invalid { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, CookieLookup::Found(_))
    }
}

/// Find the raw value of `name` in a `document.cookie` style string.
///
/// The string is treated as `"; " + cookies` and split on `"; <name>="`.
/// Only a single occurrence counts; the value runs up to the next `;`.
/// A missing, repeated, or empty value gives `None`.
pub fn find_raw_value(cookies: &str, name: &str) -> Option<String> {
    let haystack = format!("; {cookies}");
    let needle = format!("; {name}=");

    let mut parts = haystack.split(needle.as_str()).skip(1);
    let after = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let raw = after.split(';').next().unwrap_or_default();
    (!raw.is_empty()).then(|| raw.to_string())
}

/// Reads and writes JSON values in cookies of a [`CookieJar`].
pub struct CookieStore<J> {
    jar: J,
    config: CookieStoreConfig,
}

impl<J: CookieJar> CookieStore<J> {
    /// Create a store over `jar` with default configuration.
    pub fn new(jar: J) -> Self {
        Self::with_config(jar, CookieStoreConfig::default())
    }

    pub fn with_config(jar: J, config: CookieStoreConfig) -> Self {
        Self { jar, config }
    }

    pub fn jar(&self) -> &J {
        &self.jar
    }

    /// Look up `name` and decode its value, reporting why nothing was found.
    pub fn lookup(&self, name: &str) -> CookieLookup {
        let Some(raw) = find_raw_value(&self.jar.read(), name) else {
            return CookieLookup::Absent;
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => CookieLookup::Found(value),
            Err(e) => {
                tracing::warn!(cookie = %name, error = %e, "error parsing cookie JSON");
                CookieLookup::Invalid {
                    raw,
                    error: StoreError::decode(name, e),
                }
            }
        }
    }

    /// Get the decoded JSON value of `name`, or `None` if it is missing or
    /// not valid JSON.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.lookup(name).into_value()
    }

    /// Get the value of `name` decoded as `T`.
    ///
    /// Valid JSON of the wrong shape is logged and treated as absent.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let value = self.get(name)?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(cookie = %name, error = %e, "cookie JSON has unexpected shape");
                None
            }
        }
    }

    /// Write `value` verbatim as the cookie `name`, expiring `days` days from now.
    ///
    /// Callers serialize structured data themselves (see [`set_json`](Self::set_json)).
    /// The value is not escaped; it must not contain `;`.
    pub fn set(&self, name: &str, value: &str, days: i64) {
        let expires = expiry_after_days(OffsetDateTime::now_utc(), days);
        self.jar
            .write(&format_entry(name, value, expires, &self.config.path));
        tracing::debug!(cookie = %name, days, "cookie written");
    }

    /// Serialize `value` to JSON and write it as the cookie `name`.
    pub fn set_json<T: Serialize + ?Sized>(
        &self,
        name: &str,
        value: &T,
        days: i64,
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string(value).map_err(|e| StoreError::encode(name, e))?;
        self.set(name, &json, days);
        Ok(())
    }

    /// The list of strings stored under `name`.
    ///
    /// Anything other than a JSON array of strings reads as an empty list.
    pub fn values(&self, name: &str) -> Vec<String> {
        match self.lookup(name) {
            CookieLookup::Found(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::debug!(cookie = %name, error = %e, "cookie is not a string list");
                Vec::new()
            }),
            CookieLookup::Absent | CookieLookup::Invalid { .. } => Vec::new(),
        }
    }

    /// Append `value` to the JSON array stored under `name`.
    ///
    /// Existing elements are kept whatever their type. A missing or
    /// undecodable cookie, or one that holds something other than an array,
    /// starts a new list. The expiry is reset to `days` days from now on
    /// every call. Duplicates are kept.
    pub fn append(&self, name: &str, value: &str, days: i64) {
        let mut items = match self.lookup(name) {
            CookieLookup::Found(Value::Array(items)) => items,
            CookieLookup::Found(other) => {
                tracing::debug!(cookie = %name, found = %other, "cookie is not a list, starting a new one");
                Vec::new()
            }
            CookieLookup::Absent | CookieLookup::Invalid { .. } => Vec::new(),
        };
        items.push(Value::String(value.to_owned()));

        match serde_json::to_string(&items) {
            Ok(json) => self.set(name, &json, days),
            Err(e) => tracing::warn!(cookie = %name, error = %e, "failed to encode cookie list"),
        }
    }

    /// Delete the cookie `name` by writing it with an expiry in the past.
    pub fn remove(&self, name: &str) {
        self.jar.write(&format_entry(
            name,
            "",
            OffsetDateTime::UNIX_EPOCH,
            &self.config.path,
        ));
        tracing::debug!(cookie = %name, "cookie removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::jar::MemoryCookieJar;
    use serde_json::json;

    #[test]
    fn test_find_raw_value() {
        let cookies = "theme=\"dark\"; seen=[\"a\",\"b\"]";
        assert_eq!(find_raw_value(cookies, "theme").as_deref(), Some("\"dark\""));
        assert_eq!(
            find_raw_value(cookies, "seen").as_deref(),
            Some("[\"a\",\"b\"]")
        );
        assert_eq!(find_raw_value(cookies, "missing"), None);
    }

    #[test]
    fn test_find_raw_value_needs_whole_name() {
        // "een" is a suffix of "seen" but never preceded by "; ".
        assert_eq!(find_raw_value("seen=1", "een"), None);
        assert_eq!(find_raw_value("xseen=1; seen=2", "seen").as_deref(), Some("2"));
    }

    #[test]
    fn test_find_raw_value_ambiguous_or_empty() {
        assert_eq!(find_raw_value("a=1; a=2", "a"), None);
        assert_eq!(find_raw_value("a=; b=2", "a"), None);
        assert_eq!(find_raw_value("", "a"), None);
    }

    #[test]
    fn test_lookup_distinguishes_invalid() {
        let jar = MemoryCookieJar::new();
        jar.write("broken={not json");
        let store = CookieStore::new(&jar);

        match store.lookup("broken") {
            CookieLookup::Invalid { raw, error } => {
                assert_eq!(raw, "{not json");
                assert_eq!(error.cookie_name(), Some("broken"));
            }
            other => panic!("Expected Invalid, got {other:?}"),
        }
        assert_eq!(store.lookup("nothing"), CookieLookup::Absent);
        assert_eq!(store.get("broken"), None);
    }

    #[test]
    fn test_set_then_get() {
        let store = CookieStore::new(MemoryCookieJar::new());
        let value = json!({"user": "ada", "visits": 3, "tags": ["x", "y"]});
        store.set("profile", &value.to_string(), 7);

        assert_eq!(store.get("profile"), Some(value));
        assert!(store.lookup("profile").is_found());
    }

    #[test]
    fn test_get_as_wrong_shape() {
        let store = CookieStore::new(MemoryCookieJar::new());
        store.set("count", "42", 1);

        assert_eq!(store.get_as::<u32>("count"), Some(42));
        assert_eq!(store.get_as::<Vec<String>>("count"), None);
    }

    #[test]
    fn test_append_over_non_list_starts_fresh() {
        let store = CookieStore::new(MemoryCookieJar::new());
        store.set("log", "{\"a\":1}", 1);
        store.append("log", "x", 1);
        assert_eq!(store.values("log"), vec!["x"]);

        store.set("log", "null", 1);
        store.append("log", "y", 1);
        assert_eq!(store.values("log"), vec!["y"]);
    }

    #[test]
    fn test_append_keeps_non_string_elements() {
        let store = CookieStore::new(MemoryCookieJar::new());
        store.set("n", "[1,2]", 7);
        store.append("n", "x", 7);

        assert_eq!(store.get("n"), Some(json!([1, 2, "x"])));
        // Not a list of strings, so the string view reads empty.
        assert!(store.values("n").is_empty());
    }

    #[test]
    fn test_custom_path() {
        let jar = MemoryCookieJar::new();
        let store = CookieStore::with_config(
            &jar,
            CookieStoreConfig {
                path: Cow::Borrowed("/app"),
            },
        );
        store.set("a", "1", 1);

        assert_eq!(jar.cookie("a").unwrap().path, "/app");
        store.remove("a");
        assert!(jar.cookie("a").is_none());
    }
}
