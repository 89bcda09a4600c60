use crate::cookies::canonical_cookie::CanonicalCookie;
use dashmap::DashMap;
use std::sync::Arc;
use time::OffsetDateTime;

/// A textual cookie jar in the shape of a browser's `document.cookie`.
///
/// Reading yields every visible cookie as `name=value` pairs joined by
/// `"; "`. Writing takes a single entry, `name=value` optionally followed by
/// attributes such as `expires=...` and `path=/`, and either stores it or
/// silently ignores it.
pub trait CookieJar {
    fn read(&self) -> String;
    fn write(&self, entry: &str);
}

impl<J: CookieJar + ?Sized> CookieJar for &J {
    fn read(&self) -> String {
        (**self).read()
    }

    fn write(&self, entry: &str) {
        (**self).write(entry)
    }
}

impl<J: CookieJar + ?Sized> CookieJar for Arc<J> {
    fn read(&self) -> String {
        (**self).read()
    }

    fn write(&self, entry: &str) {
        (**self).write(entry)
    }
}

/// In-memory cookie jar with `document.cookie` semantics.
///
/// Cookies are keyed by name and path. Overwriting keeps the original
/// creation time, an entry with a past expiry deletes the cookie, and
/// expired cookies are hidden from [`read`](CookieJar::read).
#[derive(Debug)]
pub struct MemoryCookieJar {
    // Store: Map<Path, List<Cookie>>, each list in creation order.
    store: Arc<DashMap<String, Vec<CanonicalCookie>>>,
}

impl Default for MemoryCookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
        }
    }

    /// Insert or replace a cookie, matching on name and path.
    pub fn set_canonical_cookie(&self, cookie: CanonicalCookie) {
        let mut entry = self.store.entry(cookie.path.clone()).or_default();

        if let Some(existing) = entry.iter_mut().find(|c| c.name == cookie.name) {
            existing.value = cookie.value;
            existing.expiration_time = cookie.expiration_time;
        } else {
            entry.push(cookie);
        }
    }

    /// Remove the cookie with this name and path. Returns whether one existed.
    pub fn delete(&self, name: &str, path: &str) -> bool {
        let Some(mut entry) = self.store.get_mut(path) else {
            return false;
        };
        let before = entry.len();
        entry.retain(|c| c.name != name);
        before != entry.len()
    }

    /// Get the live cookie with this name, preferring the longest path.
    pub fn cookie(&self, name: &str) -> Option<CanonicalCookie> {
        self.visible_cookies(OffsetDateTime::now_utc())
            .into_iter()
            .find(|c| c.name == name)
    }

    /// Non-expired cookies, sorted by path length (longest first) then creation time.
    fn visible_cookies(&self, now: OffsetDateTime) -> Vec<CanonicalCookie> {
        let mut result: Vec<CanonicalCookie> = self
            .store
            .iter()
            .flat_map(|entry| entry.value().clone())
            .filter(|c| !c.is_expired(now))
            .collect();

        result.sort_by(|a, b| {
            b.path
                .len()
                .cmp(&a.path.len())
                .then_with(|| a.creation_time.cmp(&b.creation_time))
        });

        result
    }

    /// Drop every expired cookie. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = OffsetDateTime::now_utc();
        let mut removed = 0;
        for mut entry in self.store.iter_mut() {
            let before = entry.len();
            entry.retain(|c| !c.is_expired(now));
            removed += before - entry.len();
        }
        self.store.retain(|_, cookies| !cookies.is_empty());
        removed
    }

    /// Get total cookie count, including expired cookies not yet purged.
    pub fn total_cookie_count(&self) -> usize {
        self.store.iter().map(|e| e.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_cookie_count() == 0
    }

    /// Clear all cookies.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Iterate over all cookies (for persistence).
    pub fn iter_all_cookies(&self) -> impl Iterator<Item = CanonicalCookie> + '_ {
        self.store.iter().flat_map(|entry| entry.value().clone())
    }
}

impl CookieJar for MemoryCookieJar {
    fn read(&self) -> String {
        self.visible_cookies(OffsetDateTime::now_utc())
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write(&self, entry: &str) {
        let now = OffsetDateTime::now_utc();

        let Some(cookie) = CanonicalCookie::parse(entry, now) else {
            tracing::debug!(entry = %entry, "ignoring malformed cookie entry");
            return;
        };

        if cookie.is_expired(now) {
            self.delete(&cookie.name, &cookie.path);
        } else {
            self.set_canonical_cookie(cookie);
        }
    }
}
