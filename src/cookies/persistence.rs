//! Cookie jar persistence - save and load cookies to/from disk.
//!
//! Provides JSON-based persistence for [`MemoryCookieJar`].

use crate::base::context::PersistenceResultExt;
use crate::base::storeerror::StoreError;
use crate::cookies::canonical_cookie::CanonicalCookie;
use crate::cookies::jar::MemoryCookieJar;
use std::fs;
use std::path::Path;
use time::OffsetDateTime;

use serde::{Deserialize, Serialize};

/// Serializable representation of a cookie for persistence.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct PersistentCookie {
    name: String,
    value: String,
    path: String,
    created_unix_nanos: i128,
    expires_unix_secs: Option<i64>,
}

/// Save cookies from a MemoryCookieJar to a file.
///
/// # Example
/// ```ignore
/// persistence::save_cookies(&jar, Path::new("/path/to/cookies.json"))?;
/// ```
pub fn save_cookies(jar: &MemoryCookieJar, path: &Path) -> Result<(), StoreError> {
    let all_cookies: Vec<PersistentCookie> = jar
        .iter_all_cookies()
        .map(|cookie| PersistentCookie {
            name: cookie.name,
            value: cookie.value,
            path: cookie.path,
            created_unix_nanos: cookie.creation_time.unix_timestamp_nanos(),
            expires_unix_secs: cookie.expiration_time.map(|t| t.unix_timestamp()),
        })
        .collect();

    let json = serde_json::to_string_pretty(&all_cookies).persistence_context(path)?;
    fs::write(path, json).persistence_context(path)?;

    tracing::debug!(path = %path.display(), count = all_cookies.len(), "cookie jar saved");
    Ok(())
}

/// Load cookies from a file into a new MemoryCookieJar.
///
/// Expired cookies are skipped.
pub fn load_cookies(path: &Path) -> Result<MemoryCookieJar, StoreError> {
    let json = fs::read_to_string(path).persistence_context(path)?;
    let persistent_cookies: Vec<PersistentCookie> =
        serde_json::from_str(&json).persistence_context(path)?;

    let jar = MemoryCookieJar::new();
    let now = OffsetDateTime::now_utc();

    for pc in persistent_cookies {
        let expiration_time = match pc.expires_unix_secs {
            Some(secs) => match OffsetDateTime::from_unix_timestamp(secs) {
                Ok(expires) => Some(expires),
                Err(e) => {
                    tracing::debug!(cookie = %pc.name, error = %e, "skipping cookie with invalid expiry");
                    continue;
                }
            },
            None => None,
        };
        let creation_time =
            OffsetDateTime::from_unix_timestamp_nanos(pc.created_unix_nanos).unwrap_or(now);

        let cookie = CanonicalCookie::new(pc.name, pc.value, pc.path, creation_time, expiration_time);
        if cookie.is_expired(now) {
            continue;
        }

        jar.set_canonical_cookie(cookie);
    }

    tracing::debug!(path = %path.display(), count = jar.total_cookie_count(), "cookie jar loaded");
    Ok(jar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::jar::CookieJar;
    use tempfile::tempdir;
    use time::macros::datetime;
    use time::Duration;

    #[test]
    fn test_save_load_roundtrip() {
        let jar = MemoryCookieJar::new();
        jar.write("session=\"abc123\"; path=/");
        let now = OffsetDateTime::now_utc();
        jar.set_canonical_cookie(CanonicalCookie::new(
            "recent".to_string(),
            "[\"a\",\"b\"]".to_string(),
            "/".to_string(),
            now,
            Some(now + Duration::days(7)),
        ));

        let dir = tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        save_cookies(&jar, &path).unwrap();

        let loaded = load_cookies(&path).unwrap();
        assert_eq!(loaded.total_cookie_count(), 2);
        assert_eq!(loaded.read(), jar.read());
        assert_eq!(
            loaded.cookie("recent").unwrap().expiration_time.map(|t| t.unix_timestamp()),
            Some((now + Duration::days(7)).unix_timestamp())
        );
    }

    #[test]
    fn test_load_keeps_sub_second_creation_order() {
        let jar = MemoryCookieJar::new();
        let expires = Some(datetime!(2100-01-01 00:00:00 UTC));
        // Equal path lengths, created within the same second.
        jar.set_canonical_cookie(CanonicalCookie::new(
            "late".to_string(),
            "2".to_string(),
            "/bb".to_string(),
            datetime!(2026-01-01 00:00:00.7 UTC),
            expires,
        ));
        jar.set_canonical_cookie(CanonicalCookie::new(
            "early".to_string(),
            "1".to_string(),
            "/aa".to_string(),
            datetime!(2026-01-01 00:00:00.2 UTC),
            expires,
        ));

        let dir = tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        save_cookies(&jar, &path).unwrap();

        let loaded = load_cookies(&path).unwrap();
        assert_eq!(loaded.read(), "early=1; late=2");
        assert_eq!(
            loaded.cookie("late").unwrap().creation_time,
            datetime!(2026-01-01 00:00:00.7 UTC)
        );
    }

    #[test]
    fn test_load_skips_expired() {
        let jar = MemoryCookieJar::new();
        let now = OffsetDateTime::now_utc();
        jar.set_canonical_cookie(CanonicalCookie::new(
            "stale".to_string(),
            "1".to_string(),
            "/".to_string(),
            now - Duration::days(2),
            Some(now - Duration::days(1)),
        ));

        let dir = tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        save_cookies(&jar, &path).unwrap();

        let loaded = load_cookies(&path).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = load_cookies(&path).unwrap_err();
        assert!(matches!(err, StoreError::Persistence { .. }));
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            load_cookies(&path),
            Err(StoreError::Persistence { .. })
        ));
    }
}
