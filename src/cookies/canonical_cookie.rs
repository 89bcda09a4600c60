use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// IMF-fixdate as used in the `expires` attribute, e.g. `Tue, 20 Oct 2026 12:00:00 GMT`.
pub const COOKIE_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// Largest lifetime accepted before clamping, roughly ten thousand years.
const MAX_LIFETIME_DAYS: i64 = 3_660_000;

/// Represents a cookie held by a jar.
/// Modeled after Chromium's `net::CanonicalCookie`, reduced to what a
/// `document.cookie` style jar observes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub creation_time: OffsetDateTime,
    pub expiration_time: Option<OffsetDateTime>,
}

impl CanonicalCookie {
    pub fn new(
        name: String,
        value: String,
        path: String,
        creation_time: OffsetDateTime,
        expiration_time: Option<OffsetDateTime>,
    ) -> Self {
        Self {
            name,
            value,
            path,
            creation_time,
            expiration_time,
        }
    }

    /// Parse a jar write entry such as `name=value; expires=...; path=/`.
    ///
    /// `Max-Age` takes precedence over `Expires`; a non-positive `Max-Age`
    /// yields an already expired cookie. Returns `None` for entries without
    /// a `name=value` pair.
    pub fn parse(entry: &str, now: OffsetDateTime) -> Option<Self> {
        let parsed = cookie::Cookie::parse(entry).ok()?;

        let expiration_time = match parsed.max_age() {
            Some(max_age) if max_age <= Duration::ZERO => Some(OffsetDateTime::UNIX_EPOCH),
            Some(max_age) => now.checked_add(max_age),
            None => parsed.expires().and_then(|e| e.datetime()),
        };

        let path = parsed
            .path()
            .filter(|p| p.starts_with('/'))
            .unwrap_or("/")
            .to_string();

        Some(Self::new(
            parsed.name().to_string(),
            parsed.value().to_string(),
            path,
            now,
            expiration_time,
        ))
    }

    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        if let Some(expiry) = self.expiration_time {
            expiry < current_time
        } else {
            false // Session cookie, lives as long as the jar.
        }
    }
}

/// The instant `days` days after `now`, clamped to the representable range.
pub fn expiry_after_days(now: OffsetDateTime, days: i64) -> OffsetDateTime {
    let days = days.clamp(-MAX_LIFETIME_DAYS, MAX_LIFETIME_DAYS);
    now.checked_add(Duration::days(days)).unwrap_or(if days > 0 {
        PrimitiveDateTime::MAX.assume_utc()
    } else {
        PrimitiveDateTime::MIN.assume_utc()
    })
}

/// Format an `expires` date in IMF-fixdate form.
pub fn format_cookie_date(date: OffsetDateTime) -> Option<String> {
    date.to_offset(UtcOffset::UTC)
        .format(COOKIE_DATE_FORMAT)
        .ok()
}

/// Build a raw write entry: `<name>=<value>; expires=<date>; path=<path>`.
///
/// Neither `name` nor `value` is escaped.
pub fn format_entry(name: &str, value: &str, expires: OffsetDateTime, path: &str) -> String {
    match format_cookie_date(expires) {
        Some(date) => format!("{name}={value}; expires={date}; path={path}"),
        None => {
            tracing::debug!(cookie = %name, "expiry date not representable, writing session cookie");
            format!("{name}={value}; path={path}")
        }
    }
}
