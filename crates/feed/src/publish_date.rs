// ABOUTME: Item publish dates, stored as RFC 2822 text ready for <pubDate>.
// ABOUTME: Structured chrono values are normalized once on conversion; strings are kept verbatim.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt;

/// A publish date in its final textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublishDate(String);

impl PublishDate {
    /// Wraps pre-formatted text without checking it.
    pub fn from_text(text: impl Into<String>) -> Self {
        PublishDate(text.into())
    }

    /// Normalizes a structured date/time to RFC 2822, e.g. `Thu, 21 Dec 2000 16:01:07 +0200`.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        PublishDate(dt.to_rfc2822())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the stored text back into a UTC timestamp, if it looks like a date.
    pub fn parse(&self) -> Option<DateTime<Utc>> {
        parse_flexible_time(&self.0)
    }
}

impl fmt::Display for PublishDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PublishDate {
    fn from(text: &str) -> Self {
        PublishDate::from_text(text)
    }
}

impl From<String> for PublishDate {
    fn from(text: String) -> Self {
        PublishDate(text)
    }
}

impl From<DateTime<Utc>> for PublishDate {
    fn from(dt: DateTime<Utc>) -> Self {
        PublishDate::from_datetime(&dt)
    }
}

impl From<DateTime<FixedOffset>> for PublishDate {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        PublishDate::from_datetime(&dt)
    }
}

impl From<DateTime<chrono::Local>> for PublishDate {
    fn from(dt: DateTime<chrono::Local>) -> Self {
        PublishDate::from_datetime(&dt)
    }
}

/// Parses a datetime string using common RSS/Atom formats.
/// Returns UTC datetime if successful, None if no format matches.
pub fn parse_flexible_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = parse_with_named_timezone(s) {
        return Some(dt);
    }

    let formats_with_tz = [
        "%a, %e %b %Y %H:%M:%S %z",
        "%d %b %Y %H:%M:%S %z",
        "%Y-%m-%dT%H:%M:%S%z",
    ];
    for fmt in &formats_with_tz {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let formats_naive = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%d %b %Y %H:%M:%S"];
    for fmt in &formats_naive {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

/// chrono's RFC 2822 parser only knows the US zones, so map a few more by hand.
fn parse_with_named_timezone(s: &str) -> Option<DateTime<Utc>> {
    const ZONES: &[(&str, i32)] = &[
        ("WEST", 3600),
        ("CEST", 2 * 3600),
        ("EEST", 3 * 3600),
        ("AEST", 10 * 3600),
        ("AEDT", 11 * 3600),
        ("NZST", 12 * 3600),
        ("NZDT", 13 * 3600),
        ("WET", 0),
        ("CET", 3600),
        ("EET", 2 * 3600),
        ("BST", 3600),
        ("JST", 9 * 3600),
        ("KST", 9 * 3600),
    ];

    let (name, offset_secs) = ZONES.iter().find(|(name, _)| s.ends_with(name))?;
    let base = s[..s.len() - name.len()].trim_end();
    let offset = FixedOffset::east_opt(*offset_secs)?;

    ["%a, %d %b %Y %H:%M:%S", "%a, %e %b %Y %H:%M:%S", "%d %b %Y %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(base, fmt).ok())
        .and_then(|naive| offset.from_local_datetime(&naive).single())
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime_normalized_to_rfc2822() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let dt = offset.with_ymd_and_hms(2000, 12, 21, 16, 1, 7).unwrap();
        assert_eq!(
            PublishDate::from(dt).as_str(),
            "Thu, 21 Dec 2000 16:01:07 +0200"
        );
    }

    #[test]
    fn test_utc_normalized() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(
            PublishDate::from(dt).as_str(),
            "Mon, 15 Jan 2024 10:00:00 +0000"
        );
    }

    #[test]
    fn test_text_kept_verbatim() {
        assert_eq!(PublishDate::from("yesterday-ish").as_str(), "yesterday-ish");
        assert!(PublishDate::from("yesterday-ish").parse().is_none());
    }

    #[test]
    fn test_parse_round_trip() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(PublishDate::from(dt).parse(), Some(dt));
    }

    #[test]
    fn test_parse_flexible_formats() {
        let expected = Utc.with_ymd_and_hms(2006, 1, 2, 22, 4, 5).unwrap();
        assert_eq!(parse_flexible_time("Mon, 02 Jan 2006 15:04:05 -0700"), Some(expected));
        assert_eq!(parse_flexible_time("2006-01-02T22:04:05Z"), Some(expected));
        assert_eq!(parse_flexible_time("2006-01-02 22:04:05"), Some(expected));
        assert_eq!(parse_flexible_time("Mon, 02 Jan 2006 23:04:05 CET"), Some(expected));
        assert!(parse_flexible_time("2023-12-25").is_some());
        assert!(parse_flexible_time("").is_none());
    }
}
