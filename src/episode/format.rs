use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Locale used for every rendered date
pub const DATE_LOCALE: Locale = Locale::pt_BR;

/// Short day-month-year pattern, e.g. `10 mai 21`
const DATE_PATTERN: &str = "%-d %b %y";

/// Format whole seconds as zero-padded `HH:MM:SS`.
///
/// Hours are not wrapped, so durations of 100 hours or more render with
/// as many digits as needed.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Format a publish date with the fixed short pattern and locale
pub fn format_published_date(date: NaiveDate) -> String {
    let midnight = Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN));
    midnight
        .format_localized(DATE_PATTERN, DATE_LOCALE)
        .to_string()
}

/// Parse the API's publish timestamp.
///
/// Accepts RFC 3339 (converted to UTC) as well as the offset-less
/// `YYYY-MM-DD HH:MM:SS` and plain `YYYY-MM-DD` forms some backends emit,
/// which are taken as-is.
pub fn parse_published_at(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
}
