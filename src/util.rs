//! Shared utility functions for the hireboard crate.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};

/// Africa/Luanda is UTC+1 year-round.
const LUANDA_OFFSET_SECS: i32 = 3600;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

fn luanda() -> FixedOffset {
    FixedOffset::east_opt(LUANDA_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Parse a stored timestamp. Values without an offset are taken as UTC;
/// bare dates are midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Render a stored timestamp as `DD/MM/YYYY (HH:MM)` in Luanda time.
///
/// Absent values render empty; unparseable values are returned verbatim.
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return String::new();
    };
    match parse_timestamp(raw) {
        Some(dt) => dt
            .with_timezone(&luanda())
            .format("%d/%m/%Y (%H:%M)")
            .to_string(),
        None => raw.to_string(),
    }
}

/// Today's date in Luanda time.
pub fn today_in_luanda() -> NaiveDate {
    Utc::now().with_timezone(&luanda()).date_naive()
}
