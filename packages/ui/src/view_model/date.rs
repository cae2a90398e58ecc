//! Timestamp formatting for server-provided ISO-8601 strings.
//!
//! Unparsable input is shown verbatim rather than hidden.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

fn parse(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn format_date(raw: &str) -> String {
    parse(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn format_time(raw: &str) -> String {
    parse(raw)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_default()
}

pub fn format_date_time(raw: &str) -> String {
    parse(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats() {
        assert_eq!(format_date("2024-05-01T10:30:00"), "2024-05-01");
        assert_eq!(format_date("2024-05-01T10:30:00.123456"), "2024-05-01");
        assert_eq!(format_date_time("2024-05-01T10:30:00+02:00"), "2024-05-01 10:30");
        assert_eq!(format_time("2024-05-01 08:05:00"), "08:05");
        assert_eq!(format_date("1990-01-01"), "1990-01-01");
    }

    #[test]
    fn test_unparsable_is_verbatim() {
        assert_eq!(format_date("yesterday"), "yesterday");
        assert_eq!(format_time("yesterday"), "");
    }
}
