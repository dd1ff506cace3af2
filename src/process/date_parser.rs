use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Parse a feed timestamp into UTC. PhishTank emits RFC 3339 with an offset
/// (`2024-01-15T10:30:00+00:00`); some exports use a bare
/// `YYYY-MM-DD HH:MM:SS`, which is taken as UTC. Anything else is `None` —
/// timestamps are non-critical metadata and never fail a whole record.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_timestamp("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn parses_bare_datetime_as_utc() {
        let dt = parse_timestamp("2024-01-15 10:30:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn rejects_garbage_and_empty() {
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp("2024/01/15"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
    }

    #[test]
    fn stable_under_reapplication() {
        let once = parse_timestamp("2024-01-15T10:30:00+00:00").unwrap();
        let again = parse_timestamp(&once.to_rfc3339()).unwrap();
        assert_eq!(once, again);
    }
}
