//! Date/Time Helpers
//!
//! Contest times travel as naive local datetimes (`<input type="datetime-local">`
//! format). Backends that answer with RFC 3339 are converted to local time.

use chrono::{DateTime, Local, NaiveDateTime};

const INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a datetime from a form field or backend payload
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Value for a `datetime-local` input
pub fn to_input_value(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M").to_string()
}

/// Value sent to the backend
pub fn to_wire(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

pub fn to_display(raw: &str) -> String {
    parse_datetime(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContestPhase {
    Upcoming,
    Running,
    Ended,
}

impl ContestPhase {
    pub fn of(start: &NaiveDateTime, end: &NaiveDateTime, now: &NaiveDateTime) -> Self {
        if now < start {
            ContestPhase::Upcoming
        } else if now < end {
            ContestPhase::Running
        } else {
            ContestPhase::Ended
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContestPhase::Upcoming => "Upcoming",
            ContestPhase::Running => "Running",
            ContestPhase::Ended => "Ended",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_formats() {
        let a = parse_datetime("2024-03-01T09:30").unwrap();
        let b = parse_datetime("2024-03-01T09:30:00").unwrap();
        let c = parse_datetime("2024-03-01 09:30:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(to_input_value(&a), "2024-03-01T09:30");
        assert_eq!(to_wire(&a), "2024-03-01T09:30:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_datetime("").is_none());
        assert!(parse_datetime("tomorrow").is_none());
        assert!(parse_datetime("2024-13-01T00:00").is_none());
    }

    #[test]
    fn test_phase() {
        let start = parse_datetime("2024-03-01T09:00").unwrap();
        let end = parse_datetime("2024-03-01T12:00").unwrap();
        let before = parse_datetime("2024-03-01T08:59").unwrap();
        let during = parse_datetime("2024-03-01T10:00").unwrap();
        assert_eq!(ContestPhase::of(&start, &end, &before), ContestPhase::Upcoming);
        assert_eq!(ContestPhase::of(&start, &end, &during), ContestPhase::Running);
        assert_eq!(ContestPhase::of(&start, &end, &end), ContestPhase::Ended);
    }
}
