// Date utility functions
// Local-time helpers shared by the interval model and the slot grid

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat};

/// Resolve a wall-clock date and time in the local time zone.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant; times that
/// do not exist (DST spring-forward gap) yield `None`.
pub fn local_datetime(date: NaiveDate, time: NaiveTime) -> Option<DateTime<Local>> {
    from_naive(date.and_time(time))
}

pub fn from_naive(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    naive.and_local_timezone(Local).earliest()
}

pub fn start_of_day(date: NaiveDate) -> Option<DateTime<Local>> {
    local_datetime(date, NaiveTime::MIN)
}

/// RFC 3339 timestamp with offset, the wire format of the reservation API.
pub fn to_iso(instant: DateTime<Local>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Parse a timestamp sent by the backend.
///
/// RFC 3339 values keep their instant; values without an offset (as entered
/// in a `datetime-local` field) are read as local wall-clock time.
pub fn parse_instant(value: &str) -> Result<DateTime<Local>, String> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Local));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .and_then(from_naive)
        .ok_or_else(|| format!("Invalid timestamp: {}", value))
}

/// Short display form used in grid headers and CLI output.
pub fn format_short(instant: DateTime<Local>) -> String {
    instant.format("%Y-%m-%d %H:%M").to_string()
}
