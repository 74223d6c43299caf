// Interval module
// Half-open time spans and the overlap predicate every conflict check uses

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime};

use crate::utils::date;

/// A reservation time span `[start, end)` in local time.
///
/// Construction guarantees `start < end`; fields are private so the invariant
/// cannot be broken afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    start: DateTime<Local>,
    end: DateTime<Local>,
}

impl TimeInterval {
    /// Create an interval from two instants
    ///
    /// # Examples
    /// ```
    /// use equipment_booking::models::interval::TimeInterval;
    /// use chrono::{Duration, Local};
    ///
    /// let start = Local::now();
    /// let interval = TimeInterval::new(start, start + Duration::minutes(30)).unwrap();
    /// assert_eq!(interval.duration_minutes(), 30);
    /// ```
    pub fn new(start: DateTime<Local>, end: DateTime<Local>) -> Result<Self, String> {
        if end <= start {
            return Err("Interval end time must be after start time".to_string());
        }

        Ok(Self { start, end })
    }

    /// Create an interval of `minutes` length beginning at `start`
    pub fn starting_at(start: DateTime<Local>, minutes: i64) -> Result<Self, String> {
        if minutes <= 0 {
            return Err("Interval duration must be greater than 0 minutes".to_string());
        }

        Self::new(start, start + Duration::minutes(minutes))
    }

    /// Create an interval from a calendar date and wall-clock start time
    pub fn from_local(date: NaiveDate, time: NaiveTime, minutes: i64) -> Result<Self, String> {
        let start = date::local_datetime(date, time).ok_or_else(|| {
            format!("{} {} does not exist in the local time zone", date, time.format("%H:%M"))
        })?;

        Self::starting_at(start, minutes)
    }

    pub fn start(&self) -> DateTime<Local> {
        self.start
    }

    pub fn end(&self) -> DateTime<Local> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Whether this interval shares any instant with `other`.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        overlaps(self, other)
    }

    pub fn starts_before(&self, instant: DateTime<Local>) -> bool {
        self.start < instant
    }
}

/// Half-open overlap: intervals that only touch at an endpoint do not overlap.
pub fn overlaps(a: &TimeInterval, b: &TimeInterval) -> bool {
    a.start < b.end && b.start < a.end
}
