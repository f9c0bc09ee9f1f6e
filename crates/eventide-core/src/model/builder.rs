use chrono::NaiveDateTime;

use super::Scheduling;

/// Builder for deriving [`Scheduling`] values.
///
/// Flags default to a timed, non-full-day scheduling without end or rule.
#[derive(Debug, Clone)]
#[must_use]
pub struct SchedulingBuilder {
    start: NaiveDateTime,
    end: Option<NaiveDateTime>,
    is_full_day: bool,
    has_start_time: bool,
    has_end_time: bool,
    r_rule: Option<String>,
}

impl SchedulingBuilder {
    /// Creates a builder anchored at `start`.
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            start,
            end: None,
            is_full_day: false,
            has_start_time: true,
            has_end_time: true,
            r_rule: None,
        }
    }

    /// Creates a builder pre-filled with a copy of `scheduling`.
    pub fn from_scheduling(scheduling: &Scheduling) -> Self {
        Self {
            start: scheduling.start(),
            end: scheduling.end(),
            is_full_day: scheduling.is_full_day(),
            has_start_time: scheduling.has_start_time(),
            has_end_time: scheduling.has_end_time(),
            r_rule: scheduling.r_rule().map(String::from),
        }
    }

    /// ## Summary
    /// Moves the start.
    ///
    /// With `keep_relative_end` an existing end is shifted so that the
    /// start-to-end duration is preserved. Otherwise the end stays where it is.
    pub fn with_start(mut self, start: NaiveDateTime, keep_relative_end: bool) -> Self {
        if let Some(end) = self.end.filter(|_| keep_relative_end) {
            self.end = Some(start + (end - self.start));
        }
        self.start = start;
        self
    }

    pub fn with_end(mut self, end: Option<NaiveDateTime>) -> Self {
        self.end = end;
        self
    }

    pub fn with_full_day(mut self, is_full_day: bool) -> Self {
        self.is_full_day = is_full_day;
        self
    }

    pub fn with_start_time(mut self, has_start_time: bool) -> Self {
        self.has_start_time = has_start_time;
        self
    }

    pub fn with_end_time(mut self, has_end_time: bool) -> Self {
        self.has_end_time = has_end_time;
        self
    }

    pub fn with_r_rule(mut self, r_rule: Option<String>) -> Self {
        self.r_rule = r_rule;
        self
    }

    #[must_use]
    pub fn build(self) -> Scheduling {
        Scheduling::new(
            self.start,
            self.end,
            self.is_full_day,
            self.has_start_time,
            self.has_end_time,
            self.r_rule,
        )
    }
}
