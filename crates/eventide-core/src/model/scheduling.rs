use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::SchedulingBuilder;

/// One date pattern of an event.
///
/// Timestamps are wall-clock values. `end` being `None` marks a point in time.
/// `r_rule` is an RFC 5545 rule body without `DTSTART`; the rule is always
/// anchored to `start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheduling {
    start: NaiveDateTime,
    end: Option<NaiveDateTime>,
    is_full_day: bool,
    has_start_time: bool,
    has_end_time: bool,
    r_rule: Option<String>,
}

impl Scheduling {
    /// Creates a scheduling from all of its parts.
    #[must_use]
    pub fn new(
        start: NaiveDateTime,
        end: Option<NaiveDateTime>,
        is_full_day: bool,
        has_start_time: bool,
        has_end_time: bool,
        r_rule: Option<String>,
    ) -> Self {
        Self {
            start,
            end,
            is_full_day,
            has_start_time,
            has_end_time,
            r_rule,
        }
    }

    /// Starts a builder anchored at `start` with default flags.
    pub fn builder(start: NaiveDateTime) -> SchedulingBuilder {
        SchedulingBuilder::new(start)
    }

    #[must_use]
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }

    #[must_use]
    pub fn is_full_day(&self) -> bool {
        self.is_full_day
    }

    #[must_use]
    pub fn has_start_time(&self) -> bool {
        self.has_start_time
    }

    #[must_use]
    pub fn has_end_time(&self) -> bool {
        self.has_end_time
    }

    #[must_use]
    pub fn r_rule(&self) -> Option<&str> {
        self.r_rule.as_deref()
    }

    #[must_use]
    pub fn has_r_rule(&self) -> bool {
        self.r_rule.is_some()
    }

    /// ## Summary
    /// Checks whether start and end fall on different calendar dates.
    ///
    /// Returns `None` if no end is set.
    #[must_use]
    pub fn is_multi_day(&self) -> Option<bool> {
        self.end.map(|end| end.date() != self.start.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M").expect("valid test datetime")
    }

    #[test]
    fn test_is_multi_day() {
        let same_day = Scheduling::builder(at("2024-01-01 00:00"))
            .with_end(Some(at("2024-01-01 23:00")))
            .build();
        let multi_day = Scheduling::builder(at("2024-01-01 00:00"))
            .with_end(Some(at("2024-01-03 00:00")))
            .build();
        let open_ended = Scheduling::builder(at("2024-01-01 00:00")).build();

        assert_eq!(same_day.is_multi_day(), Some(false));
        assert_eq!(multi_day.is_multi_day(), Some(true));
        assert_eq!(open_ended.is_multi_day(), None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let scheduling = Scheduling::new(
            at("2024-01-01 12:00"),
            None,
            true,
            false,
            false,
            Some("FREQ=DAILY;COUNT=2".to_string()),
        );

        let json = serde_json::to_value(&scheduling).expect("serializable");

        assert_eq!(json["isFullDay"], true);
        assert_eq!(json["hasStartTime"], false);
        assert_eq!(json["rRule"], "FREQ=DAILY;COUNT=2");
        assert!(json["end"].is_null());
    }
}
