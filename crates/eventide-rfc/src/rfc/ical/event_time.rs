use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use eventide_core::model::{Scheduling, end_of_day, start_of_day};

const DATE_FORMAT: &str = "%Y%m%d";
const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Calendar representation of one occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTime {
    /// A whole single day.
    SingleDay(NaiveDate),
    /// Whole days from `start` through `end`, both inclusive.
    MultiDay { start: NaiveDate, end: NaiveDate },
    /// A timed span.
    TimeSpan {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl EventTime {
    /// ## Summary
    /// Maps an occurrence onto its calendar representation.
    ///
    /// Full-day schedulings become day values. Timed schedulings without a
    /// start time begin at midnight; a missing end falls back to the start and
    /// a missing end time stretches the end to the end of its day.
    #[must_use]
    pub fn from_scheduling(scheduling: &Scheduling) -> Self {
        if scheduling.is_full_day() {
            return match (scheduling.is_multi_day(), scheduling.end()) {
                (Some(true), Some(end)) => Self::MultiDay {
                    start: scheduling.start().date(),
                    end: end.date(),
                },
                _ => Self::SingleDay(scheduling.start().date()),
            };
        }

        let start = if scheduling.has_start_time() {
            scheduling.start()
        } else {
            start_of_day(scheduling.start().date())
        };
        let end = scheduling.end().unwrap_or(scheduling.start());
        let end = if scheduling.has_end_time() {
            end
        } else {
            end_of_day(end.date())
        };

        Self::TimeSpan { start, end }
    }

    /// ## Summary
    /// Renders the `DTSTART` and `DTEND` content lines.
    ///
    /// Day forms use `VALUE=DATE` with an exclusive `DTEND`; spans use floating
    /// local date-times.
    #[must_use]
    pub fn content_lines(&self) -> Vec<String> {
        match *self {
            Self::SingleDay(day) => date_lines(day, day),
            Self::MultiDay { start, end } => date_lines(start, end),
            Self::TimeSpan { start, end } => vec![
                format!("DTSTART:{}", start.format(DATE_TIME_FORMAT)),
                format!("DTEND:{}", end.format(DATE_TIME_FORMAT)),
            ],
        }
    }
}

fn date_lines(first: NaiveDate, last: NaiveDate) -> Vec<String> {
    let exclusive_end = last + TimeDelta::days(1);
    vec![
        format!("DTSTART;VALUE=DATE:{}", first.format(DATE_FORMAT)),
        format!("DTEND;VALUE=DATE:{}", exclusive_end.format(DATE_FORMAT)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M").expect("valid test datetime")
    }

    fn day(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid test date")
    }

    #[test]
    fn test_full_day_single() {
        let scheduling = Scheduling::builder(at("2024-05-01 00:00"))
            .with_end(Some(at("2024-05-01 00:00")))
            .with_full_day(true)
            .build();

        let time = EventTime::from_scheduling(&scheduling);

        assert_eq!(time, EventTime::SingleDay(day("2024-05-01")));
        assert_eq!(
            time.content_lines(),
            vec!["DTSTART;VALUE=DATE:20240501", "DTEND;VALUE=DATE:20240502"]
        );
    }

    #[test]
    fn test_full_day_without_end_is_single_day() {
        let scheduling = Scheduling::builder(at("2024-05-01 00:00"))
            .with_full_day(true)
            .build();

        assert_eq!(
            EventTime::from_scheduling(&scheduling),
            EventTime::SingleDay(day("2024-05-01"))
        );
    }

    #[test]
    fn test_full_day_multi() {
        let scheduling = Scheduling::builder(at("2024-05-01 00:00"))
            .with_end(Some(at("2024-05-03 00:00")))
            .with_full_day(true)
            .build();

        let time = EventTime::from_scheduling(&scheduling);

        assert_eq!(
            time,
            EventTime::MultiDay {
                start: day("2024-05-01"),
                end: day("2024-05-03"),
            }
        );
        assert_eq!(
            time.content_lines(),
            vec!["DTSTART;VALUE=DATE:20240501", "DTEND;VALUE=DATE:20240504"]
        );
    }

    #[test]
    fn test_timed_span() {
        let scheduling = Scheduling::builder(at("2024-05-01 18:00"))
            .with_end(Some(at("2024-05-01 21:30")))
            .build();

        let time = EventTime::from_scheduling(&scheduling);

        assert_eq!(
            time.content_lines(),
            vec!["DTSTART:20240501T180000", "DTEND:20240501T213000"]
        );
    }

    #[test]
    fn test_missing_times_widen_span() {
        let scheduling = Scheduling::builder(at("2024-05-01 18:00"))
            .with_start_time(false)
            .with_end_time(false)
            .build();

        assert_eq!(
            EventTime::from_scheduling(&scheduling),
            EventTime::TimeSpan {
                start: at("2024-05-01 00:00"),
                end: end_of_day(day("2024-05-01")),
            }
        );
    }
}
