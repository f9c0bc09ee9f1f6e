//! Translation of CMS repetition descriptors into RRULE bodies.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::RfcError;

/// Kind of repetition as stored by the CMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Daily,
    Weekly,
    MonthlyByDay,
    MonthlyByOccurrence,
    YearlyByMonth,
    YearlyByOccurrence,
}

impl PatternKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::MonthlyByDay => "monthlyByDay",
            Self::MonthlyByOccurrence => "monthlyByOccurrence",
            Self::YearlyByMonth => "yearlyByMonth",
            Self::YearlyByOccurrence => "yearlyByOccurrence",
        }
    }

    /// The RRULE `FREQ` value for this kind.
    #[must_use]
    pub const fn frequency(self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::MonthlyByDay | Self::MonthlyByOccurrence => "MONTHLY",
            Self::YearlyByMonth | Self::YearlyByOccurrence => "YEARLY",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternKind {
    type Err = RfcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthlyByDay" => Ok(Self::MonthlyByDay),
            "monthlyByOccurrence" => Ok(Self::MonthlyByOccurrence),
            "yearlyByMonth" => Ok(Self::YearlyByMonth),
            "yearlyByOccurrence" => Ok(Self::YearlyByOccurrence),
            other => Err(RfcError::InvalidPattern(format!(
                "unknown repetition type `{other}`"
            ))),
        }
    }
}

/// Repetition details attached to a [`PatternKind`].
///
/// `month` is zero-based (January = 0) as delivered by the CMS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurrencePattern {
    pub interval: Option<u32>,
    pub until: Option<NaiveDateTime>,
    pub count: Option<u32>,
    /// Comma separated lowercase day names, e.g. `mon,thu`.
    pub weekdays: Option<String>,
    /// Ordinal of the weekday within the period, e.g. `2` or `-1`.
    pub ordinal: Option<i32>,
    pub month_day: Option<i32>,
    pub month: Option<u32>,
}

impl RecurrencePattern {
    /// ## Summary
    /// Renders the RRULE body (no `DTSTART`, no `RRULE:` prefix).
    ///
    /// Parts are emitted in a fixed order: `FREQ`, `INTERVAL`, `UNTIL`,
    /// `COUNT`, `BYDAY`, `BYMONTHDAY`, `BYMONTH`. An ordinal is only applied
    /// when weekdays are present.
    #[must_use]
    pub fn to_rrule(&self, kind: PatternKind) -> String {
        let mut parts = vec![
            format!("FREQ={}", kind.frequency()),
            format!("INTERVAL={}", self.interval.unwrap_or(1)),
        ];

        if let Some(until) = self.until {
            parts.push(format!("UNTIL={}", until.format("%Y%m%dT%H%M%SZ")));
        }
        if let Some(count) = self.count {
            parts.push(format!("COUNT={count}"));
        }
        if let Some(weekdays) = self.weekdays.as_deref() {
            let by_day = weekday_codes(weekdays);
            match self.ordinal {
                Some(ordinal) => parts.push(format!("BYDAY={ordinal}{by_day}")),
                None => parts.push(format!("BYDAY={by_day}")),
            }
        }
        if let Some(month_day) = self.month_day {
            parts.push(format!("BYMONTHDAY={month_day}"));
        }
        if let Some(month) = self.month {
            parts.push(format!("BYMONTH={}", month + 1));
        }

        parts.join(";")
    }
}

/// Maps `sun`..`sat` tokens to their two-letter RFC 5545 codes.
///
/// Unknown tokens pass through unchanged.
fn weekday_codes(weekdays: &str) -> String {
    weekdays
        .split(',')
        .map(|token| match token.trim() {
            "sun" => "SU",
            "mon" => "MO",
            "tue" => "TU",
            "wed" => "WE",
            "thu" => "TH",
            "fri" => "FR",
            "sat" => "SA",
            other => other,
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in [
            PatternKind::Daily,
            PatternKind::Weekly,
            PatternKind::MonthlyByDay,
            PatternKind::MonthlyByOccurrence,
            PatternKind::YearlyByMonth,
            PatternKind::YearlyByOccurrence,
        ] {
            assert_eq!(kind.as_str().parse::<PatternKind>().ok(), Some(kind));
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = "hourly".parse::<PatternKind>().expect_err("not a CMS kind");
        assert!(matches!(err, RfcError::InvalidPattern(_)));
    }

    #[test]
    fn test_minimal_rule_defaults_interval() {
        let rule = RecurrencePattern::default().to_rrule(PatternKind::Daily);
        assert_eq!(rule, "FREQ=DAILY;INTERVAL=1");
    }

    #[test]
    fn test_weekly_with_days_and_count() {
        let pattern = RecurrencePattern {
            interval: Some(2),
            count: Some(10),
            weekdays: Some("mon,thu".to_string()),
            ..RecurrencePattern::default()
        };

        assert_eq!(
            pattern.to_rrule(PatternKind::Weekly),
            "FREQ=WEEKLY;INTERVAL=2;COUNT=10;BYDAY=MO,TH"
        );
    }

    #[test]
    fn test_monthly_by_occurrence_prefixes_ordinal() {
        let pattern = RecurrencePattern {
            weekdays: Some("fri".to_string()),
            ordinal: Some(-1),
            ..RecurrencePattern::default()
        };

        assert_eq!(
            pattern.to_rrule(PatternKind::MonthlyByOccurrence),
            "FREQ=MONTHLY;INTERVAL=1;BYDAY=-1FR"
        );
    }

    #[test]
    fn test_ordinal_without_weekdays_is_dropped() {
        let pattern = RecurrencePattern {
            ordinal: Some(3),
            month_day: Some(15),
            ..RecurrencePattern::default()
        };

        assert_eq!(
            pattern.to_rrule(PatternKind::MonthlyByDay),
            "FREQ=MONTHLY;INTERVAL=1;BYMONTHDAY=15"
        );
    }

    #[test]
    fn test_yearly_month_is_one_based_and_until_formatted() {
        let until = NaiveDateTime::parse_from_str("2030-12-24 18:30", "%Y-%m-%d %H:%M")
            .expect("valid test datetime");
        let pattern = RecurrencePattern {
            until: Some(until),
            month_day: Some(24),
            month: Some(11),
            ..RecurrencePattern::default()
        };

        assert_eq!(
            pattern.to_rrule(PatternKind::YearlyByMonth),
            "FREQ=YEARLY;INTERVAL=1;UNTIL=20301224T183000Z;BYMONTHDAY=24;BYMONTH=12"
        );
    }
}
