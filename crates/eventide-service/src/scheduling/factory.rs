//! Conversion of raw CMS scheduling data into [`Scheduling`] values.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;
use eventide_core::config::SchedulingConfig;
use eventide_core::model::{Scheduling, SchedulingSet};
use eventide_rfc::rfc::recurrence::{PatternKind, RecurrencePattern};
use regex::Regex;

use super::{RawRepetition, RawScheduling};
use crate::error::ServiceResult;

/// Builds schedulings from raw CMS entries.
#[derive(Debug, Clone)]
pub struct SchedulingFactory {
    timezone: Tz,
}

impl SchedulingFactory {
    /// Creates a factory reading epoch timestamps as wall-clock time in `timezone`.
    #[must_use]
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// ## Summary
    /// Creates a factory for the configured timezone.
    ///
    /// ## Errors
    /// Returns `ServiceError::CoreError` if the configured zone is unknown.
    pub fn from_config(config: &SchedulingConfig) -> ServiceResult<Self> {
        Ok(Self::new(config.timezone()?))
    }

    /// ## Summary
    /// Converts a JSON array of raw entries.
    ///
    /// Entries that are not objects or carry no integer begin date are
    /// skipped; mistyped optional fields are ignored. A value that is not an
    /// array yields an empty set.
    #[must_use]
    pub fn create_from_json(&self, raw: &serde_json::Value) -> SchedulingSet {
        let Some(entries) = raw.as_array() else {
            tracing::debug!("Raw scheduling data is not an array");
            return SchedulingSet::default();
        };

        entries
            .iter()
            .filter_map(|entry| {
                serde_json::from_value::<RawScheduling>(entry.clone())
                    .inspect_err(|err| {
                        tracing::debug!(%err, "Skipping malformed raw scheduling");
                    })
                    .ok()
            })
            .filter_map(|entry| self.create_from_raw(&entry))
            .collect()
    }

    /// Converts raw entries, skipping those without a begin date.
    #[must_use]
    pub fn create(&self, raws: &[RawScheduling]) -> SchedulingSet {
        raws.iter().filter_map(|raw| self.create_from_raw(raw)).collect()
    }

    /// ## Summary
    /// Converts a single raw entry.
    ///
    /// Returns `None` if the entry has no begin date.
    #[must_use]
    pub fn create_from_raw(&self, raw: &RawScheduling) -> Option<Scheduling> {
        let Some(start) = self.date_time(raw.begin_date, raw.begin_time.as_deref()) else {
            tracing::debug!(?raw, "Skipping raw scheduling without begin date");
            return None;
        };

        Some(
            Scheduling::builder(start)
                .with_end(self.date_time(raw.end_date, raw.end_time.as_deref()))
                .with_full_day(raw.is_full_day == Some(true))
                .with_start_time(raw.begin_time.is_some())
                .with_end_time(raw.end_time.is_some())
                .with_r_rule(self.r_rule(raw))
                .build(),
        )
    }

    fn r_rule(&self, raw: &RawScheduling) -> Option<String> {
        let kind = raw
            .kind
            .as_deref()?
            .parse::<PatternKind>()
            .inspect_err(|err| tracing::trace!(%err, "No recurrence for raw scheduling"))
            .ok()?;
        let pattern = raw
            .repetition
            .as_ref()
            .map(|repetition| self.pattern(repetition))
            .unwrap_or_default();
        Some(pattern.to_rrule(kind))
    }

    fn pattern(&self, repetition: &RawRepetition) -> RecurrencePattern {
        RecurrencePattern {
            interval: repetition.interval,
            until: repetition.date.and_then(|date| self.wall_clock(date)),
            count: repetition.count,
            weekdays: repetition.dow.clone(),
            ordinal: repetition.oom,
            month_day: repetition.dom,
            month: repetition.moy,
        }
    }

    fn date_time(&self, date: Option<i64>, time: Option<&str>) -> Option<NaiveDateTime> {
        let seconds = time.map_or(0, time_to_seconds);
        self.wall_clock(date?.checked_add(seconds)?)
    }

    fn wall_clock(&self, epoch_seconds: i64) -> Option<NaiveDateTime> {
        DateTime::from_timestamp(epoch_seconds, 0)
            .map(|utc| utc.with_timezone(&self.timezone).naive_local())
    }
}

#[expect(clippy::expect_used, reason = "Pattern is a literal")]
static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-2]?[0-9]):([0-5][0-9])$").expect("Invalid time regex")
});

/// Parses `H:MM` / `HH:MM` (hour tens digit 0-2) into seconds; anything else is 0.
fn time_to_seconds(time: &str) -> i64 {
    let Some(captures) = TIME_PATTERN.captures(time) else {
        return 0;
    };
    let number = |group: usize| {
        captures
            .get(group)
            .and_then(|digits| digits.as_str().parse::<i64>().ok())
            .unwrap_or(0)
    };

    number(1) * 3600 + number(2) * 60
}
