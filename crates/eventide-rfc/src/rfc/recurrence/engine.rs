//! RRULE evaluation using the `rrule` crate.

use chrono::{NaiveDateTime, SubsecRound, TimeDelta};
use rrule::{RRule, RRuleSet, Tz, Unvalidated};

use super::{RecurrenceEngine, RecurrenceRule};
use crate::error::RfcResult;

/// [`RecurrenceEngine`] backed by the `rrule` crate.
///
/// Wall-clock seeds are handed to `rrule` in the UTC frame and results are
/// read back in that frame, so no offset is ever applied. `rrule` works in
/// whole seconds; the seed's sub-second part is re-added to every result.
/// A rule whose `UNTIL` lies before the seed yields no occurrences.
#[derive(Debug, Clone, Copy, Default)]
pub struct RRuleEngine;

/// A rule compiled by [`RRuleEngine`].
#[derive(Debug, Clone)]
pub struct RRuleRecurrence {
    rrule_set: Option<RRuleSet>,
    subsec: TimeDelta,
    unbounded: bool,
}

impl RecurrenceEngine for RRuleEngine {
    type Rule = RRuleRecurrence;

    fn compile(&self, seed: NaiveDateTime, rule: &str) -> RfcResult<RRuleRecurrence> {
        let rrule = rule.parse::<RRule<Unvalidated>>()?;
        let unbounded = rrule.get_count().is_none() && rrule.get_until().is_none();

        let whole_seconds = seed.trunc_subsecs(0);
        let dt_start = whole_seconds.and_utc().with_timezone(&Tz::UTC);

        let rrule_set = if rrule.get_until().is_some_and(|until| *until < dt_start) {
            tracing::debug!(rule, %seed, "Recurrence ends before it starts");
            None
        } else {
            Some(rrule.build(dt_start)?)
        };

        tracing::trace!(rule, %seed, unbounded, "Compiled recurrence rule");

        Ok(RRuleRecurrence {
            rrule_set,
            subsec: seed - whole_seconds,
            unbounded,
        })
    }
}

impl RecurrenceRule for RRuleRecurrence {
    fn occurrences(&self) -> Box<dyn Iterator<Item = NaiveDateTime> + '_> {
        let Some(rrule_set) = &self.rrule_set else {
            return Box::new(std::iter::empty());
        };
        let subsec = self.subsec;
        Box::new(rrule_set.into_iter().map(move |dt| dt.naive_utc() + subsec))
    }

    fn is_unbounded(&self) -> bool {
        self.unbounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RfcError;
    use chrono::TimeDelta;

    fn at(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M").expect("valid test datetime")
    }

    #[test]
    fn test_daily_recurrence() {
        let rule = RRuleEngine
            .compile(at("2026-01-01 10:00"), "FREQ=DAILY;COUNT=5")
            .expect("compiles");

        let occurrences: Vec<_> = rule.occurrences().collect();

        assert_eq!(occurrences.len(), 5);
        assert_eq!(occurrences[0], at("2026-01-01 10:00"));
        assert_eq!(occurrences[1], at("2026-01-02 10:00"));
        assert!(!rule.is_unbounded());
    }

    #[test]
    fn test_weekly_recurrence_keeps_wall_clock_time() {
        let rule = RRuleEngine
            .compile(at("2024-01-01 12:00"), "FREQ=WEEKLY;INTERVAL=1;BYDAY=MO;COUNT=3")
            .expect("compiles");

        let occurrences: Vec<_> = rule.occurrences().collect();

        assert_eq!(
            occurrences,
            vec![
                at("2024-01-01 12:00"),
                at("2024-01-08 12:00"),
                at("2024-01-15 12:00"),
            ]
        );
    }

    #[test]
    fn test_unbounded_rule_is_lazy() {
        let rule = RRuleEngine
            .compile(at("2024-01-01 09:00"), "FREQ=DAILY;INTERVAL=1")
            .expect("compiles");

        assert!(rule.is_unbounded());

        let occurrences: Vec<_> = rule.occurrences().take(400).collect();
        assert_eq!(occurrences.len(), 400);
        assert!(
            occurrences
                .windows(2)
                .all(|pair| pair[1] - pair[0] == TimeDelta::days(1))
        );
    }

    #[test_log::test]
    fn test_until_bounds_rule() {
        let rule = RRuleEngine
            .compile(at("2024-01-01 09:00"), "FREQ=DAILY;UNTIL=20240105T000000Z")
            .expect("compiles");

        assert!(!rule.is_unbounded());
        assert_eq!(rule.occurrences().count(), 4);
    }

    #[test]
    fn test_sub_second_seed_keeps_first_occurrence() {
        let seed = at("2024-01-01 12:00") + TimeDelta::milliseconds(500);
        let rule = RRuleEngine
            .compile(seed, "FREQ=DAILY;COUNT=2")
            .expect("compiles");

        let occurrences: Vec<_> = rule.occurrences().collect();

        assert_eq!(occurrences, vec![seed, seed + TimeDelta::days(1)]);
    }

    #[test]
    fn test_until_before_seed_yields_nothing() {
        let rule = RRuleEngine
            .compile(at("2024-01-10 09:00"), "FREQ=DAILY;UNTIL=20240105T000000Z")
            .expect("compiles");

        assert!(!rule.is_unbounded());
        assert_eq!(rule.occurrences().count(), 0);
    }

    #[test]
    fn test_malformed_rule_fails_at_compile() {
        let err = RRuleEngine
            .compile(at("2024-01-01 09:00"), "FREQ=SOMETIMES")
            .expect_err("invalid frequency");

        assert!(matches!(err, RfcError::RRule(_)));
    }
}
