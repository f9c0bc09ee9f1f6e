//! Lazy expansion of a single scheduling.

use chrono::{NaiveDateTime, TimeDelta};
use eventide_core::model::{Scheduling, SchedulingBuilder, end_of_day, start_of_day};
use eventide_rfc::rfc::recurrence::RecurrenceRule;

use super::OccurrenceQuery;

/// Prepared expansion of one scheduling.
///
/// Holds the compiled recurrence rule; iterate it by reference to pull
/// occurrences. Every yielded [`Scheduling`] has no recurrence rule.
#[derive(Debug, Clone)]
pub struct Occurrences<R> {
    scheduling: Scheduling,
    rule: Option<R>,
    query: OccurrenceQuery,
    days_span: i64,
}

impl<R: RecurrenceRule> Occurrences<R> {
    pub(crate) fn new(scheduling: Scheduling, rule: Option<R>, query: OccurrenceQuery) -> Self {
        let days_span = days_spanned(&scheduling);
        Self {
            scheduling,
            rule,
            query,
            days_span,
        }
    }

    /// The scheduling being expanded.
    #[must_use]
    pub fn scheduling(&self) -> &Scheduling {
        &self.scheduling
    }

    #[must_use]
    pub fn query(&self) -> &OccurrenceQuery {
        &self.query
    }

    /// Returns whether the underlying rule never terminates on its own.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.rule.as_ref().is_some_and(RecurrenceRule::is_unbounded)
    }

    /// Starts a fresh pass over the occurrences.
    #[must_use]
    pub fn iter(&self) -> OccurrenceIter<'_> {
        let candidates: Box<dyn Iterator<Item = NaiveDateTime> + '_> = match &self.rule {
            Some(rule) => rule.occurrences(),
            None => Box::new(std::iter::once(self.scheduling.start())),
        };

        OccurrenceIter {
            template: &self.scheduling,
            candidates,
            query: self.query,
            days_span: self.days_span,
            split: None,
            emitted: 0,
            finished: false,
        }
    }
}

impl<'a, R: RecurrenceRule> IntoIterator for &'a Occurrences<R> {
    type Item = Scheduling;
    type IntoIter = OccurrenceIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the occurrences of one scheduling.
pub struct OccurrenceIter<'a> {
    template: &'a Scheduling,
    candidates: Box<dyn Iterator<Item = NaiveDateTime> + 'a>,
    query: OccurrenceQuery,
    days_span: i64,
    split: Option<MultidaySplit>,
    emitted: usize,
    finished: bool,
}

impl OccurrenceIter<'_> {
    fn produce(&mut self) -> Option<Scheduling> {
        loop {
            if let Some(split) = self.split.as_mut() {
                match split.next_slice(self.query.to) {
                    SliceStep::Slice(slice) => return Some(slice),
                    SliceStep::OutOfRange => {
                        tracing::trace!("Day slice starts after window end, stopping");
                        return None;
                    }
                    SliceStep::Exhausted => self.split = None,
                }
            }

            let candidate = self.candidates.next()?;

            if self.query.from.is_some_and(|from| candidate < from) {
                continue;
            }
            if self.query.to.is_some_and(|to| candidate > to) {
                tracing::trace!(%candidate, "Candidate starts after window end, stopping");
                return None;
            }

            let occurrence = SchedulingBuilder::from_scheduling(self.template)
                .with_start(candidate, true)
                .with_r_rule(None)
                .build();

            if self.query.split_multiday_dates && self.days_span > 1 {
                self.split = Some(MultidaySplit::new(occurrence, self.days_span));
                continue;
            }

            return Some(occurrence);
        }
    }
}

impl Iterator for OccurrenceIter<'_> {
    type Item = Scheduling;

    fn next(&mut self) -> Option<Scheduling> {
        if self.finished {
            return None;
        }

        let Some(occurrence) = self.produce() else {
            self.finished = true;
            return None;
        };

        self.emitted += 1;
        if self.query.limit.is_some_and(|limit| self.emitted >= limit) {
            self.finished = true;
        }
        Some(occurrence)
    }
}

impl std::fmt::Debug for OccurrenceIter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OccurrenceIter")
            .field("template", self.template)
            .field("query", &self.query)
            .field("days_span", &self.days_span)
            .field("emitted", &self.emitted)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

enum SliceStep {
    Slice(Scheduling),
    Exhausted,
    OutOfRange,
}

/// Cuts one multi-day occurrence into per-day slices.
///
/// The first slice keeps the original start and ends at 23:59:59.999999, days
/// in between cover the whole day and are marked full-day, and the last slice
/// starts at midnight and keeps the original end.
struct MultidaySplit {
    occurrence: Scheduling,
    days_span: i64,
    day: i64,
}

impl MultidaySplit {
    fn new(occurrence: Scheduling, days_span: i64) -> Self {
        Self {
            occurrence,
            days_span,
            day: 1,
        }
    }

    fn next_slice(&mut self, to: Option<NaiveDateTime>) -> SliceStep {
        if self.day > self.days_span {
            return SliceStep::Exhausted;
        }
        let day = self.day;
        self.day += 1;

        let occurrence = &self.occurrence;
        if day == 1 {
            return SliceStep::Slice(
                SchedulingBuilder::from_scheduling(occurrence)
                    .with_end(Some(end_of_day(occurrence.start().date())))
                    .build(),
            );
        }

        if day == self.days_span {
            let Some(end) = occurrence.end() else {
                return SliceStep::Exhausted;
            };
            let start = start_of_day(end.date());
            if to.is_some_and(|to| start > to) {
                return SliceStep::OutOfRange;
            }
            return SliceStep::Slice(
                SchedulingBuilder::from_scheduling(occurrence)
                    .with_start(start, false)
                    .build(),
            );
        }

        let morning = start_of_day(occurrence.start().date() + TimeDelta::days(day - 1));
        if to.is_some_and(|to| morning > to) {
            return SliceStep::OutOfRange;
        }
        SliceStep::Slice(
            SchedulingBuilder::from_scheduling(occurrence)
                .with_start(morning, false)
                .with_end(Some(end_of_day(morning.date())))
                .with_full_day(true)
                .build(),
        )
    }
}

/// Number of calendar days touched by a scheduling, at least 1.
fn days_spanned(scheduling: &Scheduling) -> i64 {
    scheduling.end().map_or(1, |end| {
        let midnights =
            (end_of_day(end.date()) - start_of_day(scheduling.start().date())).num_days();
        midnights.max(0) + 1
    })
}
