use chrono::{NaiveDateTime, TimeDelta};
use eventide_core::config::SchedulingConfig;
use eventide_core::model::Scheduling;
use eventide_rfc::rfc::recurrence::{RRuleEngine, RecurrenceEngine, RecurrenceRule};

use super::{MergedOccurrences, OccurrenceQuery, Occurrences};
use crate::error::{ServiceError, ServiceResult};

const DEFAULT_LOOKUP_TOLERANCE_SECONDS: i64 = 60;

/// Generates, merges and looks up occurrences of schedulings.
///
/// Stateless apart from its recurrence engine; inputs are never modified.
#[derive(Debug, Clone)]
pub struct SchedulingManager<E = RRuleEngine> {
    engine: E,
    lookup_tolerance: TimeDelta,
}

impl SchedulingManager {
    /// Creates a manager backed by the `rrule` crate.
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(RRuleEngine)
    }

    /// ## Summary
    /// Creates a manager using the configured lookup tolerance.
    ///
    /// ## Errors
    /// Returns `ServiceError::CoreError` if the tolerance is not a positive
    /// number of seconds within duration range.
    pub fn from_config(config: &SchedulingConfig) -> ServiceResult<Self> {
        Ok(Self::new().with_lookup_tolerance(config.lookup_tolerance()?))
    }
}

impl Default for SchedulingManager {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: RecurrenceEngine> SchedulingManager<E> {
    #[must_use]
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            lookup_tolerance: TimeDelta::seconds(DEFAULT_LOOKUP_TOLERANCE_SECONDS),
        }
    }

    /// Sets the half-width of the window searched by the `find_*` lookups.
    ///
    /// The sign is ignored.
    #[must_use]
    pub fn with_lookup_tolerance(mut self, tolerance: TimeDelta) -> Self {
        self.lookup_tolerance = tolerance.abs();
        self
    }

    /// ## Summary
    /// Prepares the occurrences of one scheduling.
    ///
    /// Resolves the recurrence rule and, if requested, splits occurrences that
    /// span several days into one slice per day. Iterating the result is lazy,
    /// so never-ending rules are fine as long as the consumer stops pulling or
    /// the query carries `to` or `limit`.
    ///
    /// ## Errors
    /// Returns `ServiceError::InvalidArgument` if `limit` is zero and
    /// `ServiceError::RfcError` if the recurrence rule does not compile.
    pub fn generate_occurrences_of_scheduling(
        &self,
        scheduling: &Scheduling,
        query: &OccurrenceQuery,
    ) -> ServiceResult<Occurrences<E::Rule>> {
        query.validate()?;
        self.prepare(scheduling, *query)
    }

    /// ## Summary
    /// Prepares the occurrences of several schedulings as one stream in
    /// ascending start order.
    ///
    /// `limit` bounds each scheduling's own stream, not the merged total.
    ///
    /// ## Errors
    /// Returns `ServiceError::InvalidArgument` if `limit` is zero and
    /// `ServiceError::RfcError` if any recurrence rule does not compile.
    pub fn generate_occurrences_of_schedulings(
        &self,
        schedulings: &[Scheduling],
        query: &OccurrenceQuery,
    ) -> ServiceResult<MergedOccurrences<E::Rule>> {
        query.validate()?;
        let sources = schedulings
            .iter()
            .map(|scheduling| self.prepare(scheduling, *query))
            .collect::<ServiceResult<Vec<_>>>()?;
        Ok(MergedOccurrences::new(sources))
    }

    /// ## Summary
    /// Collects all occurrences of one scheduling.
    ///
    /// ## Errors
    /// Returns `ServiceError::LogicError` if neither `to` nor `limit` is set and
    /// the rule never ends, plus the errors of
    /// [`generate_occurrences_of_scheduling`](Self::generate_occurrences_of_scheduling).
    pub fn get_all_occurrences_of_scheduling(
        &self,
        scheduling: &Scheduling,
        query: &OccurrenceQuery,
    ) -> ServiceResult<Vec<Scheduling>> {
        let occurrences = self.generate_occurrences_of_scheduling(scheduling, query)?;
        if !query.is_bounded() && occurrences.is_unbounded() {
            return Err(unbounded_materialization());
        }
        Ok(occurrences.iter().collect())
    }

    /// ## Summary
    /// Collects all occurrences of several schedulings in ascending start order.
    ///
    /// ## Errors
    /// Returns `ServiceError::LogicError` if neither `to` nor `limit` is set and
    /// any rule never ends, plus the errors of
    /// [`generate_occurrences_of_schedulings`](Self::generate_occurrences_of_schedulings).
    pub fn get_all_occurrences_of_schedulings(
        &self,
        schedulings: &[Scheduling],
        query: &OccurrenceQuery,
    ) -> ServiceResult<Vec<Scheduling>> {
        let occurrences = self.generate_occurrences_of_schedulings(schedulings, query)?;
        if !query.is_bounded() && occurrences.is_unbounded() {
            return Err(unbounded_materialization());
        }
        Ok(occurrences.iter().collect())
    }

    /// ## Summary
    /// Finds the occurrence of `scheduling` starting exactly at `occurrence`.
    ///
    /// Only a small window around `occurrence` is expanded, assuming distinct
    /// occurrences are further apart than the lookup tolerance.
    ///
    /// ## Errors
    /// Returns `ServiceError::RfcError` if the recurrence rule does not compile.
    pub fn find_occurrence_of_scheduling(
        &self,
        scheduling: &Scheduling,
        occurrence: NaiveDateTime,
        split_multiday_dates: bool,
    ) -> ServiceResult<Option<Scheduling>> {
        let query = self.lookup_query(occurrence, split_multiday_dates);
        let occurrences = self.generate_occurrences_of_scheduling(scheduling, &query)?;
        Ok(occurrences
            .iter()
            .find(|candidate| same_second(candidate.start(), occurrence)))
    }

    /// ## Summary
    /// Finds the occurrence of any of `schedulings` starting exactly at
    /// `occurrence`. Earlier schedulings win on ties.
    ///
    /// ## Errors
    /// Returns `ServiceError::RfcError` if any recurrence rule does not compile.
    pub fn find_occurrence_of_schedulings(
        &self,
        schedulings: &[Scheduling],
        occurrence: NaiveDateTime,
        split_multiday_dates: bool,
    ) -> ServiceResult<Option<Scheduling>> {
        let query = self.lookup_query(occurrence, split_multiday_dates);
        let occurrences = self.generate_occurrences_of_schedulings(schedulings, &query)?;
        Ok(occurrences
            .iter()
            .find(|candidate| same_second(candidate.start(), occurrence)))
    }

    /// ## Summary
    /// Returns whether the scheduling recurs without `COUNT` or `UNTIL`.
    ///
    /// ## Errors
    /// Returns `ServiceError::RfcError` if the recurrence rule does not compile.
    pub fn is_infinite(&self, scheduling: &Scheduling) -> ServiceResult<bool> {
        Ok(self
            .compile(scheduling)?
            .as_ref()
            .is_some_and(RecurrenceRule::is_unbounded))
    }

    /// Returns whether start and end fall on different dates, `None` without end.
    #[must_use]
    #[expect(clippy::unused_self, reason = "Part of the manager's query surface")]
    pub fn is_multi_day(&self, scheduling: &Scheduling) -> Option<bool> {
        scheduling.is_multi_day()
    }

    fn prepare(
        &self,
        scheduling: &Scheduling,
        query: OccurrenceQuery,
    ) -> ServiceResult<Occurrences<E::Rule>> {
        let rule = self.compile(scheduling)?;
        Ok(Occurrences::new(scheduling.clone(), rule, query))
    }

    fn compile(&self, scheduling: &Scheduling) -> ServiceResult<Option<E::Rule>> {
        let Some(r_rule) = scheduling.r_rule() else {
            return Ok(None);
        };
        let rule = self
            .engine
            .compile(scheduling.start(), r_rule)
            .inspect_err(|err| {
                tracing::debug!(r_rule, %err, "Recurrence rule rejected");
            })?;
        Ok(Some(rule))
    }

    fn lookup_query(&self, occurrence: NaiveDateTime, split: bool) -> OccurrenceQuery {
        OccurrenceQuery::with_range(
            occurrence
                .checked_sub_signed(self.lookup_tolerance)
                .unwrap_or(NaiveDateTime::MIN),
            occurrence
                .checked_add_signed(self.lookup_tolerance)
                .unwrap_or(NaiveDateTime::MAX),
        )
        .with_split_multiday_dates(split)
        .with_limit(1)
    }
}

fn unbounded_materialization() -> ServiceError {
    tracing::debug!("Refusing to collect an unbounded recurrence");
    ServiceError::LogicError(
        "Cannot get all occurrences of an infinite recurrence rule".to_string(),
    )
}

fn same_second(left: NaiveDateTime, right: NaiveDateTime) -> bool {
    left.and_utc().timestamp() == right.and_utc().timestamp()
}
