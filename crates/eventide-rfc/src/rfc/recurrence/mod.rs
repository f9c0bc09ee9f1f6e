//! Recurrence rule evaluation (RFC 5545 §3.3.10).
//!
//! The scheduling engine only needs two things from a rule: the ordered
//! stream of start timestamps it produces from a seed, and whether that
//! stream ever ends. [`RecurrenceEngine`] and [`RecurrenceRule`] capture
//! exactly that, and [`RRuleEngine`] backs them with the `rrule` crate.

mod engine;
mod pattern;

use chrono::NaiveDateTime;

use crate::error::RfcResult;

pub use engine::{RRuleEngine, RRuleRecurrence};
pub use pattern::{PatternKind, RecurrencePattern};

/// Compiles rule strings anchored at a seed timestamp.
pub trait RecurrenceEngine {
    type Rule: RecurrenceRule;

    /// ## Summary
    /// Compiles `rule` (a rule body without `DTSTART`) anchored at `seed`.
    ///
    /// ## Errors
    /// Returns an error if the rule cannot be parsed or validated.
    fn compile(&self, seed: NaiveDateTime, rule: &str) -> RfcResult<Self::Rule>;
}

/// A compiled recurrence rule.
pub trait RecurrenceRule {
    /// Lazily yields occurrence start timestamps in ascending order.
    ///
    /// The sequence may be infinite.
    fn occurrences(&self) -> Box<dyn Iterator<Item = NaiveDateTime> + '_>;

    /// Returns `true` if the rule has neither `COUNT` nor `UNTIL`.
    fn is_unbounded(&self) -> bool;
}
