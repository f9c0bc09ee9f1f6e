//! Expansion of schedulings into concrete occurrences.
//!
//! Generation is split in two steps. Preparing (`SchedulingManager::generate_*`)
//! validates the query and compiles recurrence rules, which is where every
//! error surfaces. Iterating the prepared value is infallible and lazy, so
//! unbounded rules are fine as long as the consumer stops pulling.

mod factory;
mod manager;
mod merge;
mod occurrences;
mod query;
mod raw;

pub use factory::SchedulingFactory;
pub use manager::SchedulingManager;
pub use merge::{MergedIter, MergedOccurrences};
pub use occurrences::{OccurrenceIter, Occurrences};
pub use query::OccurrenceQuery;
pub use raw::{RawRepetition, RawScheduling};
