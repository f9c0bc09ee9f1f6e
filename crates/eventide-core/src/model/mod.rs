//! Scheduling value model.
//!
//! A [`Scheduling`] is one date pattern of an event: start, optional end,
//! day-granularity flags and an optional RFC 5545 recurrence rule. Values are
//! never mutated after construction; derived copies go through
//! [`SchedulingBuilder`].

mod builder;
mod day;
mod scheduling;
mod set;

pub use builder::SchedulingBuilder;
pub use day::{end_of_day, start_of_day};
pub use scheduling::Scheduling;
pub use set::SchedulingSet;
