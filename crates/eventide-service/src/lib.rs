//! Occurrence generation for event schedulings.

pub mod error;
pub mod scheduling;
