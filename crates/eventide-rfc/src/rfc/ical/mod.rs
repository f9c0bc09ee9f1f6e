//! iCalendar rendering of single occurrences (RFC 5545 §3.8.2).

mod event_time;

pub use event_time::EventTime;
