//! Value model and ambient plumbing shared by the eventide crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
