//! RFC 5545 pieces used by the scheduling engine.

pub mod error;
pub mod rfc;
