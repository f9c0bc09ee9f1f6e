use thiserror::Error;

/// RFC parsing and validation errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("RRule error: {0}")]
    RRule(#[from] rrule::RRuleError),

    #[error("Invalid recurrence pattern: {0}")]
    InvalidPattern(String),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
