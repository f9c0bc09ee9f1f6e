use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    RfcError(#[from] eventide_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] eventide_core::error::CoreError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Logic error: {0}")]
    LogicError(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
