use crate::detail::DetailError;
use crate::location::CoordinateError;
use crate::report::ReportError;
use crate::store::StoreError;
use civic_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Detail(#[from] DetailError),

    #[error(transparent)]
    Coordinate(#[from] CoordinateError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type AppResult<T> = Result<T, AppError>;
