//! Error types for strict forecast parsing.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForecastError {
    #[error("Invalid date token: {0}")]
    InvalidDateToken(String),

    #[error("Unknown month abbreviation in date token: {0}")]
    UnknownMonth(String),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
