//! Error types for subtally

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
}

pub type Result<T> = std::result::Result<T, Error>;
