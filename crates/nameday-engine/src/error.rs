//! Error types for nameday-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamedayError {
    #[error("Invalid identity code format: {0}")]
    InvalidFormat(String),

    #[error("Invalid birth date in identity code: {0}")]
    InvalidDate(String),

    #[error("Checksum mismatch in identity code: {0}")]
    ChecksumMismatch(String),

    #[error("Invalid nameday entry: {0}")]
    InvalidEntry(String),

    #[error("Invalid person record: {0}")]
    InvalidPerson(String),
}

pub type Result<T> = std::result::Result<T, NamedayError>;
