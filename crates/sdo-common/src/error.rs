//! Error types for value validation and time parsing.

use thiserror::Error;

/// A value that is not a member of the enumeration it was checked against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{kind}' has no attribute value '{value}'.")]
pub struct InvalidValueError {
    /// Name of the enumeration, e.g. `OUTPUT_FMT`
    pub kind: &'static str,
    /// The offending value as given by the caller
    pub value: String,
}

impl InvalidValueError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),
}
