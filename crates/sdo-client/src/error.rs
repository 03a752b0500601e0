//! Error types for image retrieval.

use sdo_common::InvalidValueError;
use thiserror::Error;

/// Result type alias using ImageApiError.
pub type ImageApiResult<T> = Result<T, ImageApiError>;

/// Errors raised while building, fetching or decoding an image request.
///
/// Nothing is retried or translated: transport and decode failures carry the
/// underlying error unchanged.
#[derive(Debug, Error)]
pub enum ImageApiError {
    // === Request Errors ===
    #[error(transparent)]
    InvalidArgument(#[from] InvalidValueError),

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Batch limit must be greater than zero (division by zero)")]
    DivisionByZero,

    #[error("Batch step rounds to zero: {total_seconds}s range, limit or step {divisor}")]
    ZeroStep { total_seconds: i64, divisor: u32 },

    #[error("Output format not implemented: {0}")]
    Unimplemented(&'static str),

    // === Transport Errors ===
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    // === Data Errors ===
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Invalid pixel array: {0}")]
    ArrayShape(String),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ImageApiError {
    /// True for errors raised before any request is sent.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            ImageApiError::InvalidArgument(_)
                | ImageApiError::MissingParameter(_)
                | ImageApiError::DivisionByZero
                | ImageApiError::ZeroStep { .. }
                | ImageApiError::Unimplemented(_)
        )
    }
}
