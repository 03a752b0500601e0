//! Common types shared by the SDO image client and its tools.

pub mod choice;
pub mod constants;
pub mod error;
pub mod time;
pub mod urls;

pub use choice::Choice;
pub use constants::{attribute_values, AiaWave, Enumerated, ImageParam, ImageSize, OutputFormat};
pub use error::{InvalidValueError, TimeParseError};
pub use time::{format_time, parse_time, TimeRange, TIME_FORMAT};
pub use urls::{UrlTemplate, AIA_IMAGE_JPEG_PATH, AIA_IMAGEPARAM_JPEG_PATH, DEFAULT_BASE_URL};
