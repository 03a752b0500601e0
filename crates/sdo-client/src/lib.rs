//! Blocking client for the SDO/AIA image API.
//!
//! Requests are described by a [`RequestDescriptor`], turned into URLs by a
//! [`UrlBuilder`] and fetched through a [`Transport`]. Results come back as
//! decoded images or as height x width x channel [`PixelArray`]s, either one
//! at a time ([`ImageClient::get`]) or as a time series
//! ([`ImageClient::get_batch`]).

pub mod batch;
pub mod client;
pub mod config;
pub mod error;
pub mod pixels;
pub mod request;
pub mod transport;
pub mod url;

pub use batch::{BatchPlan, BatchResult};
pub use client::ImageClient;
pub use config::ClientConfig;
pub use error::{ImageApiError, ImageApiResult};
pub use pixels::{ImageOutput, PixelArray};
pub use request::{RequestDescriptor, RequestUpdate};
pub use transport::{HttpTransport, Transport};
pub use url::UrlBuilder;

pub use sdo_common::{AiaWave, Choice, Enumerated, ImageParam, ImageSize, OutputFormat};
