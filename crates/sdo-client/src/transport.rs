//! HTTP transport seam.
//!
//! [`ImageClient`](crate::ImageClient) only needs "GET this URL and hand me
//! the body", which keeps the network swappable in tests.

use bytes::Bytes;
use reqwest::blocking::Client;
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::{ImageApiError, ImageApiResult};

/// Performs one blocking GET and returns the full response body.
pub trait Transport {
    fn get(&self, url: &str) -> ImageApiResult<Bytes>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> ImageApiResult<Bytes> {
        (**self).get(url)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, url: &str) -> ImageApiResult<Bytes> {
        (**self).get(url)
    }
}

/// `reqwest` blocking transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> ImageApiResult<Self> {
        let mut builder = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str());
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| ImageApiError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self), fields(url = %url))]
    fn get(&self, url: &str) -> ImageApiResult<Bytes> {
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageApiError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes()?;
        debug!(bytes = body.len(), status = status.as_u16(), "Received response body");
        Ok(body)
    }
}
