//! Single and batch image retrieval.

use chrono::NaiveDateTime;
use image::DynamicImage;
use tracing::{debug, info, instrument};

use sdo_common::OutputFormat;

use crate::batch::{BatchPlan, BatchResult};
use crate::config::ClientConfig;
use crate::error::{ImageApiError, ImageApiResult};
use crate::pixels::ImageOutput;
use crate::request::RequestDescriptor;
use crate::transport::{HttpTransport, Transport};
use crate::url::UrlBuilder;

/// Fetches images described by a [`RequestDescriptor`].
///
/// Every fetch is one sequential, blocking GET. Nothing is retried: the first
/// transport or decode failure is returned to the caller as is.
#[derive(Debug, Clone)]
pub struct ImageClient<T = HttpTransport> {
    transport: T,
    urls: UrlBuilder,
}

impl ImageClient<HttpTransport> {
    pub fn new(config: &ClientConfig) -> ImageApiResult<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(transport, UrlBuilder::new(config.base_url.as_str())))
    }

    /// Client configured from `SDO_API_*` environment variables.
    pub fn from_env() -> ImageApiResult<Self> {
        Self::new(&ClientConfig::from_env())
    }
}

impl<T: Transport> ImageClient<T> {
    pub fn with_transport(transport: T, urls: UrlBuilder) -> Self {
        Self { transport, urls }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn url_builder(&self) -> &UrlBuilder {
        &self.urls
    }

    /// URL of the request at its start time.
    pub fn url(&self, request: &RequestDescriptor) -> String {
        request.url(&self.urls)
    }

    /// Fetch one image at the request's start time.
    ///
    /// Invalid enumeration values and the unsupported `xml` format are
    /// rejected before any request is sent.
    pub fn get(&self, request: &RequestDescriptor) -> ImageApiResult<ImageOutput> {
        self.get_at(request, &request.start_time)
    }

    /// Fetch one image at `time`, ignoring the request's own start time.
    #[instrument(skip(self, request), fields(time = %time))]
    pub fn get_at(
        &self,
        request: &RequestDescriptor,
        time: &NaiveDateTime,
    ) -> ImageApiResult<ImageOutput> {
        let output_format = supported_format(request)?;
        let image = self.fetch(&request.url_at(&self.urls, time))?;
        ImageOutput::from_image(image, output_format)
    }

    /// Fetch and decode one image, whatever the requested output format.
    pub fn get_image(&self, request: &RequestDescriptor) -> ImageApiResult<DynamicImage> {
        request.validate_target()?;
        self.fetch(&self.url(request))
    }

    /// Fetch one image per planned timestamp in `[start_time, end_time)`.
    ///
    /// The first failing item aborts the batch; no partial result is
    /// returned.
    #[instrument(skip(self, request), fields(start = %request.start_time))]
    pub fn get_batch(&self, request: &RequestDescriptor) -> ImageApiResult<BatchResult> {
        let output_format = supported_format(request)?;
        let plan = BatchPlan::from_request(request)?;

        info!(
            items = plan.len(),
            step_secs = plan.step_seconds(),
            format = %output_format,
            "Starting batch fetch"
        );

        let mut result = BatchResult::new();
        for time in plan.timestamps() {
            let image = self.fetch(&request.url_at(&self.urls, &time))?;
            result.insert(&time, ImageOutput::Image(image));
        }

        if output_format == OutputFormat::Array {
            result = result.into_arrays();
        }

        info!(items = result.len(), "Batch fetch completed");
        Ok(result)
    }

    fn fetch(&self, url: &str) -> ImageApiResult<DynamicImage> {
        debug!(url = %url, "Fetching image");
        let body = self.transport.get(url)?;
        let image = image::load_from_memory(&body)?;
        debug!(
            width = image.width(),
            height = image.height(),
            color = ?image.color(),
            "Decoded image"
        );
        Ok(image)
    }
}

/// Validate the request and return its output format, rejecting `xml`.
fn supported_format(request: &RequestDescriptor) -> ImageApiResult<OutputFormat> {
    let validated = request.validate()?;
    if validated.output_format == OutputFormat::Xml {
        return Err(ImageApiError::Unimplemented("xml"));
    }
    Ok(validated.output_format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use chrono::NaiveDate;
    use sdo_common::{AiaWave, ImageSize};
    use std::cell::RefCell;

    /// Records requested URLs and answers with a fixed body.
    struct Recorder {
        body: Bytes,
        urls: RefCell<Vec<String>>,
    }

    impl Transport for Recorder {
        fn get(&self, url: &str) -> ImageApiResult<Bytes> {
            self.urls.borrow_mut().push(url.to_string());
            Ok(self.body.clone())
        }
    }

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn recorder() -> Recorder {
        Recorder {
            body: Bytes::from(test_utils::png_bytes(4, 3)),
            urls: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn test_batch_fetches_each_timestamp() {
        let transport = recorder();
        let client = ImageClient::with_transport(&transport, UrlBuilder::new("http://api"));
        let request =
            RequestDescriptor::new(start(), AiaWave::A171, ImageSize::Size256, OutputFormat::Image)
                .with_end_time(start() + chrono::Duration::minutes(30))
                .with_limit(2);

        client.get_batch(&request).unwrap();

        let urls = transport.urls.borrow();
        assert_eq!(
            *urls,
            vec![
                "http://api/images/SDO/AIA/256/171/?starttime=2021-01-01T00:00:00",
                "http://api/images/SDO/AIA/256/171/?starttime=2021-01-01T00:15:00",
            ]
        );
    }

    #[test]
    fn test_parameter_request_uses_param_endpoint() {
        let transport = recorder();
        let client = ImageClient::with_transport(&transport, UrlBuilder::new("http://api"));
        let request = RequestDescriptor::new(start(), "94", "512", "array").with_parameter("1");

        let output = client.get(&request).unwrap();
        assert_eq!(output.dimensions(), (4, 3));
        assert_eq!(
            transport.urls.borrow()[0],
            "http://api/images/SDO/AIA/param/512/94/1/?starttime=2021-01-01T00:00:00"
        );
    }

    #[test]
    fn test_xml_rejected_before_request() {
        let transport = recorder();
        let client = ImageClient::with_transport(&transport, UrlBuilder::default());
        let request =
            RequestDescriptor::new(start(), AiaWave::A171, ImageSize::Size512, OutputFormat::Xml);

        let err = client.get(&request).unwrap_err();
        assert!(matches!(err, ImageApiError::Unimplemented("xml")));
        assert!(transport.urls.borrow().is_empty());
    }
}
