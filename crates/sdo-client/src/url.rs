//! Fetch URL construction.

use chrono::NaiveDateTime;

use sdo_common::{
    format_time, AiaWave, Choice, ImageParam, ImageSize, UrlTemplate, DEFAULT_BASE_URL,
};

/// Formats request values into API URLs.
///
/// Values are inserted as given, valid or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    base_url: String,
    image_template: UrlTemplate,
    param_template: UrlTemplate,
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl UrlBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            image_template: UrlTemplate::IMAGE,
            param_template: UrlTemplate::IMAGE_PARAM,
        }
    }

    /// Replace the templates, e.g. for a mirror with a different layout.
    pub fn with_templates(mut self, image: UrlTemplate, param: UrlTemplate) -> Self {
        self.image_template = image;
        self.param_template = param;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn image_url(
        &self,
        image_size: &Choice<ImageSize>,
        wavelength: &Choice<AiaWave>,
        start_time: &NaiveDateTime,
    ) -> String {
        let time = format_time(start_time);
        self.image_template.format(
            &self.base_url,
            &[image_size.as_str(), wavelength.as_str(), time.as_str()],
        )
    }

    pub fn param_url(
        &self,
        image_size: &Choice<ImageSize>,
        wavelength: &Choice<AiaWave>,
        start_time: &NaiveDateTime,
        parameter_id: &Choice<ImageParam>,
    ) -> String {
        let time = format_time(start_time);
        self.param_template.format(
            &self.base_url,
            &[image_size.as_str(), wavelength.as_str(), time.as_str(), parameter_id.as_str()],
        )
    }
}
