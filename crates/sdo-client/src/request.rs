//! Request descriptor for single and batch fetches.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use sdo_common::{AiaWave, Choice, ImageParam, ImageSize, OutputFormat, TimeRange};

use crate::error::ImageApiResult;
use crate::url::UrlBuilder;

/// Everything needed to fetch one image or a series of images.
///
/// Field values are not checked on construction. Enumeration fields accept
/// raw strings and are validated when a fetch is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    pub start_time: NaiveDateTime,
    pub wavelength: Choice<AiaWave>,
    pub image_size: Choice<ImageSize>,
    pub output_format: Choice<OutputFormat>,
    /// End of a batch, exclusive
    pub end_time: Option<NaiveDateTime>,
    /// Selects the image parameter endpoint when set
    pub parameter_id: Option<Choice<ImageParam>>,
    /// Batch step in seconds, used when no limit is given
    pub step: Option<u32>,
    /// Number of intervals a batch range is split into
    pub limit: Option<u32>,
}

impl RequestDescriptor {
    pub fn new(
        start_time: NaiveDateTime,
        wavelength: impl Into<Choice<AiaWave>>,
        image_size: impl Into<Choice<ImageSize>>,
        output_format: impl Into<Choice<OutputFormat>>,
    ) -> Self {
        Self {
            start_time,
            wavelength: wavelength.into(),
            image_size: image_size.into(),
            output_format: output_format.into(),
            end_time: None,
            parameter_id: None,
            step: None,
            limit: None,
        }
    }

    pub fn with_start_time(mut self, start_time: NaiveDateTime) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn with_end_time(mut self, end_time: NaiveDateTime) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn with_wavelength(mut self, wavelength: impl Into<Choice<AiaWave>>) -> Self {
        self.wavelength = wavelength.into();
        self
    }

    pub fn with_image_size(mut self, image_size: impl Into<Choice<ImageSize>>) -> Self {
        self.image_size = image_size.into();
        self
    }

    pub fn with_output_format(mut self, output_format: impl Into<Choice<OutputFormat>>) -> Self {
        self.output_format = output_format.into();
        self
    }

    pub fn with_parameter(mut self, parameter_id: impl Into<Choice<ImageParam>>) -> Self {
        self.parameter_id = Some(parameter_id.into());
        self
    }

    pub fn with_step(mut self, step: u32) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Overwrite the fields present in `update`, keeping the others.
    pub fn set_details(&mut self, update: RequestUpdate) {
        let RequestUpdate {
            start_time,
            wavelength,
            image_size,
            output_format,
            end_time,
            parameter_id,
            step,
            limit,
        } = update;

        if let Some(v) = start_time {
            self.start_time = v;
        }
        if let Some(v) = wavelength {
            self.wavelength = v;
        }
        if let Some(v) = image_size {
            self.image_size = v;
        }
        if let Some(v) = output_format {
            self.output_format = v;
        }
        if let Some(v) = end_time {
            self.end_time = Some(v);
        }
        if let Some(v) = parameter_id {
            self.parameter_id = Some(v);
        }
        if let Some(v) = step {
            self.step = Some(v);
        }
        if let Some(v) = limit {
            self.limit = Some(v);
        }
    }

    /// Consuming form of [`RequestDescriptor::set_details`].
    pub fn apply(mut self, update: RequestUpdate) -> Self {
        self.set_details(update);
        self
    }

    /// `[start_time, end_time)` if an end time is set.
    pub fn time_range(&self) -> Option<TimeRange> {
        self.end_time.map(|end| TimeRange::new(self.start_time, end))
    }

    /// URL for the configured start time.
    pub fn url(&self, builder: &UrlBuilder) -> String {
        self.url_at(builder, &self.start_time)
    }

    /// URL for an arbitrary time, keeping every other field.
    pub fn url_at(&self, builder: &UrlBuilder, time: &NaiveDateTime) -> String {
        match &self.parameter_id {
            Some(param) => builder.param_url(&self.image_size, &self.wavelength, time, param),
            None => builder.image_url(&self.image_size, &self.wavelength, time),
        }
    }

    /// Resolve every enumeration field, failing on the first invalid one.
    ///
    /// The output format is checked first.
    pub fn validate(&self) -> ImageApiResult<ValidatedRequest> {
        let output_format = self.output_format.resolve()?;
        let (wavelength, image_size, parameter_id) = self.validate_target()?;

        Ok(ValidatedRequest {
            output_format,
            wavelength,
            image_size,
            parameter_id,
        })
    }

    /// Resolve the fields that end up in the URL.
    pub fn validate_target(&self) -> ImageApiResult<(AiaWave, ImageSize, Option<ImageParam>)> {
        let wavelength = self.wavelength.resolve()?;
        let image_size = self.image_size.resolve()?;
        let parameter_id = self
            .parameter_id
            .as_ref()
            .map(|p| p.resolve())
            .transpose()?;
        Ok((wavelength, image_size, parameter_id))
    }
}

/// Enumeration fields of a request after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub output_format: OutputFormat,
    pub wavelength: AiaWave,
    pub image_size: ImageSize,
    pub parameter_id: Option<ImageParam>,
}

/// Partial update for a [`RequestDescriptor`]; `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestUpdate {
    pub start_time: Option<NaiveDateTime>,
    pub wavelength: Option<Choice<AiaWave>>,
    pub image_size: Option<Choice<ImageSize>>,
    pub output_format: Option<Choice<OutputFormat>>,
    pub end_time: Option<NaiveDateTime>,
    pub parameter_id: Option<Choice<ImageParam>>,
    pub step: Option<u32>,
    pub limit: Option<u32>,
}

impl RequestUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_time(mut self, start_time: NaiveDateTime) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn end_time(mut self, end_time: NaiveDateTime) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn wavelength(mut self, wavelength: impl Into<Choice<AiaWave>>) -> Self {
        self.wavelength = Some(wavelength.into());
        self
    }

    pub fn image_size(mut self, image_size: impl Into<Choice<ImageSize>>) -> Self {
        self.image_size = Some(image_size.into());
        self
    }

    pub fn output_format(mut self, output_format: impl Into<Choice<OutputFormat>>) -> Self {
        self.output_format = Some(output_format.into());
        self
    }

    pub fn parameter_id(mut self, parameter_id: impl Into<Choice<ImageParam>>) -> Self {
        self.parameter_id = Some(parameter_id.into());
        self
    }

    pub fn step(mut self, step: u32) -> Self {
        self.step = Some(step);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}
