//! Decoded image results and their numeric array form.

use image::{DynamicImage, ImageBuffer};
use serde::{Deserialize, Serialize};

use sdo_common::OutputFormat;

use crate::error::{ImageApiError, ImageApiResult};

/// Height x width x channel array of 8-bit samples in row-major order.
///
/// Conversion from and to 8-bit L, LA, RGB and RGBA images is lossless.
/// Images with wider samples are reduced to 8-bit RGB or RGBA first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelArray {
    shape: [usize; 3],
    values: Vec<u8>,
}

impl PixelArray {
    /// Names of the axes in `shape` order.
    pub const AXIS_NAMES: [&'static str; 3] = ["y", "x", "channel"];

    pub fn new(values: Vec<u8>, shape: [usize; 3]) -> ImageApiResult<Self> {
        let expected = shape
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
            .ok_or_else(|| {
                ImageApiError::ArrayShape(format!("shape {:?} overflows usize", shape))
            })?;
        if values.len() != expected {
            return Err(ImageApiError::ArrayShape(format!(
                "shape {:?} needs {} values, got {}",
                shape,
                expected,
                values.len()
            )));
        }
        Ok(Self { shape, values })
    }

    pub fn from_image(image: &DynamicImage) -> Self {
        let height = image.height() as usize;
        let width = image.width() as usize;

        let (channels, values) = match image {
            DynamicImage::ImageLuma8(buf) => (1, buf.as_raw().clone()),
            DynamicImage::ImageLumaA8(buf) => (2, buf.as_raw().clone()),
            DynamicImage::ImageRgb8(buf) => (3, buf.as_raw().clone()),
            DynamicImage::ImageRgba8(buf) => (4, buf.as_raw().clone()),
            other if other.color().has_alpha() => (4, other.to_rgba8().into_raw()),
            other => (3, other.to_rgb8().into_raw()),
        };

        Self {
            shape: [height, width, channels],
            values,
        }
    }

    /// Rebuild an image from the array; 1 to 4 channels are supported.
    pub fn to_image(&self) -> ImageApiResult<DynamicImage> {
        let [height, width, channels] = self.shape;
        let too_large =
            || ImageApiError::ArrayShape(format!("shape {:?} exceeds image limits", self.shape));
        let width = u32::try_from(width).map_err(|_| too_large())?;
        let height = u32::try_from(height).map_err(|_| too_large())?;
        let values = self.values.clone();

        let image = match channels {
            1 => ImageBuffer::from_raw(width, height, values).map(DynamicImage::ImageLuma8),
            2 => ImageBuffer::from_raw(width, height, values).map(DynamicImage::ImageLumaA8),
            3 => ImageBuffer::from_raw(width, height, values).map(DynamicImage::ImageRgb8),
            4 => ImageBuffer::from_raw(width, height, values).map(DynamicImage::ImageRgba8),
            n => {
                return Err(ImageApiError::ArrayShape(format!(
                    "{} channels cannot be turned into an image",
                    n
                )))
            }
        };

        image.ok_or_else(|| {
            ImageApiError::ArrayShape(format!("buffer does not match shape {:?}", self.shape))
        })
    }

    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    pub fn height(&self) -> usize {
        self.shape[0]
    }

    pub fn width(&self) -> usize {
        self.shape[1]
    }

    pub fn channels(&self) -> usize {
        self.shape[2]
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn into_values(self) -> Vec<u8> {
        self.values
    }

    /// Sample at row `y`, column `x`, channel `c`.
    pub fn get(&self, y: usize, x: usize, c: usize) -> Option<u8> {
        let [height, width, channels] = self.shape;
        if y >= height || x >= width || c >= channels {
            return None;
        }
        self.values.get((y * width + x) * channels + c).copied()
    }
}

impl From<&DynamicImage> for PixelArray {
    fn from(image: &DynamicImage) -> Self {
        PixelArray::from_image(image)
    }
}

/// Result of a single fetch, shaped by the requested output format.
#[derive(Debug, Clone)]
pub enum ImageOutput {
    Image(DynamicImage),
    Array(PixelArray),
}

impl ImageOutput {
    /// Wrap a decoded image according to `format`.
    pub fn from_image(image: DynamicImage, format: OutputFormat) -> ImageApiResult<Self> {
        match format {
            OutputFormat::Image => Ok(ImageOutput::Image(image)),
            OutputFormat::Array => Ok(ImageOutput::Array(PixelArray::from_image(&image))),
            OutputFormat::Xml => Err(ImageApiError::Unimplemented("xml")),
        }
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            ImageOutput::Image(image) => (image.width(), image.height()),
            ImageOutput::Array(array) => (array.width() as u32, array.height() as u32),
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            ImageOutput::Image(image) => image.color().channel_count() as usize,
            ImageOutput::Array(array) => array.channels(),
        }
    }

    pub fn format(&self) -> OutputFormat {
        match self {
            ImageOutput::Image(_) => OutputFormat::Image,
            ImageOutput::Array(_) => OutputFormat::Array,
        }
    }

    pub fn as_image(&self) -> Option<&DynamicImage> {
        match self {
            ImageOutput::Image(image) => Some(image),
            ImageOutput::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&PixelArray> {
        match self {
            ImageOutput::Array(array) => Some(array),
            ImageOutput::Image(_) => None,
        }
    }

    pub fn into_array(self) -> PixelArray {
        match self {
            ImageOutput::Image(image) => PixelArray::from_image(&image),
            ImageOutput::Array(array) => array,
        }
    }

    pub fn into_image(self) -> ImageApiResult<DynamicImage> {
        match self {
            ImageOutput::Image(image) => Ok(image),
            ImageOutput::Array(array) => array.to_image(),
        }
    }
}
