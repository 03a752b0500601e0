//! JSON summary lines for fetched images.

use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;

use sdo_client::ImageOutput;
use sdo_common::format_time;

#[derive(Debug, Serialize)]
pub struct ImageSummary {
    pub time: String,
    pub format: String,
    pub width: u32,
    pub height: u32,
    pub channels: usize,
    /// Mean sample value over all channels
    pub mean: f64,
}

impl ImageSummary {
    pub fn new(time: &NaiveDateTime, image: &ImageOutput) -> Self {
        Self::from_key(&format_time(time), image)
    }

    pub fn from_key(key: &str, image: &ImageOutput) -> Self {
        let (width, height) = image.dimensions();
        let mean = match image {
            ImageOutput::Array(array) => mean(array.values()),
            ImageOutput::Image(img) => mean(img.as_bytes()),
        };

        Self {
            time: key.to_string(),
            format: image.format().to_string(),
            width,
            height,
            channels: image.channels(),
            mean,
        }
    }
}

fn mean(values: &[u8]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

pub fn print(summary: &ImageSummary) -> Result<()> {
    println!("{}", serde_json::to_string(summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdo_client::PixelArray;

    #[test]
    fn test_summary_of_array() {
        let array = PixelArray::new(vec![0, 10, 20, 30], [2, 2, 1]).unwrap();
        let summary = ImageSummary::from_key("2021-01-01T00:00:00", &ImageOutput::Array(array));

        assert_eq!(summary.width, 2);
        assert_eq!(summary.channels, 1);
        assert_eq!(summary.format, "array");
        assert!((summary.mean - 15.0).abs() < 1e-9);
    }
}
