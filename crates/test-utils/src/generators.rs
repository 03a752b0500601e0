//! Test data generators for creating synthetic solar images.
//!
//! These generators create predictable, verifiable pixel patterns and the
//! encoded bytes an image API would return for them.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};

/// Creates RGB pixel data for a simple gradient pattern.
///
/// Red grows along x, green along y, blue is constant.
///
/// # Arguments
///
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
///
/// A `Vec<u8>` with RGB pixel data (3 bytes per pixel), row-major.
pub fn create_test_rgb_pixels(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let r = ((x as f32 / width as f32) * 255.0) as u8;
            let g = ((y as f32 / height as f32) * 255.0) as u8;
            pixels.extend_from_slice(&[r, g, 128]);
        }
    }
    pixels
}

/// Creates a grayscale disk on a black background, like a full-disk EUV
/// image.
///
/// Pixels inside the disk are bright, with limb darkening towards the edge.
pub fn create_solar_disk(size: u32) -> GrayImage {
    let center = (size as f32 - 1.0) / 2.0;
    let radius = size as f32 * 0.4;
    GrayImage::from_fn(size, size, |x, y| {
        let dx = x as f32 - center;
        let dy = y as f32 - center;
        let r = (dx * dx + dy * dy).sqrt() / radius;
        let value = if r <= 1.0 { 255.0 * (1.0 - 0.6 * r * r) } else { 0.0 };
        image::Luma([value as u8])
    })
}

/// Encode an image as PNG.
pub fn encode_png(image: &DynamicImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .expect("PNG encoding of a test image");
    buf.into_inner()
}

/// PNG bytes of an RGB gradient of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let pixels = create_test_rgb_pixels(width as usize, height as usize);
    let img = RgbImage::from_raw(width, height, pixels).expect("buffer matches dimensions");
    encode_png(&DynamicImage::ImageRgb8(img))
}

/// PNG bytes of a grayscale solar disk.
pub fn disk_png_bytes(size: u32) -> Vec<u8> {
    encode_png(&DynamicImage::ImageLuma8(create_solar_disk(size)))
}
