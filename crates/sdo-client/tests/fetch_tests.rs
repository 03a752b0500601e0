//! Single and batch fetch behavior against an in-memory transport.

mod common;

use chrono::Duration;
use common::CountingTransport;
use sdo_client::{
    AiaWave, ImageApiError, ImageClient, ImageOutput, ImageSize, OutputFormat, PixelArray,
    RequestDescriptor, UrlBuilder,
};
use sdo_common::{format_time, Choice, ImageParam, TimeRange};
use test_utils::{jan1, reference_hour, time::QUARTER_HOUR_KEYS, values};

fn client(transport: &CountingTransport) -> ImageClient<&CountingTransport> {
    ImageClient::with_transport(transport, UrlBuilder::new("http://api"))
}

fn request(output: &str) -> RequestDescriptor {
    RequestDescriptor::new(jan1(0, 0, 0), values::WAVE, values::SIZE, output)
}

fn batch_request(output: &str, limit: u32) -> RequestDescriptor {
    let (_, end) = reference_hour();
    request(output).with_end_time(end).with_limit(limit)
}

// ============================================================================
// Single fetch
// ============================================================================

#[test]
fn test_get_image() {
    let transport = CountingTransport::png(16, 8);
    let output = client(&transport).get(&request("image")).unwrap();

    assert!(matches!(output, ImageOutput::Image(_)));
    assert_eq!(output.dimensions(), (16, 8));
    assert_eq!(transport.calls(), 1);
    assert_eq!(
        transport.urls()[0],
        "http://api/images/SDO/AIA/512/171/?starttime=2021-01-01T00:00:00"
    );
}

#[test]
fn test_get_array() {
    let transport = CountingTransport::png(16, 8);
    let output = client(&transport).get(&request("array")).unwrap();

    let array = output.as_array().expect("array output");
    assert_eq!(array.shape(), [8, 16, 3]);
    assert_eq!(array.values(), test_utils::create_test_rgb_pixels(16, 8).as_slice());
}

#[test]
fn test_bogus_output_format_makes_no_request() {
    let transport = CountingTransport::png(4, 4);
    let err = client(&transport).get(&request(values::BOGUS)).unwrap_err();

    assert!(matches!(err, ImageApiError::InvalidArgument(_)));
    assert!(err.to_string().contains("bogus"));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_invalid_output_formats_never_reach_network() {
    let transport = CountingTransport::png(4, 4);
    let client = client(&transport);
    for format in ["", "IMAGE", "png", "jpeg", "arr", "xml "] {
        let err = client.get(&request(format)).unwrap_err();
        assert!(err.is_request_error(), "{format:?} should be rejected");
    }
    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_invalid_wavelength_rejected() {
    let transport = CountingTransport::png(4, 4);
    let req = request("image").with_wavelength("42");
    let err = client(&transport).get(&req).unwrap_err();

    assert!(err.to_string().contains("AIA_WAVE"));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_xml_is_unimplemented() {
    let transport = CountingTransport::png(4, 4);
    let err = client(&transport).get(&request("xml")).unwrap_err();

    assert!(matches!(err, ImageApiError::Unimplemented(_)));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_undecodable_body() {
    let transport = CountingTransport::new(b"<html>not an image</html>".to_vec());
    let err = client(&transport).get(&request("image")).unwrap_err();

    assert!(matches!(err, ImageApiError::Decode(_)));
    assert_eq!(transport.calls(), 1);
}

#[test]
fn test_http_status_propagates() {
    let transport = CountingTransport::png(4, 4).failing_on(1);
    let err = client(&transport).get(&request("image")).unwrap_err();

    assert!(matches!(err, ImageApiError::HttpStatus { status: 503, .. }));
}

#[test]
fn test_get_image_ignores_output_format() {
    let transport = CountingTransport::png(5, 5);
    let img = client(&transport).get_image(&request("xml")).unwrap();
    assert_eq!(img.width(), 5);
}

// ============================================================================
// Array round trip
// ============================================================================

#[test]
fn test_array_round_trip_preserves_dimensions() {
    let disk = image::load_from_memory(&test_utils::disk_png_bytes(24)).unwrap();
    let array = PixelArray::from_image(&disk);
    assert_eq!(array.shape(), [24, 24, 1]);

    let back = array.to_image().unwrap();
    assert_eq!((back.width(), back.height()), (24, 24));
    assert_eq!(back.color().channel_count(), 1);
    assert_eq!(PixelArray::from_image(&back), array);
}

// ============================================================================
// Batch fetch
// ============================================================================

#[test]
fn test_batch_quarter_hours() {
    let transport = CountingTransport::png(4, 4);
    let batch = client(&transport).get_batch(&batch_request("image", 4)).unwrap();

    let keys: Vec<_> = batch.keys().collect();
    assert_eq!(keys, QUARTER_HOUR_KEYS);
    assert_eq!(transport.calls(), 4);

    let urls = transport.urls();
    for (url, key) in urls.iter().zip(QUARTER_HOUR_KEYS) {
        assert!(url.ends_with(&format!("?starttime={}", key)), "{url}");
    }
}

#[test]
fn test_batch_arrays() {
    let transport = CountingTransport::png(6, 2);
    let batch = client(&transport).get_batch(&batch_request("array", 2)).unwrap();

    assert_eq!(batch.len(), 2);
    for (_, item) in batch.iter() {
        assert_eq!(item.format(), OutputFormat::Array);
        assert_eq!(item.as_array().unwrap().shape(), [2, 6, 3]);
    }
}

#[test]
fn test_batch_key_count_matches_step() {
    let (start, end) = reference_hour();
    let total = (end - start).num_seconds();

    for limit in [1u32, 3, 4, 7, 11, 60, 1000] {
        let transport = CountingTransport::png(2, 2);
        let batch = client(&transport).get_batch(&batch_request("image", limit)).unwrap();

        let step = total / limit as i64;
        let expected = ((total + step - 1) / step) as usize;
        assert_eq!(batch.len(), expected, "limit {limit}");
        assert_eq!(transport.calls(), expected);

        let range = TimeRange::new(start, end);
        for key in batch.keys() {
            let t = sdo_common::parse_time(key).unwrap();
            assert!(range.contains(&t), "{key} outside range");
        }
    }
}

#[test]
fn test_batch_zero_limit() {
    let transport = CountingTransport::png(2, 2);
    let err = client(&transport).get_batch(&batch_request("image", 0)).unwrap_err();

    assert!(matches!(err, ImageApiError::DivisionByZero));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_batch_requires_end_time() {
    let transport = CountingTransport::png(2, 2);
    let err = client(&transport)
        .get_batch(&request("image").with_limit(4))
        .unwrap_err();

    assert!(matches!(err, ImageApiError::MissingParameter("end_time")));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_batch_end_before_start_is_empty() {
    let transport = CountingTransport::png(2, 2);
    let req = request("image")
        .with_start_time(jan1(1, 0, 0))
        .with_end_time(jan1(0, 0, 0))
        .with_limit(4);
    let batch = client(&transport).get_batch(&req).unwrap();

    assert!(batch.is_empty());
    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_batch_aborts_on_first_failure() {
    let transport = CountingTransport::png(2, 2).failing_on(3);
    let err = client(&transport).get_batch(&batch_request("image", 4)).unwrap_err();

    assert!(matches!(err, ImageApiError::HttpStatus { status: 503, .. }));
    assert_eq!(transport.calls(), 3);
}

#[test]
fn test_batch_over_long_range_fails_on_first_item() {
    let transport = CountingTransport::png(2, 2).failing_on(1);
    let start = jan1(0, 0, 0);
    let req = request("image")
        .with_end_time(start + Duration::days(365 * 200))
        .with_step(1);

    let err = client(&transport).get_batch(&req).unwrap_err();

    assert!(matches!(err, ImageApiError::HttpStatus { status: 503, .. }));
    assert_eq!(transport.calls(), 1);
}

#[test]
fn test_batch_with_explicit_step() {
    let transport = CountingTransport::png(2, 2);
    let (start, end) = reference_hour();
    let req = RequestDescriptor::new(start, AiaWave::A304, ImageSize::Size256, OutputFormat::Image)
        .with_end_time(end)
        .with_step(25 * 60);

    let batch = client(&transport).get_batch(&req).unwrap();
    let expected: Vec<_> = [0, 25, 50]
        .iter()
        .map(|m| format_time(&(start + Duration::minutes(*m))))
        .collect();
    assert_eq!(batch.keys().collect::<Vec<_>>(), expected);
}

#[test]
fn test_batch_param_urls() {
    let transport = CountingTransport::png(2, 2);
    let req = batch_request("image", 2).with_parameter("5");
    client(&transport).get_batch(&req).unwrap();

    assert_eq!(
        transport.urls(),
        vec![
            "http://api/images/SDO/AIA/param/512/171/5/?starttime=2021-01-01T00:00:00",
            "http://api/images/SDO/AIA/param/512/171/5/?starttime=2021-01-01T00:30:00",
        ]
    );
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_request_json_round_trip() -> anyhow::Result<()> {
    let req = RequestDescriptor::new(
        jan1(0, 0, 0),
        AiaWave::A193,
        ImageSize::Size2k,
        OutputFormat::Array,
    )
    .with_parameter(ImageParam::Mean)
    .with_end_time(jan1(1, 0, 0))
    .with_limit(4);

    let json = serde_json::to_string(&req)?;
    assert!(json.contains(r#""wavelength":"193""#));
    assert!(json.contains(r#""parameter_id":"2""#));

    let back: RequestDescriptor = serde_json::from_str(&json)?;
    assert_eq!(back, req);
    Ok(())
}

#[test]
fn test_raw_values_survive_json() -> anyhow::Result<()> {
    let req = request(values::BOGUS).with_wavelength("42");
    let back: RequestDescriptor = serde_json::from_str(&serde_json::to_string(&req)?)?;

    assert_eq!(back.output_format, Choice::Raw(values::BOGUS.to_string()));
    assert_eq!(back.wavelength, Choice::Raw("42".to_string()));
    Ok(())
}

#[test]
fn test_pixel_array_json_round_trip() -> anyhow::Result<()> {
    let transport = CountingTransport::png(3, 2);
    let output = client(&transport).get(&request("array"))?;
    let array = output.into_array();

    let back: PixelArray = serde_json::from_str(&serde_json::to_string(&array)?)?;
    assert_eq!(back, array);
    assert_eq!(back.shape(), [2, 3, 3]);
    Ok(())
}
