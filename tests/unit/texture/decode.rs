use std::io::Cursor;

use super::*;

fn png_bytes(img: image::DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_rgba_png_normalizes_to_unit_floats() {
    let img = image::RgbaImage::from_raw(1, 1, vec![255u8, 0u8, 51u8, 128u8]).unwrap();
    let mut dec = DefaultDecoder;
    let decoded = dec
        .decode(&png_bytes(image::DynamicImage::ImageRgba8(img)))
        .unwrap();

    assert_eq!(decoded.width, 1);
    assert_eq!(decoded.height, 1);
    assert_eq!(decoded.channels, 4);
    let s = &decoded.samples;
    assert!((s[0] - 1.0).abs() < 1e-6);
    assert!(s[1].abs() < 1e-6);
    assert!((s[2] - 51.0 / 255.0).abs() < 1e-6);
    assert!((s[3] - 128.0 / 255.0).abs() < 1e-6);
}

#[test]
fn decode_gray_png_keeps_one_channel() {
    let img = image::GrayImage::from_raw(2, 1, vec![0u8, 255u8]).unwrap();
    let mut dec = DefaultDecoder;
    let decoded = dec
        .decode(&png_bytes(image::DynamicImage::ImageLuma8(img)))
        .unwrap();

    assert_eq!(decoded.channels, 1);
    assert_eq!(decoded.samples.len(), 2);
    assert!(decoded.samples[0].abs() < 1e-6);
    assert!((decoded.samples[1] - 1.0).abs() < 1e-6);
}

#[test]
fn decode_rejects_garbage() {
    let mut dec = DefaultDecoder;
    assert!(dec.decode(b"not an image").is_err());
}

#[test]
fn expand_replicates_luminance_with_opaque_alpha() {
    let img = DecodedImage {
        width: 2,
        height: 1,
        channels: 1,
        samples: vec![0.25, 0.75],
    };
    assert_eq!(
        expand_to_rgba(&img).unwrap(),
        vec![0.25, 0.25, 0.25, 1.0, 0.75, 0.75, 0.75, 1.0]
    );
}

#[test]
fn expand_keeps_source_alpha_for_two_channels() {
    let img = DecodedImage {
        width: 1,
        height: 1,
        channels: 2,
        samples: vec![0.5, 0.25],
    };
    assert_eq!(expand_to_rgba(&img).unwrap(), vec![0.5, 0.5, 0.5, 0.25]);
}

#[test]
fn expand_pads_rgb_with_opaque_alpha() {
    let img = DecodedImage {
        width: 1,
        height: 1,
        channels: 3,
        samples: vec![0.1, 0.2, 0.3],
    };
    assert_eq!(expand_to_rgba(&img).unwrap(), vec![0.1, 0.2, 0.3, 1.0]);
}

#[test]
fn expand_passes_rgba_through_and_validates() {
    let img = DecodedImage {
        width: 1,
        height: 1,
        channels: 4,
        samples: vec![0.1, 0.2, 0.3, 0.4],
    };
    assert_eq!(expand_to_rgba(&img).unwrap(), img.samples);

    let short = DecodedImage {
        width: 2,
        height: 1,
        channels: 4,
        samples: vec![0.0; 4],
    };
    assert!(expand_to_rgba(&short).is_err());

    let odd = DecodedImage {
        width: 1,
        height: 1,
        channels: 5,
        samples: vec![0.0; 5],
    };
    assert!(expand_to_rgba(&odd).is_err());
}
