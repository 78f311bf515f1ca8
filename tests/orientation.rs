//! EXIF orientation round trips: encode a quadrant image with a tag, decode
//! with orientation applied, and check where each color ended up.

mod common;

use common::{BLUE, GREEN, RED, YELLOW, nearest, quadrant_rgb};
use jpegkit::{DecodeConfig, Decoder, EncodeConfig, Encoder, Orientation, PixelFormat};
use test_log::test;

const SIZE: u32 = 160;

fn encode_tagged(width: u32, height: u32, tag: i32) -> Vec<u8> {
    let config = EncodeConfig::default()
        .with_quality(90)
        .with_orientation(tag);
    Encoder::new(width, height, &config)
        .unwrap()
        .encode(&quadrant_rgb(width as usize, height as usize))
        .unwrap()
}

fn decoder(apply: bool, format: &str) -> Decoder {
    Decoder::new(
        &DecodeConfig::default()
            .with_orientation(apply)
            .with_pixel_format(format),
    )
    .unwrap()
}

/// Colors at top-left, top-right, bottom-left, bottom-right.
fn sample(pixels: &[u8], width: usize, bpp: usize) -> [[u8; 3]; 4] {
    let at = |x: usize, y: usize| {
        let i = (y * width + x) * bpp;
        nearest(&pixels[i..i + 3])
    };
    [at(20, 20), at(140, 20), at(20, 140), at(140, 140)]
}

#[test]
fn applied_orientation_places_quadrants() {
    let expected = [
        (1, [RED, GREEN, YELLOW, BLUE]),
        (2, [GREEN, RED, BLUE, YELLOW]),
        (3, [BLUE, YELLOW, GREEN, RED]),
        (4, [YELLOW, BLUE, RED, GREEN]),
        (5, [RED, YELLOW, GREEN, BLUE]),
        (6, [YELLOW, RED, BLUE, GREEN]),
        (7, [BLUE, GREEN, YELLOW, RED]),
        (8, [GREEN, BLUE, RED, YELLOW]),
    ];

    let decoder = decoder(true, "RGB");
    for (tag, quadrants) in expected {
        let jpeg = encode_tagged(SIZE, SIZE, tag);
        let (pixels, meta) = decoder.decode(&jpeg).unwrap().into_parts();

        assert_eq!(meta.orientation().map(|o| o.exif_value()), Some(tag as u16));
        assert!(meta.orientation_applied());
        assert_eq!((meta.width(), meta.height()), (SIZE, SIZE));
        assert_eq!(
            sample(&pixels, SIZE as usize, 3),
            quadrants,
            "orientation {tag}"
        );
    }
}

#[test]
fn unapplied_orientation_leaves_pixels() {
    let decoder = decoder(false, "RGB");
    for tag in 1..=8 {
        let jpeg = encode_tagged(SIZE, SIZE, tag);
        let (pixels, meta) = decoder.decode(&jpeg).unwrap().into_parts();
        assert!(!meta.orientation_applied());
        assert_eq!(meta.orientation().map(|o| o.exif_value()), Some(tag as u16));
        assert_eq!(
            sample(&pixels, SIZE as usize, 3),
            [RED, GREEN, YELLOW, BLUE],
            "orientation {tag}"
        );
    }
}

#[test]
fn rotation_swaps_dimensions() {
    let jpeg = encode_tagged(240, 160, 6);
    let output = decoder(true, "BGRX").decode(&jpeg).unwrap();
    assert_eq!((output.width(), output.height()), (160, 240));
    assert_eq!(output.metadata.stride(), 160 * 4);
    assert_eq!(output.metadata.pixel_format(), PixelFormat::Bgrx);
    assert_eq!(output.pixels.data().len(), 160 * 240 * 4);

    // Rotated clockwise, the top-left quadrant comes from the bottom-left.
    let px = output.pixels.pixel(10, 10).unwrap();
    assert_eq!(nearest(&[px[2], px[1], px[0]]), YELLOW);
}

#[test]
fn untagged_image_has_no_orientation() {
    let jpeg = Encoder::new(SIZE, SIZE, &EncodeConfig::default())
        .unwrap()
        .encode(&quadrant_rgb(SIZE as usize, SIZE as usize))
        .unwrap();
    let output = decoder(true, "RGB").decode(&jpeg).unwrap();
    assert_eq!(output.metadata.orientation(), None);
    assert!(!output.metadata.orientation_applied());
}

#[test]
fn read_header_reports_display_dimensions() {
    let jpeg = encode_tagged(240, 160, 8);
    let meta = decoder(true, "GRAYSCALE").read_header(&jpeg).unwrap();
    assert_eq!(meta.orientation(), Some(Orientation::Rotate270));
    assert_eq!((meta.width(), meta.height()), (160, 240));
    assert_eq!(meta.num_components(), 1);

    let meta = decoder(false, "GRAYSCALE").read_header(&jpeg).unwrap();
    assert_eq!((meta.width(), meta.height()), (240, 160));
}
