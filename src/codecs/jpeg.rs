//! JPEG codec adapter: jpeg-encoder for compression, zune-jpeg for
//! decompression.

use jpeg_encoder::ColorType;
use zune_core::bytestream::ZCursor;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

use crate::pixel::CodecColorSpace;
use crate::{CodecError, DecodeOptions, EncodeOptions, Limits, PixelFormat, convert, exif};

/// APP segment number carrying Exif data.
const APP1: u8 = 1;

fn color_type(space: CodecColorSpace) -> ColorType {
    match space {
        CodecColorSpace::Grayscale => ColorType::Luma,
        CodecColorSpace::Rgb => ColorType::Rgb,
        CodecColorSpace::Bgr => ColorType::Bgr,
        // The fourth byte is ignored by the engine.
        CodecColorSpace::Rgbx => ColorType::Rgba,
        CodecColorSpace::Bgrx => ColorType::Bgra,
        CodecColorSpace::YCbCr => ColorType::Ycbcr,
    }
}

/// Compress a tightly packed buffer.
pub(crate) fn compress(packed: &[u8], options: &EncodeOptions) -> Result<Vec<u8>, CodecError> {
    let width = u16::try_from(options.width())
        .map_err(|_| CodecError::out_of_range("width", "exceeds 65535"))?;
    let height = u16::try_from(options.height())
        .map_err(|_| CodecError::out_of_range("height", "exceeds 65535"))?;

    // The engine has a single DCT implementation; the selector only shows up here.
    tracing::debug!(dct_method = options.dct_method().name(), "jpeg compress");

    let mut out = Vec::new();
    // Engine quality range is 1-100.
    let mut encoder = jpeg_encoder::Encoder::new(&mut out, options.quality().clamp(1, 100));
    encoder.set_optimized_huffman_tables(true);
    if let Some(orientation) = options.orientation() {
        encoder
            .add_app_segment(APP1, &exif::orientation_segment(orientation))
            .map_err(CodecError::from_engine)?;
    }
    encoder
        .encode(
            packed,
            width,
            height,
            color_type(options.pixel_format().codec_color_space()),
        )
        .map_err(CodecError::from_engine)?;

    Ok(out)
}

/// Decompress `data` into a tightly packed buffer in the requested layout.
///
/// Returns the pixels with the stored (untransformed) width and height.
pub(crate) fn decompress(
    data: &[u8],
    options: &DecodeOptions,
    limits: &Limits,
) -> Result<(Vec<u8>, u32, u32), CodecError> {
    let target = options.pixel_format();
    let (out_colorspace, channels) = match target {
        PixelFormat::Grayscale => (ColorSpace::Luma, 1),
        _ => (ColorSpace::RGB, 3),
    };

    let engine_options = DecoderOptions::default()
        .jpeg_set_out_colorspace(out_colorspace)
        .set_max_width(limits.engine_max_width())
        .set_max_height(limits.engine_max_height());
    let mut decoder = JpegDecoder::new_with_options(ZCursor::new(data), engine_options);

    let pixels = decoder.decode().map_err(CodecError::from_engine)?;
    let (width, height) = decoder
        .dimensions()
        .ok_or_else(|| CodecError::from_engine("decoder reported no dimensions"))?;

    let expected = width * height * channels;
    if pixels.len() != expected {
        return Err(CodecError::from_engine(format!(
            "decoder produced {} bytes for a {width}x{height} image, expected {expected}",
            pixels.len()
        )));
    }

    let pixels = match target {
        PixelFormat::Grayscale | PixelFormat::Rgb => pixels,
        other => convert::from_rgb(pixels, other),
    };
    Ok((pixels, width as u32, height as u32))
}
