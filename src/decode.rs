//! Image decoding.

use crate::config::Value;
use crate::info::{DecodeOutput, ImageBuffer, Metadata};
use crate::{CodecError, DecodeConfig, DecodeOptions, Limits, Orientation, exif, probe};

/// JPEG decoder with validated, immutable options.
///
/// # Example
///
/// ```no_run
/// use jpegkit::{DecodeConfig, Decoder};
///
/// let data: &[u8] = &[]; // your JPEG bytes
/// let decoder = Decoder::new(&DecodeConfig::default().with_orientation(true))?;
/// let output = decoder.decode(data)?;
/// println!("{}x{}", output.width(), output.height());
/// # Ok::<(), jpegkit::CodecError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    options: DecodeOptions,
    limits: Limits,
}

impl Decoder {
    /// Validate `config`.
    pub fn new(config: &DecodeConfig) -> Result<Self, CodecError> {
        Ok(Self::with_options(DecodeOptions::new(config)?))
    }

    /// Build from positional arguments: an optional
    /// [`Bundle`](crate::Bundle) of named options.
    pub fn from_args(args: &[Value]) -> Result<Self, CodecError> {
        Ok(Self::with_options(DecodeOptions::from_args(args)?))
    }

    /// Wrap already validated options.
    pub fn with_options(options: DecodeOptions) -> Self {
        Self {
            options,
            limits: Limits::none(),
        }
    }

    /// Set resource limits.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Decode `data` into the configured pixel format.
    pub fn decode(&self, data: &[u8]) -> Result<DecodeOutput, CodecError> {
        let header = self.probe(data)?;

        let pixel_format = self.options.pixel_format();
        tracing::debug!(
            width = header.width,
            height = header.height,
            components = header.components,
            pixel_format = pixel_format.name(),
            "decoding jpeg"
        );

        let (pixels, width, height) =
            crate::codecs::jpeg::decompress(data, &self.options, &self.limits)?;
        let mut image = ImageBuffer::new(pixels, width, height, pixel_format)?;

        let orientation = source_orientation(&header);
        let applied = match orientation {
            Some(o) if self.options.apply_orientation() => {
                image.apply_orientation(o)?;
                true
            }
            _ => false,
        };

        let metadata = self.metadata(&header, orientation, applied);
        Ok(DecodeOutput {
            pixels: image,
            metadata,
        })
    }

    /// Read the metadata [`decode`](Self::decode) would report, without
    /// decoding pixels.
    pub fn read_header(&self, data: &[u8]) -> Result<Metadata, CodecError> {
        let header = self.probe(data)?;

        let orientation = source_orientation(&header);
        let applied = orientation.is_some() && self.options.apply_orientation();
        Ok(self.metadata(&header, orientation, applied))
    }

    /// Whether `data` has a readable JPEG header this decoder could start on.
    ///
    /// Only the markers up to the frame header are examined; entropy-coded
    /// data is not checked.
    pub fn is_valid(data: &[u8]) -> bool {
        probe::scan(data).is_ok_and(|header| header.precision == 8)
    }

    fn metadata(
        &self,
        header: &probe::JpegHeader,
        orientation: Option<Orientation>,
        applied: bool,
    ) -> Metadata {
        let metadata = Metadata::new(header, self.options.pixel_format(), orientation, applied);
        if !self.options.exif_tags() {
            return metadata;
        }
        let tags = header
            .exif
            .as_deref()
            .map(exif::read_fields)
            .unwrap_or_default();
        metadata.with_exif_tags(tags)
    }

    fn probe(&self, data: &[u8]) -> Result<probe::JpegHeader, CodecError> {
        let header = probe::scan(data)?;
        if header.precision != 8 {
            return Err(CodecError::from_engine(format!(
                "unsupported sample precision of {} bits",
                header.precision
            )));
        }
        self.limits.check_dimensions(header.width, header.height)?;
        Ok(header)
    }
}

fn source_orientation(header: &probe::JpegHeader) -> Option<Orientation> {
    header.exif.as_deref().and_then(exif::read_orientation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EncodeConfig, Encoder, ErrorKind, PixelFormat};
    use test_log::test;

    fn encode(width: u32, height: u32, config: EncodeConfig) -> Vec<u8> {
        let encoder = Encoder::new(width, height, &config).unwrap();
        let bpp = encoder.options().pixel_format().bytes_per_pixel();
        let raw = vec![90u8; width as usize * height as usize * bpp];
        encoder.encode(&raw).unwrap()
    }

    #[test]
    fn builder_pattern() {
        let decoder = Decoder::new(&DecodeConfig::default().with_pixel_format("BGR"))
            .unwrap()
            .with_limits(Limits::none().with_max_pixels(1_000));

        assert_eq!(decoder.options().pixel_format(), PixelFormat::Bgr);
        assert!(!decoder.options().apply_orientation());
        assert_eq!(decoder.limits().max_pixels, Some(1_000));
    }

    #[test]
    fn read_header_matches_decode() {
        let jpeg = encode(24, 8, EncodeConfig::default().with_orientation(6));
        let decoder = Decoder::new(
            &DecodeConfig::default()
                .with_orientation(true)
                .with_pixel_format("RGBX"),
        )
        .unwrap();

        let header = decoder.read_header(&jpeg).unwrap();
        let output = decoder.decode(&jpeg).unwrap();
        assert_eq!(header, output.metadata);
        assert_eq!((header.width(), header.height()), (8, 24));
        assert_eq!(header.stride(), 32);
        assert_eq!(output.pixels.data().len(), 8 * 24 * 4);
    }

    #[test]
    fn orientation_exposed_when_not_applied() {
        let jpeg = encode(24, 8, EncodeConfig::default().with_orientation(8));
        let output = Decoder::default().decode(&jpeg).unwrap();
        assert_eq!(output.metadata.orientation(), Some(Orientation::Rotate270));
        assert!(!output.metadata.orientation_applied());
        assert_eq!((output.width(), output.height()), (24, 8));
    }

    #[test]
    fn limits_reject_before_decoding() {
        let jpeg = encode(64, 32, EncodeConfig::default());
        let decoder = Decoder::default().with_limits(Limits::none().with_max_width(63));
        let err = decoder.decode(&jpeg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Limit);
        assert_eq!(decoder.read_header(&jpeg).unwrap_err().kind(), ErrorKind::Limit);
    }

    #[test]
    fn exif_tags_on_request() {
        let jpeg = encode(16, 16, EncodeConfig::default().with_orientation(3));

        let output = Decoder::default().decode(&jpeg).unwrap();
        assert_eq!(output.metadata.exif_tags(), None);

        let decoder = Decoder::new(&DecodeConfig::default().with_exif_tags(true)).unwrap();
        let meta = decoder.decode(&jpeg).unwrap().metadata;
        let tags = meta.exif_tags().unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].group, crate::ExifGroup::Tiff);
        assert_eq!(tags[0].name, "Orientation");
        assert_eq!(decoder.read_header(&jpeg).unwrap(), meta);

        let plain = encode(16, 16, EncodeConfig::default());
        let meta = decoder.read_header(&plain).unwrap();
        assert_eq!(meta.exif_tags(), Some(&[][..]));
    }

    #[test]
    fn validity_check() {
        let jpeg = encode(16, 16, EncodeConfig::default());
        assert!(Decoder::is_valid(&jpeg));
        assert!(!Decoder::is_valid(&jpeg[..10]));
        assert!(!Decoder::is_valid(b"GIF89a"));
        assert!(!Decoder::is_valid(&[]));

        // 12-bit frame header
        let mut twelve_bit = jpeg.clone();
        let sof = twelve_bit
            .windows(2)
            .position(|w| w == [0xFF, 0xC0])
            .unwrap();
        twelve_bit[sof + 4] = 12;
        assert!(!Decoder::is_valid(&twelve_bit));
    }

    #[test]
    fn malformed_stream() {
        let jpeg = encode(16, 16, EncodeConfig::default());
        let err = Decoder::default().decode(&jpeg[..40]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CodecFailure);
        let err = Decoder::default().decode(b"not a jpeg").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CodecFailure);
    }
}
