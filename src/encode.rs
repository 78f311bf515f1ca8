//! Image encoding.

use std::borrow::Cow;

use crate::config::Value;
use crate::{CodecError, EncodeConfig, EncodeOptions, stride};

/// JPEG encoder with validated, immutable options.
///
/// Each [`encode`](Encoder::encode) call runs a fresh engine session, so an
/// encoder can be shared between threads.
///
/// # Example
///
/// ```
/// use jpegkit::{EncodeConfig, Encoder};
///
/// let config = EncodeConfig::default()
///     .with_pixel_format("BGRX")
///     .with_quality(90)
///     .with_stride(256);
/// let encoder = Encoder::new(60, 40, &config)?;
/// let jpeg = encoder.encode(&vec![0u8; 256 * 40])?;
/// assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
/// # Ok::<(), jpegkit::CodecError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Encoder {
    options: EncodeOptions,
}

impl Encoder {
    /// Validate `config` for a `width` × `height` image.
    pub fn new(width: u32, height: u32, config: &EncodeConfig) -> Result<Self, CodecError> {
        let options = EncodeOptions::new(&Value::from(width), &Value::from(height), config)?;
        Ok(Self { options })
    }

    /// Build from positional arguments: width, height and an optional
    /// [`Bundle`](crate::Bundle) of named options.
    pub fn from_args(args: &[Value]) -> Result<Self, CodecError> {
        Ok(Self {
            options: EncodeOptions::from_args(args)?,
        })
    }

    /// Wrap already validated options.
    pub fn with_options(options: EncodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Encode `raw` pixels laid out as described by the options.
    ///
    /// `raw` must hold at least `(height - 1) * stride + width * bpp` bytes
    /// and at most `stride * height`.
    pub fn encode(&self, raw: &[u8]) -> Result<Vec<u8>, CodecError> {
        let opts = &self.options;
        let width = opts.width() as usize;
        let height = opts.height() as usize;
        let bpp = opts.pixel_format().bytes_per_pixel();

        let required = stride::required_len(width, height, opts.stride(), bpp)?;
        if raw.len() < required {
            return Err(CodecError::BufferTooShort {
                required,
                actual: raw.len(),
            });
        }
        let limit = stride::full_len(height, opts.stride())?;
        if raw.len() > limit {
            return Err(CodecError::BufferTooLarge {
                limit,
                actual: raw.len(),
            });
        }

        tracing::debug!(
            width,
            height,
            pixel_format = opts.pixel_format().name(),
            quality = opts.quality(),
            stride = opts.stride(),
            "encoding jpeg"
        );

        let packed = if opts.stride() == opts.row_bytes() {
            Cow::Borrowed(raw)
        } else {
            Cow::Owned(stride::pack(raw, width, height, opts.stride(), bpp)?)
        };

        crate::codecs::jpeg::compress(&packed, opts)
    }
}
