//! # jpegkit
//!
//! JPEG encoding and decoding with configurable pixel layouts, row stride,
//! quality and EXIF orientation.
//!
//! Compression and decompression are delegated to the `jpeg-encoder` and
//! `zune-jpeg` engines. This crate validates options, converts between the
//! caller's buffer layout and the engine's packed scanlines, and applies
//! EXIF orientation to decoded pixels.
//!
//! ## Usage
//!
//! ```rust
//! use jpegkit::{DecodeConfig, Decoder, EncodeConfig, Encoder, Orientation};
//!
//! // 32x16 BGR pixels, written with an orientation tag
//! let raw = vec![64u8; 32 * 16 * 3];
//! let config = EncodeConfig::default()
//!     .with_pixel_format("BGR")
//!     .with_quality(85)
//!     .with_orientation(Orientation::Rotate90);
//! let jpeg = Encoder::new(32, 16, &config)?.encode(&raw)?;
//!
//! // Decode to RGBX and rotate upright
//! let decoder = Decoder::new(
//!     &DecodeConfig::default()
//!         .with_pixel_format("RGBX")
//!         .with_orientation(true),
//! )?;
//! let (pixels, meta) = decoder.decode(&jpeg)?.into_parts();
//! assert_eq!((meta.width(), meta.height()), (16, 32));
//! assert_eq!(pixels.len(), meta.stride() * meta.height() as usize);
//! # Ok::<(), jpegkit::CodecError>(())
//! ```

#![forbid(unsafe_code)]

mod codecs;
mod config;
mod convert;
mod decode;
mod encode;
mod error;
mod exif;
mod info;
mod limits;
mod options;
pub mod orientation;
mod pixel;
mod probe;
pub mod stride;

pub use config::{Bundle, DecodeConfig, EncodeConfig, Value};
pub use decode::Decoder;
pub use encode::Encoder;
pub use error::{CodecError, ErrorKind};
pub use crate::exif::{ExifField, ExifGroup};
pub use info::{DecodeOutput, ImageBuffer, Metadata, SourceColorSpace};
pub use limits::{JPEG_MAX_DIMENSION, Limits};
pub use options::{DEFAULT_QUALITY, DctMethod, DecodeOptions, EncodeOptions, MAX_STRIDE};
pub use orientation::Orientation;
pub use pixel::{CodecColorSpace, PixelFormat};
