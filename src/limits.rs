//! Resource limits for decoding.

use crate::CodecError;

/// Largest width or height a JPEG frame header can declare.
pub const JPEG_MAX_DIMENSION: u32 = 65535;

/// Resource limits for decode operations.
///
/// Checked against the frame header before any pixel data is decoded.
/// All limits are optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    /// Maximum image width in pixels.
    pub max_width: Option<u32>,
    /// Maximum image height in pixels.
    pub max_height: Option<u32>,
    /// Maximum total pixels (width × height).
    pub max_pixels: Option<u64>,
}

impl Limits {
    /// No restrictions.
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the maximum width.
    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Set the maximum height.
    pub fn with_max_height(mut self, max_height: u32) -> Self {
        self.max_height = Some(max_height);
        self
    }

    /// Set the maximum pixel count.
    pub fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.max_pixels = Some(max_pixels);
        self
    }

    /// Reject a `width` × `height` frame that any limit forbids.
    pub fn check_dimensions(&self, width: u32, height: u32) -> Result<(), CodecError> {
        check("width", u64::from(width), self.max_width.map(u64::from))?;
        check("height", u64::from(height), self.max_height.map(u64::from))?;
        check(
            "pixel count",
            u64::from(width) * u64::from(height),
            self.max_pixels,
        )
    }

    /// Width cap handed to the decoding engine.
    pub(crate) fn engine_max_width(&self) -> usize {
        self.max_width.unwrap_or(JPEG_MAX_DIMENSION) as usize
    }

    /// Height cap handed to the decoding engine.
    pub(crate) fn engine_max_height(&self) -> usize {
        self.max_height.unwrap_or(JPEG_MAX_DIMENSION) as usize
    }
}

fn check(what: &str, value: u64, limit: Option<u64>) -> Result<(), CodecError> {
    match limit {
        Some(limit) if value > limit => Err(CodecError::LimitExceeded(format!(
            "{what} {value} exceeds limit {limit}"
        ))),
        _ => Ok(()),
    }
}
