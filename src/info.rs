//! Decoded image buffers and their metadata.

use crate::exif::ExifField;
use crate::probe::JpegHeader;
use crate::{CodecError, Orientation, PixelFormat, orientation};

/// Color space of the compressed source, inferred from the frame header's
/// component count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceColorSpace {
    Grayscale,
    YCbCr,
    Cmyk,
    /// Any other component count.
    Other(u8),
}

impl SourceColorSpace {
    fn from_components(components: u8) -> Self {
        match components {
            1 => Self::Grayscale,
            3 => Self::YCbCr,
            4 => Self::Cmyk,
            n => Self::Other(n),
        }
    }
}

/// Read-only description of a decoded (or probed) image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metadata {
    width: u32,
    height: u32,
    stride: usize,
    pixel_format: PixelFormat,
    orientation: Option<Orientation>,
    orientation_applied: bool,
    source_components: u8,
    progressive: bool,
    exif_tags: Option<Vec<ExifField>>,
}

impl Metadata {
    pub(crate) fn new(
        header: &JpegHeader,
        pixel_format: PixelFormat,
        orientation: Option<Orientation>,
        orientation_applied: bool,
    ) -> Self {
        let (width, height) = match orientation {
            Some(o) if orientation_applied => o.display_dimensions(header.width, header.height),
            _ => (header.width, header.height),
        };
        Self {
            width,
            height,
            stride: width as usize * pixel_format.bytes_per_pixel(),
            pixel_format,
            orientation,
            orientation_applied,
            source_components: header.components,
            progressive: header.progressive,
            exif_tags: None,
        }
    }

    pub(crate) fn with_exif_tags(mut self, tags: Vec<ExifField>) -> Self {
        self.exif_tags = Some(tags);
        self
    }

    /// Width of the output pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the output pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Byte distance between output rows. Output is always tightly packed.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    /// Channels per output pixel, padding included.
    pub fn num_components(&self) -> usize {
        self.pixel_format.num_components()
    }

    /// Orientation tag found in the source, whether or not it was applied.
    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    /// Whether the output pixels have been transformed by [`orientation`](Self::orientation).
    pub fn orientation_applied(&self) -> bool {
        self.orientation_applied
    }

    /// Component count declared by the source frame header.
    pub fn source_components(&self) -> u8 {
        self.source_components
    }

    pub fn source_color_space(&self) -> SourceColorSpace {
        SourceColorSpace::from_components(self.source_components)
    }

    /// Whether the source uses progressive coding.
    pub fn is_progressive(&self) -> bool {
        self.progressive
    }

    /// EXIF fields of the source, when the decoder was asked to list them.
    /// Empty if the source carries no readable EXIF block.
    pub fn exif_tags(&self) -> Option<&[ExifField]> {
        self.exif_tags.as_deref()
    }
}

/// A tightly packed pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    pixel_format: PixelFormat,
}

impl ImageBuffer {
    /// Wrap `data`, which must hold exactly `width * height` pixels.
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        pixel_format: PixelFormat,
    ) -> Result<Self, CodecError> {
        let expected = width as usize * height as usize * pixel_format.bytes_per_pixel();
        if data.len() < expected {
            return Err(CodecError::BufferTooShort {
                required: expected,
                actual: data.len(),
            });
        }
        if data.len() > expected {
            return Err(CodecError::BufferTooLarge {
                limit: expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            pixel_format,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.width as usize * self.pixel_format.bytes_per_pixel()
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Bytes of the pixel at (`x`, `y`).
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.pixel_format.bytes_per_pixel();
        let start = y as usize * self.stride() + x as usize * bpp;
        self.data.get(start..start + bpp)
    }

    /// Transform the pixels in place. 90° and 270° variants replace the
    /// buffer and swap width and height.
    pub fn apply_orientation(&mut self, o: Orientation) -> Result<(), CodecError> {
        if o.is_identity() {
            return Ok(());
        }
        let data = core::mem::take(&mut self.data);
        let (data, width, height) = orientation::apply(
            data,
            self.width as usize,
            self.height as usize,
            self.pixel_format.bytes_per_pixel(),
            o,
        )?;
        self.data = data;
        self.width = width as u32;
        self.height = height as u32;
        Ok(())
    }
}

/// Decoded image output.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    /// Decoded pixels.
    pub pixels: ImageBuffer,
    /// Image metadata.
    pub metadata: Metadata,
}

impl DecodeOutput {
    /// Image width in pixels (convenience accessor).
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Image height in pixels (convenience accessor).
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Split into raw pixel bytes and metadata.
    pub fn into_parts(self) -> (Vec<u8>, Metadata) {
        (self.pixels.into_data(), self.metadata)
    }
}
