//! EXIF orientation support.

use crate::CodecError;

/// EXIF orientation tag values.
///
/// Describes how the stored pixels must be transformed to present the image
/// upright. Values match the EXIF Orientation tag (TIFF tag 274).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Orientation {
    /// No transform needed.
    #[default]
    Normal = 1,
    /// Mirror left-right.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Mirror top-bottom.
    FlipVertical = 4,
    /// Mirror across the main diagonal.
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90 = 6,
    /// Mirror across the anti-diagonal.
    Transverse = 7,
    /// Rotate 90 degrees counter-clockwise.
    Rotate270 = 8,
}

impl Orientation {
    /// Create from an EXIF orientation value. `None` outside 1-8.
    pub fn from_exif(value: u32) -> Option<Self> {
        Some(match value {
            1 => Self::Normal,
            2 => Self::FlipHorizontal,
            3 => Self::Rotate180,
            4 => Self::FlipVertical,
            5 => Self::Transpose,
            6 => Self::Rotate90,
            7 => Self::Transverse,
            8 => Self::Rotate270,
            _ => return None,
        })
    }

    /// EXIF tag value (1-8).
    pub fn exif_value(self) -> u16 {
        self as u16
    }

    /// Whether this orientation swaps width and height (values 5-8).
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90 | Self::Transverse | Self::Rotate270
        )
    }

    /// Dimensions after the transform is applied.
    pub fn display_dimensions(self, stored_width: u32, stored_height: u32) -> (u32, u32) {
        if self.swaps_dimensions() {
            (stored_height, stored_width)
        } else {
            (stored_width, stored_height)
        }
    }

    /// Whether any transform is needed.
    pub fn is_identity(self) -> bool {
        self == Self::Normal
    }
}

impl TryFrom<i64> for Orientation {
    type Error = CodecError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .ok()
            .and_then(Orientation::from_exif)
            .ok_or_else(|| {
                CodecError::out_of_range("orientation", format!("{value} is not within 1..=8"))
            })
    }
}

/// Apply `orientation` to a tightly packed buffer.
///
/// Codes 1-4 move pixels within `buffer`. Codes 5-8 allocate a new buffer
/// whose width and height are swapped. Returns the buffer and its new
/// dimensions.
pub fn apply(
    buffer: Vec<u8>,
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
    orientation: Orientation,
) -> Result<(Vec<u8>, usize, usize), CodecError> {
    let expected = width * height * bytes_per_pixel;
    if buffer.len() < expected {
        return Err(CodecError::BufferTooShort {
            required: expected,
            actual: buffer.len(),
        });
    }
    if buffer.len() > expected {
        return Err(CodecError::BufferTooLarge {
            limit: expected,
            actual: buffer.len(),
        });
    }

    match bytes_per_pixel {
        1 => Ok(transform::<1>(buffer, width, height, orientation)),
        3 => Ok(transform::<3>(buffer, width, height, orientation)),
        4 => Ok(transform::<4>(buffer, width, height, orientation)),
        n => Err(CodecError::InvalidArgument(format!(
            "unsupported pixel size of {n} bytes"
        ))),
    }
}

fn transform<const N: usize>(
    mut buffer: Vec<u8>,
    width: usize,
    height: usize,
    orientation: Orientation,
) -> (Vec<u8>, usize, usize)
where
    [u8; N]: bytemuck::Pod,
{
    if width == 0 || height == 0 {
        let (w, h) = if orientation.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        };
        return (buffer, w, h);
    }

    match orientation {
        Orientation::Normal => (buffer, width, height),
        Orientation::FlipHorizontal => {
            let pixels: &mut [[u8; N]] = bytemuck::cast_slice_mut(&mut buffer);
            for row in pixels.chunks_exact_mut(width) {
                row.reverse();
            }
            (buffer, width, height)
        }
        Orientation::Rotate180 => {
            let pixels: &mut [[u8; N]] = bytemuck::cast_slice_mut(&mut buffer);
            pixels.reverse();
            (buffer, width, height)
        }
        Orientation::FlipVertical => {
            let row_bytes = width * N;
            for y in 0..height / 2 {
                let (top, bottom) = buffer.split_at_mut((height - 1 - y) * row_bytes);
                top[y * row_bytes..(y + 1) * row_bytes].swap_with_slice(&mut bottom[..row_bytes]);
            }
            (buffer, width, height)
        }
        Orientation::Transpose
        | Orientation::Rotate90
        | Orientation::Transverse
        | Orientation::Rotate270 => {
            let src: &[[u8; N]] = bytemuck::cast_slice(&buffer);
            // Output is `height` pixels wide and `width` pixels tall.
            let mut dst = Vec::with_capacity(src.len());
            for dy in 0..width {
                for dx in 0..height {
                    let (sx, sy) = match orientation {
                        Orientation::Transpose => (dy, dx),
                        Orientation::Rotate90 => (dy, height - 1 - dx),
                        Orientation::Transverse => (width - 1 - dy, height - 1 - dx),
                        _ => (width - 1 - dy, dx),
                    };
                    dst.push(src[sy * width + sx]);
                }
            }
            (dst.into_flattened(), height, width)
        }
    }
}
