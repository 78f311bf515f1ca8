//! Row stride adaptation between caller buffers and packed scanlines.
//!
//! Only the first `width * bytes_per_pixel` bytes of each row are touched.
//! Padding bytes between rows are never read on [`pack`] and are left zeroed
//! by [`unpack`].

use imgref::{ImgRef, ImgVec};

use crate::CodecError;

/// Minimum buffer length for the given geometry:
/// `(height - 1) * stride + width * bytes_per_pixel`.
///
/// Fails with a range error if `stride` is smaller than one packed row or
/// the length does not fit in `usize`.
pub fn required_len(
    width: usize,
    height: usize,
    stride: usize,
    bytes_per_pixel: usize,
) -> Result<usize, CodecError> {
    let row_bytes = row_bytes(width, bytes_per_pixel)?;
    if stride < row_bytes {
        return Err(CodecError::out_of_range(
            "stride",
            format!("{stride} is smaller than the packed row size {row_bytes}"),
        ));
    }
    if height == 0 {
        return Ok(0);
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|n| n.checked_add(row_bytes))
        .ok_or_else(|| overflow(stride, height))
}

/// Length of a full `stride * height` buffer.
pub fn full_len(height: usize, stride: usize) -> Result<usize, CodecError> {
    stride
        .checked_mul(height)
        .ok_or_else(|| overflow(stride, height))
}

fn row_bytes(width: usize, bytes_per_pixel: usize) -> Result<usize, CodecError> {
    width.checked_mul(bytes_per_pixel).ok_or_else(|| {
        CodecError::out_of_range(
            "width",
            format!("{width} pixels of {bytes_per_pixel} bytes overflow a row"),
        )
    })
}

fn overflow(stride: usize, height: usize) -> CodecError {
    CodecError::out_of_range(
        "stride",
        format!("{stride} bytes over {height} rows overflows the buffer size"),
    )
}

/// Copy a strided buffer into a tightly packed one.
pub fn pack(
    buffer: &[u8],
    width: usize,
    height: usize,
    stride: usize,
    bytes_per_pixel: usize,
) -> Result<Vec<u8>, CodecError> {
    let required = required_len(width, height, stride, bytes_per_pixel)?;
    if buffer.len() < required {
        return Err(CodecError::BufferTooShort {
            required,
            actual: buffer.len(),
        });
    }

    let row_bytes = row_bytes(width, bytes_per_pixel)?;
    if row_bytes == 0 || height == 0 {
        return Ok(Vec::new());
    }

    let img = ImgRef::new_stride(&buffer[..required], row_bytes, height, stride);
    let mut packed = Vec::with_capacity(row_bytes * height);
    for row in img.rows() {
        packed.extend_from_slice(row);
    }
    Ok(packed)
}

/// Copy a tightly packed buffer into a new `stride * height` byte buffer.
pub fn unpack(
    packed: &[u8],
    width: usize,
    height: usize,
    stride: usize,
    bytes_per_pixel: usize,
) -> Result<Vec<u8>, CodecError> {
    required_len(width, height, stride, bytes_per_pixel)?;
    let total = full_len(height, stride)?;
    let row_bytes = row_bytes(width, bytes_per_pixel)?;
    // row_bytes <= stride, so this is at most `total`.
    let tight = row_bytes * height;
    if packed.len() < tight {
        return Err(CodecError::BufferTooShort {
            required: tight,
            actual: packed.len(),
        });
    }
    if row_bytes == 0 || height == 0 {
        return Ok(vec![0; total]);
    }

    let mut img = ImgVec::new_stride(vec![0u8; total], row_bytes, height, stride);
    for (dst, src) in img.rows_mut().zip(packed.chunks_exact(row_bytes)) {
        dst.copy_from_slice(src);
    }
    Ok(img.into_buf())
}
