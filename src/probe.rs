//! JPEG stream probing without decoding pixels.
//!
//! Walks the marker segments from SOI up to the first scan, picking up the
//! frame header and the first Exif APP1 payload.

use crate::CodecError;

const SOI: u8 = 0xD8;
const EOI: u8 = 0xD9;
const SOS: u8 = 0xDA;
const APP1: u8 = 0xE1;

/// Frame-level facts read from the marker segments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct JpegHeader {
    pub width: u32,
    pub height: u32,
    /// Sample precision in bits.
    pub precision: u8,
    /// Component count declared by the frame header.
    pub components: u8,
    pub progressive: bool,
    /// First APP1 payload starting with the Exif identifier, if any.
    pub exif: Option<Vec<u8>>,
}

/// Scan `data` for the frame header.
pub(crate) fn scan(data: &[u8]) -> Result<JpegHeader, CodecError> {
    if data.len() < 4 || data[0] != 0xFF || data[1] != SOI {
        return Err(CodecError::from_engine("not a JPEG stream (missing SOI marker)"));
    }

    let mut exif = None;
    let mut pos = 2;

    while pos + 1 < data.len() {
        if data[pos] != 0xFF {
            // Lost sync
            break;
        }

        // Skip fill bytes
        while pos + 1 < data.len() && data[pos + 1] == 0xFF {
            pos += 1;
        }
        if pos + 1 >= data.len() {
            break;
        }

        let marker = data[pos + 1];
        pos += 2;
        tracing::trace!("marker {marker:#04X} at offset {}", pos - 2);

        // Standalone markers carry no length field
        if marker == 0x00 || marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            continue;
        }
        if marker == SOS || marker == EOI {
            break;
        }

        if pos + 2 > data.len() {
            break;
        }
        let seg_len = u16::from_be_bytes([data[pos], data[pos + 1]]) as usize;
        if seg_len < 2 {
            break;
        }
        let body_end = (pos + seg_len).min(data.len());
        let body = &data[pos + 2..body_end];

        if marker == APP1 && exif.is_none() && body.starts_with(crate::exif::EXIF_HEADER) {
            exif = Some(body.to_vec());
        }

        // SOF0-SOF15 except DHT (C4), JPG (C8) and DAC (CC)
        let is_sof = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_sof {
            // precision (1) + height (2) + width (2) + components (1)
            if body.len() < 6 {
                break;
            }
            return Ok(JpegHeader {
                precision: body[0],
                height: u16::from_be_bytes([body[1], body[2]]) as u32,
                width: u16::from_be_bytes([body[3], body[4]]) as u32,
                components: body[5],
                progressive: matches!(marker, 0xC2 | 0xC6 | 0xCA | 0xCE),
                exif,
            });
        }

        pos += seg_len;
    }

    Err(CodecError::from_engine("no frame header found before scan data"))
}
