//! EXIF orientation reading and writing, and field listing.

use ::exif::{Context, In, Tag};

use crate::Orientation;

/// Identifier that opens an Exif APP1 segment.
pub(crate) const EXIF_HEADER: &[u8; 6] = b"Exif\0\0";

/// Build the APP1 payload carrying a single orientation entry.
///
/// Layout: Exif identifier, big-endian TIFF header, IFD0 with one SHORT
/// entry for tag 0x0112, and a zero next-IFD offset.
pub(crate) fn orientation_segment(orientation: Orientation) -> Vec<u8> {
    let mut data = Vec::with_capacity(32);
    data.extend_from_slice(EXIF_HEADER);
    // TIFF header: "MM", magic 42, IFD0 at offset 8.
    data.extend_from_slice(b"MM");
    data.extend_from_slice(&42u16.to_be_bytes());
    data.extend_from_slice(&8u32.to_be_bytes());
    // IFD0 with one entry.
    data.extend_from_slice(&1u16.to_be_bytes());
    data.extend_from_slice(&0x0112u16.to_be_bytes());
    data.extend_from_slice(&3u16.to_be_bytes()); // SHORT
    data.extend_from_slice(&1u32.to_be_bytes());
    data.extend_from_slice(&orientation.exif_value().to_be_bytes());
    data.extend_from_slice(&[0, 0]);
    data.extend_from_slice(&0u32.to_be_bytes());
    data
}

/// Read the orientation tag from an APP1 payload.
///
/// Accepts the payload with or without the `Exif\0\0` identifier. Returns
/// `None` when the tag is missing, malformed, or outside 1-8.
pub(crate) fn read_orientation(app1: &[u8]) -> Option<Orientation> {
    let tiff = app1.strip_prefix(EXIF_HEADER.as_slice()).unwrap_or(app1);

    let parsed = match ::exif::Reader::new().read_raw(tiff.to_vec()) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("ignoring unreadable exif block: {e}");
            return None;
        }
    };
    let field = parsed.get_field(Tag::Orientation, In::PRIMARY)?;
    let Some(value) = field.value.get_uint(0) else {
        tracing::warn!("exif orientation has non-integer value {:?}", field.value);
        return None;
    };

    let orientation = Orientation::from_exif(value);
    if orientation.is_none() {
        tracing::warn!(value, "ignoring illegal exif orientation");
    }
    orientation
}

/// IFD an EXIF field was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExifGroup {
    /// IFD0, the primary image's TIFF tags.
    Tiff,
    Exif,
    Gps,
    Interop,
}

/// One EXIF field of the primary image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExifField {
    pub group: ExifGroup,
    /// Numeric tag within its group.
    pub tag: u16,
    /// Tag name, e.g. `Orientation`. Unknown tags render as `Tag(<ctx>, <n>)`.
    pub name: String,
    /// Human-readable value.
    pub value: String,
}

/// List the primary image's fields from an APP1 payload.
///
/// IFD pointer tags are folded into the groups they point at, and the
/// thumbnail IFD is skipped. An unreadable block yields no fields.
pub(crate) fn read_fields(app1: &[u8]) -> Vec<ExifField> {
    let tiff = app1.strip_prefix(EXIF_HEADER.as_slice()).unwrap_or(app1);
    let parsed = match ::exif::Reader::new().read_raw(tiff.to_vec()) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("ignoring unreadable exif block: {e}");
            return Vec::new();
        }
    };

    parsed
        .fields()
        .filter(|f| f.ifd_num == In::PRIMARY)
        .filter(|f| {
            !matches!(
                f.tag,
                Tag::ExifIFDPointer | Tag::GPSInfoIFDPointer | Tag::InteropIFDPointer
            )
        })
        .map(|f| ExifField {
            group: match f.tag.context() {
                Context::Tiff => ExifGroup::Tiff,
                Context::Exif => ExifGroup::Exif,
                Context::Gps => ExifGroup::Gps,
                _ => ExifGroup::Interop,
            },
            tag: f.tag.number(),
            name: f.tag.to_string(),
            value: f.display_value().to_string(),
        })
        .collect()
}
